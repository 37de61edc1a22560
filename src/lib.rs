//! dispatch-sim：leader/follower 任务派发的离散事件性能模型
//!
//! 比较软件派发路径与硬件加速派发路径在吞吐与延迟上的取舍。

pub mod config;
pub mod dist;
pub mod error;
pub mod model;
pub mod queue;
pub mod report;
pub mod run;
pub mod sim;

pub use config::{ArrivalModel, ConfigOverlay, DispatchMode, SimConfig};
pub use error::{ConfigError, SimError};
pub use report::{PairedResult, SimResult};
pub use run::{Simulation, run_pair, run_sim};

#[cfg(test)]
mod test;
