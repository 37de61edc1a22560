//! 派发模型
//!
//! 生成器、leader、follower 和采样器进程，以及它们共享的世界与指标账本。

// 子模块声明
mod follower;
mod generator;
mod id;
mod leader;
mod metrics;
mod sampler;
mod task;
mod world;

// 重新导出公共接口
pub use follower::Follower;
pub use generator::Generator;
pub use id::{FollowerId, LeaderId, TaskId};
pub use leader::Leader;
pub use metrics::{DepthSample, Metrics, RateSample};
pub use sampler::{DepthSampler, RATE_DT_FLOOR_NS, RateSampler, instantaneous_rate};
pub use task::TaskRecord;
pub use world::DispatchWorld;
