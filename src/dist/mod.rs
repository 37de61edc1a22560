//! 随机变量库
//!
//! 到达间隔、服务时间、派发代价都是可插拔的 `Variate`。任何
//! `rand::distributions::Distribution<f64>` 都自动实现 `Variate`，
//! 因此自定义代价函数只需实现 rand 的 `Distribution`。

use std::f64::consts::TAU;

use rand::distributions::{Distribution, Standard};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{ArrivalModel, DispatchMode, SimConfig};
use crate::sim::SimTime;

/// 全局唯一的随机源：所有进程按调度顺序共享同一个流，从而保证可复现。
pub type SimRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// 内置分布（单位：ns）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dist {
    Constant(f64),
    Exponential { rate: f64 },
    /// 正态分布，负值截断为 0
    ClippedNormal { mean: f64, sd: f64 },
}

impl Dist {
    /// 速率 <= 0 时退化为 0 间隔。
    pub fn exponential(rate: f64) -> Dist {
        if rate > 0.0 {
            Dist::Exponential { rate }
        } else {
            Dist::Constant(0.0)
        }
    }

    /// 标准差 <= 0 时退化为确定性的均值。
    pub fn clipped_normal(mean: f64, sd: f64) -> Dist {
        if sd > 0.0 {
            Dist::ClippedNormal { mean, sd }
        } else {
            Dist::Constant(mean)
        }
    }

    pub fn inter_arrival(model: ArrivalModel, rate: f64) -> Dist {
        match model {
            ArrivalModel::Poisson => Dist::exponential(rate),
            ArrivalModel::Deterministic if rate > 0.0 => Dist::Constant(1.0 / rate),
            ArrivalModel::Deterministic => Dist::Constant(0.0),
        }
    }
}

impl Distribution<f64> for Dist {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Dist::Constant(v) => v,
            Dist::Exponential { rate } => {
                let u: f64 = Standard.sample(rng);
                -(1.0 - u).ln() / rate
            }
            Dist::ClippedNormal { mean, sd } => {
                // Box-Muller；u1 取 (0, 1] 以避开 ln(0)
                let s: f64 = Standard.sample(rng);
                let u1 = 1.0 - s;
                let u2: f64 = Standard.sample(rng);
                let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
                (mean + sd * z).max(0.0)
            }
        }
    }
}

/// 可插拔的随机变量
pub trait Variate: Send {
    fn draw(&self, rng: &mut SimRng) -> f64;

    /// 采样并换算为仿真时间
    fn draw_time(&self, rng: &mut SimRng) -> SimTime {
        SimTime::from_nanos_f64(self.draw(rng))
    }
}

impl<D: Distribution<f64> + Send> Variate for D {
    fn draw(&self, rng: &mut SimRng) -> f64 {
        self.sample(rng)
    }
}

/// 一次运行用到的三个分布
pub struct Distributions {
    pub inter_arrival: Box<dyn Variate>,
    pub service: Box<dyn Variate>,
    pub dispatch_cost: Box<dyn Variate>,
}

impl Distributions {
    pub fn from_config(mode: DispatchMode, cfg: &SimConfig) -> Self {
        Self {
            inter_arrival: Box::new(Dist::inter_arrival(cfg.arrival_model, cfg.arrival_rate)),
            service: Box::new(Dist::clipped_normal(
                cfg.task_duration_mean,
                cfg.task_duration_sd,
            )),
            dispatch_cost: Box::new(Dist::Constant(cfg.dispatch_time(mode))),
        }
    }

    pub fn with_dispatch_cost(mut self, cost: impl Variate + 'static) -> Self {
        self.dispatch_cost = Box::new(cost);
        self
    }

    pub fn with_service(mut self, service: impl Variate + 'static) -> Self {
        self.service = Box::new(service);
        self
    }

    pub fn with_inter_arrival(mut self, inter_arrival: impl Variate + 'static) -> Self {
        self.inter_arrival = Box::new(inter_arrival);
        self
    }
}
