//! 派发世界实现
//!
//! 持有两个队列、指标账本、随机源与分布。所有进程都通过 `&mut dyn World` 引用它。

use super::id::TaskId;
use super::metrics::Metrics;
use crate::config::SimConfig;
use crate::dist::{Distributions, SimRng, seeded_rng};
use crate::queue::FifoQueue;
use crate::sim::{SimTime, World};
use std::any::Any;

pub struct DispatchWorld {
    /// 生成器 -> leader
    pub arrival: FifoQueue<TaskId, Metrics>,
    /// leader -> follower；被阻塞的入队在接纳时刻直接写入账本
    pub exec: FifoQueue<TaskId, Metrics>,
    pub metrics: Metrics,
    rng: SimRng,
    dists: Distributions,
}

impl DispatchWorld {
    pub fn new(cfg: &SimConfig, dists: Distributions) -> Self {
        Self {
            arrival: FifoQueue::unbounded("arrival"),
            exec: FifoQueue::new("exec", cfg.exec_queue_capacity),
            metrics: Metrics::new(cfg.leader_count, cfg.follower_count),
            rng: seeded_rng(cfg.seed),
            dists,
        }
    }

    pub fn draw_inter_arrival(&mut self) -> SimTime {
        self.dists.inter_arrival.draw_time(&mut self.rng)
    }

    pub fn draw_service(&mut self) -> SimTime {
        self.dists.service.draw_time(&mut self.rng)
    }

    pub fn draw_dispatch_cost(&mut self) -> SimTime {
        self.dists.dispatch_cost.draw_time(&mut self.rng)
    }
}

impl World for DispatchWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub(crate) fn dispatch_world(world: &mut dyn World) -> &mut DispatchWorld {
    world
        .as_any_mut()
        .downcast_mut::<DispatchWorld>()
        .expect("world must be DispatchWorld")
}
