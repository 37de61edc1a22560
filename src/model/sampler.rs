//! 周期采样器
//!
//! - `DepthSampler`：每个 tick 记录两个队列的当前长度（首个采样在启动时刻）。
//! - `RateSampler`：每个 tick 计算自上次 tick 以来的入队/出队速率。

use super::world::dispatch_world;
use crate::sim::{Event, SimTime, Simulator, World};

/// 速率分母的下限（ns）
pub const RATE_DT_FLOOR_NS: f64 = 1e-9;

/// 计数增量 / 时间间隔，间隔被下限保护，结果总是有限值。
pub fn instantaneous_rate(delta: u64, dt_ns: f64) -> f64 {
    let dt = if dt_ns.is_finite() {
        dt_ns.max(RATE_DT_FLOOR_NS)
    } else {
        RATE_DT_FLOOR_NS
    };
    delta as f64 / dt
}

/// 采样间隔至少 1 ps，避免在同一时刻无限重排。
fn tick(interval: SimTime) -> SimTime {
    interval.max(SimTime(1))
}

#[derive(Debug)]
pub struct DepthSampler {
    interval: SimTime,
}

impl DepthSampler {
    pub fn new(interval: SimTime) -> Self {
        Self {
            interval: tick(interval),
        }
    }
}

impl Event for DepthSampler {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = dispatch_world(world);
        let (exec, arrival) = (w.exec.len(), w.arrival.len());
        w.metrics.sample_depths(sim.now(), exec, arrival);
        sim.schedule_in(self.interval, *self);
    }
}

#[derive(Debug, Clone, Copy)]
struct RateMark {
    t: SimTime,
    enqueued: u64,
    dequeued: u64,
}

#[derive(Debug)]
pub struct RateSampler {
    interval: SimTime,
    last: Option<RateMark>,
}

impl RateSampler {
    pub fn new(interval: SimTime) -> Self {
        Self {
            interval: tick(interval),
            last: None,
        }
    }
}

impl Event for RateSampler {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let mut me = *self;
        let w = dispatch_world(world);
        let now = RateMark {
            t: sim.now(),
            enqueued: w.metrics.total_enqueued,
            dequeued: w.metrics.total_dequeued,
        };
        if let Some(last) = me.last {
            let dt = (now.t - last.t).as_nanos_f64();
            let enq = instantaneous_rate(now.enqueued - last.enqueued, dt);
            let deq = instantaneous_rate(now.dequeued - last.dequeued, dt);
            w.metrics.sample_rates(now.t, enq, deq);
        }
        me.last = Some(now);
        sim.schedule_in(me.interval, me);
    }
}
