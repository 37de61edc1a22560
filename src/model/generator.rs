//! 任务生成器
//!
//! 恰好产生 N 个任务：分配编号、记录到达时间、压入到达缓冲区，然后按到达间隔分布休眠。

use tracing::debug;

use super::id::TaskId;
use super::metrics::Metrics;
use super::world::{DispatchWorld, dispatch_world};
use crate::sim::{Event, Simulator, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenState {
    Emit,
    /// 任务已进入到达缓冲区（可能经历了一次阻塞入队）
    Pushed,
}

#[derive(Debug)]
pub struct Generator {
    total: u64,
    emitted: u64,
    state: GenState,
}

impl Generator {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            emitted: 0,
            state: GenState::Emit,
        }
    }

    fn resume(mut self, sim: &mut Simulator, w: &mut DispatchWorld) {
        loop {
            let state = self.state;
            match state {
                GenState::Emit => {
                    if self.emitted >= self.total {
                        debug!(emitted = self.emitted, "generator finished");
                        return;
                    }
                    let id = TaskId(self.emitted);
                    w.metrics.record_arrival(id, sim.now());
                    self.state = GenState::Pushed;
                    if let Err(id) = w.arrival.try_push(id, sim) {
                        w.arrival.wait_push(
                            id,
                            Box::new(move |sim: &mut Simulator, _: &mut Metrics| {
                                sim.schedule(sim.now(), self)
                            }),
                        );
                        return;
                    }
                }
                GenState::Pushed => {
                    self.emitted += 1;
                    self.state = GenState::Emit;
                    let gap = w.draw_inter_arrival();
                    if !gap.is_zero() {
                        sim.schedule_in(gap, self);
                        return;
                    }
                }
            }
        }
    }
}

impl Event for Generator {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = dispatch_world(world);
        (*self).resume(sim, w);
    }
}
