//! Follower 执行进程
//!
//! 循环：从执行队列取一个任务，记录开始时间，按服务时间分布执行，记录完成时间。

use tracing::trace;

use super::id::{FollowerId, TaskId};
use super::world::{DispatchWorld, dispatch_world};
use crate::sim::{Event, SimTime, Simulator, World};

#[derive(Debug, Clone, Copy)]
enum FollowerState {
    Fetch,
    Got(TaskId),
    Executed { task: TaskId, started: SimTime },
}

#[derive(Debug)]
pub struct Follower {
    id: FollowerId,
    state: FollowerState,
}

impl Follower {
    pub fn new(id: FollowerId) -> Self {
        Self {
            id,
            state: FollowerState::Fetch,
        }
    }

    fn resume(mut self, sim: &mut Simulator, w: &mut DispatchWorld) {
        loop {
            let state = self.state;
            self.state = match state {
                FollowerState::Fetch => match w.exec.try_pop(sim, &mut w.metrics) {
                    Some(task) => FollowerState::Got(task),
                    None => {
                        let id = self.id;
                        w.exec.wait_pop(Box::new(move |task, sim: &mut Simulator| {
                            let me = Follower {
                                id,
                                state: FollowerState::Got(task),
                            };
                            sim.schedule(sim.now(), me);
                        }));
                        return;
                    }
                },
                FollowerState::Got(task) => {
                    let started = sim.now();
                    w.metrics.record_start_exec(task, started, self.id);
                    trace!(follower = self.id.0, task = %task, now = ?started, "start exec");
                    let service = w.draw_service();
                    let next = FollowerState::Executed { task, started };
                    if !service.is_zero() {
                        self.state = next;
                        sim.schedule_in(service, self);
                        return;
                    }
                    next
                }
                FollowerState::Executed { task, started } => {
                    w.metrics.add_follower_busy(self.id, sim.now() - started);
                    w.metrics.record_finish(task, sim.now());
                    trace!(follower = self.id.0, task = %task, now = ?sim.now(), "finish exec");
                    FollowerState::Fetch
                }
            };
        }
    }
}

impl Event for Follower {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = dispatch_world(world);
        (*self).resume(sim, w);
    }
}
