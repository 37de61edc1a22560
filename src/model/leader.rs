//! Leader 派发进程
//!
//! 循环：阻塞取一个任务，再用非阻塞 `try_pop` 把已就绪的任务凑成一批（至多 `batch_size`），
//! 为整批支付一次派发代价，然后逐个压入执行队列。执行队列有界且满时入队挂起，
//! 挂起时长计入 blocked 时间；busy 时间 = 派发延迟 + 入队等待。
//! 被阻塞的任务在被接纳的那一刻记账（入队时间、blocked/busy），而不是等 leader 恢复运行。

use std::collections::VecDeque;

use tracing::debug;

use super::id::{LeaderId, TaskId};
use super::metrics::Metrics;
use super::world::{DispatchWorld, dispatch_world};
use crate::sim::{Event, SimTime, Simulator, World};

#[derive(Debug)]
enum LeaderState {
    Fetch,
    Got(TaskId),
    Dispatched {
        batch: VecDeque<TaskId>,
        started: SimTime,
    },
    Enqueue {
        batch: VecDeque<TaskId>,
    },
}

#[derive(Debug)]
pub struct Leader {
    id: LeaderId,
    batch_size: usize,
    state: LeaderState,
}

impl Leader {
    pub fn new(id: LeaderId, batch_size: usize) -> Self {
        Self {
            id,
            batch_size: batch_size.max(1),
            state: LeaderState::Fetch,
        }
    }

    fn resume(mut self, sim: &mut Simulator, w: &mut DispatchWorld) {
        loop {
            let state = std::mem::replace(&mut self.state, LeaderState::Fetch);
            self.state = match state {
                LeaderState::Fetch => match w.arrival.try_pop(sim, &mut w.metrics) {
                    Some(task) => LeaderState::Got(task),
                    None => {
                        w.arrival.wait_pop(Box::new(move |task, sim: &mut Simulator| {
                            let me = Leader {
                                state: LeaderState::Got(task),
                                ..self
                            };
                            sim.schedule(sim.now(), me);
                        }));
                        return;
                    }
                },
                LeaderState::Got(first) => {
                    let mut batch = VecDeque::with_capacity(self.batch_size);
                    batch.push_back(first);
                    while batch.len() < self.batch_size {
                        match w.arrival.try_pop(sim, &mut w.metrics) {
                            Some(task) => batch.push_back(task),
                            None => break,
                        }
                    }
                    debug!(
                        leader = self.id.0,
                        first = %first,
                        size = batch.len(),
                        now = ?sim.now(),
                        "batch formed"
                    );

                    let cost = w.draw_dispatch_cost();
                    let next = LeaderState::Dispatched {
                        batch,
                        started: sim.now(),
                    };
                    if !cost.is_zero() {
                        self.state = next;
                        sim.schedule_in(cost, self);
                        return;
                    }
                    next
                }
                LeaderState::Dispatched { batch, started } => {
                    w.metrics.add_leader_busy(self.id, sim.now() - started);
                    LeaderState::Enqueue { batch }
                }
                LeaderState::Enqueue { mut batch } => match batch.pop_front() {
                    None => LeaderState::Fetch,
                    Some(task) => match w.exec.try_push(task, sim) {
                        Ok(()) => {
                            w.metrics.record_enqueued(task, sim.now(), self.id);
                            LeaderState::Enqueue { batch }
                        }
                        Err(task) => {
                            debug!(leader = self.id.0, task = %task, "exec queue full, leader blocked");
                            let (leader, since) = (self.id, sim.now());
                            self.state = LeaderState::Enqueue { batch };
                            w.exec.wait_push(
                                task,
                                Box::new(move |sim: &mut Simulator, m: &mut Metrics| {
                                    let waited = sim.now() - since;
                                    if !waited.is_zero() {
                                        m.add_leader_blocked(leader, waited);
                                    }
                                    m.add_leader_busy(leader, waited);
                                    m.record_enqueued(task, sim.now(), leader);
                                    sim.schedule(sim.now(), self);
                                }),
                            );
                            return;
                        }
                    },
                },
            };
        }
    }
}

impl Event for Leader {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = dispatch_world(world);
        (*self).resume(sim, w);
    }
}
