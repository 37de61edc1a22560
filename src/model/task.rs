//! 任务时间戳记录
//!
//! 每个生命周期阶段恰好由一个进程写一次；运行结束后保留用于统计。

use super::id::{FollowerId, LeaderId, TaskId};
use crate::sim::SimTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: TaskId,
    pub arrival: Option<SimTime>,
    pub enqueued: Option<SimTime>,
    pub enqueued_by: Option<LeaderId>,
    pub start_exec: Option<SimTime>,
    pub follower: Option<FollowerId>,
    pub finish: Option<SimTime>,
}

impl TaskRecord {
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            arrival: None,
            enqueued: None,
            enqueued_by: None,
            start_exec: None,
            follower: None,
            finish: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.finish.is_some()
    }

    /// finish - arrival
    pub fn latency(&self) -> Option<SimTime> {
        Some(self.finish? - self.arrival?)
    }

    /// start - enqueue
    pub fn queue_wait(&self) -> Option<SimTime> {
        Some(self.start_exec? - self.enqueued?)
    }

    /// 已记录的时间戳满足 arrival <= enqueue <= start <= finish。
    pub fn is_ordered(&self) -> bool {
        let stamps: Vec<SimTime> = [self.arrival, self.enqueued, self.start_exec, self.finish]
            .into_iter()
            .flatten()
            .collect();
        stamps.windows(2).all(|w| w[0] <= w[1])
    }
}
