//! 调度事件
//!
//! 定义待恢复的进程条目及其在最小堆中的优先级。

use super::event::Event;
use super::time::SimTime;
use std::cmp::Ordering;

/// 一次待执行的恢复：执行时间、插入序号和进程状态。
pub struct ScheduledEvent {
    pub(crate) at: SimTime,
    pub(crate) seq: u64,
    pub(crate) ev: Box<dyn Event>,
}

impl ScheduledEvent {
    /// 排序键：先按时间，同一时刻按插入顺序（稳定的 tie-break）。
    fn key(&self) -> (SimTime, u64) {
        (self.at, self.seq)
    }
}

// BinaryHeap 是 max-heap：把比较方向反过来，堆顶即最早的 (at, seq)。
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledEvent {}
