//! 指标账本
//!
//! 被动记录器：只提供记录操作，不含任何决策逻辑。进程之间不直接读取彼此的状态，
//! 只通过这里或队列交流。

use std::collections::BTreeMap;

use super::id::{FollowerId, LeaderId, TaskId};
use super::task::TaskRecord;
use crate::sim::SimTime;

/// 队列深度采样（前向填充语义：两次采样之间深度保持不变）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthSample {
    pub t: SimTime,
    pub depth: usize,
}

/// 吞吐率采样（任务/ns）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSample {
    pub t: SimTime,
    pub enq: f64,
    pub deq: f64,
}

#[derive(Debug, Default)]
pub struct Metrics {
    tasks: BTreeMap<TaskId, TaskRecord>,
    pub queue_samples_exec: Vec<DepthSample>,
    pub queue_samples_arrival: Vec<DepthSample>,
    pub rate_samples: Vec<RateSample>,
    /// 派发 + 入队等待
    leader_busy: Vec<SimTime>,
    /// 在满的执行队列上挂起的时间
    leader_blocked: Vec<SimTime>,
    follower_busy: Vec<SimTime>,
    pub total_enqueued: u64,
    /// 已执行完的任务数（follower 完成时计）
    pub total_dequeued: u64,
    pub completed_tasks: u64,
}

impl Metrics {
    pub fn new(leaders: usize, followers: usize) -> Self {
        Self {
            leader_busy: vec![SimTime::ZERO; leaders],
            leader_blocked: vec![SimTime::ZERO; leaders],
            follower_busy: vec![SimTime::ZERO; followers],
            ..Self::default()
        }
    }

    fn entry(&mut self, id: TaskId) -> &mut TaskRecord {
        self.tasks.entry(id).or_insert_with(|| TaskRecord::new(id))
    }

    pub fn record_arrival(&mut self, id: TaskId, t: SimTime) {
        self.entry(id).arrival = Some(t);
    }

    pub fn record_enqueued(&mut self, id: TaskId, t: SimTime, leader: LeaderId) {
        let rec = self.entry(id);
        rec.enqueued = Some(t);
        rec.enqueued_by = Some(leader);
        self.total_enqueued += 1;
    }

    pub fn record_start_exec(&mut self, id: TaskId, t: SimTime, follower: FollowerId) {
        let rec = self.entry(id);
        rec.start_exec = Some(t);
        rec.follower = Some(follower);
    }

    /// 出队计数在任务完成时才增加，与 `completed_tasks` 同步。
    pub fn record_finish(&mut self, id: TaskId, t: SimTime) {
        self.entry(id).finish = Some(t);
        self.completed_tasks += 1;
        self.total_dequeued += 1;
    }

    pub fn add_leader_busy(&mut self, leader: LeaderId, d: SimTime) {
        let slot = &mut self.leader_busy[leader.0];
        *slot = slot.saturating_add(d);
    }

    pub fn add_leader_blocked(&mut self, leader: LeaderId, d: SimTime) {
        let slot = &mut self.leader_blocked[leader.0];
        *slot = slot.saturating_add(d);
    }

    pub fn add_follower_busy(&mut self, follower: FollowerId, d: SimTime) {
        let slot = &mut self.follower_busy[follower.0];
        *slot = slot.saturating_add(d);
    }

    pub fn sample_depths(&mut self, t: SimTime, exec_depth: usize, arrival_depth: usize) {
        self.queue_samples_exec.push(DepthSample { t, depth: exec_depth });
        self.queue_samples_arrival.push(DepthSample {
            t,
            depth: arrival_depth,
        });
    }

    pub fn sample_rates(&mut self, t: SimTime, enq: f64, deq: f64) {
        self.rate_samples.push(RateSample { t, enq, deq });
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskRecord> {
        self.tasks.values()
    }

    pub fn task(&self, id: TaskId) -> Option<&TaskRecord> {
        self.tasks.get(&id)
    }

    pub fn leader_busy(&self) -> &[SimTime] {
        &self.leader_busy
    }

    pub fn leader_blocked(&self) -> &[SimTime] {
        &self.leader_blocked
    }

    pub fn follower_busy(&self) -> &[SimTime] {
        &self.follower_busy
    }
}
