//! 运行结果
//!
//! 一次运行的结构化结果（JSON），外部绘图工具按键名读取。

pub mod stats;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ArrivalModel, DispatchMode, SimConfig};
use crate::model::{DepthSample, Metrics};
use crate::sim::SimTime;

pub use stats::{LatencyStats, WaitStats};

/// 利用率分母的下限（ns）
pub const UTIL_ELAPSED_FLOOR_NS: f64 = 1.0;

/// 报告中 follower 利用率采样的最大条目数
pub const FOLLOWER_SAMPLE_CAP: usize = 16;

/// 配置回显 + 最终虚拟时间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: DispatchMode,
    pub env_now: f64,
    pub num_tasks: u64,
    pub num_followers: usize,
    pub num_leaders: usize,
    pub task_duration_mean: f64,
    pub task_duration_sd: f64,
    pub dispatch_time: f64,
    pub arrival_rate: f64,
    pub arrival_model: ArrivalModel,
    pub queue_capacity: Option<usize>,
    pub batch_enqueue: usize,
    pub sample_interval: f64,
    pub seed: u64,
    /// 触发安全上限而提前停止；此时结果是部分的
    pub aborted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthPoint {
    pub t: f64,
    pub depth: usize,
}

impl From<&DepthSample> for DepthPoint {
    fn from(s: &DepthSample) -> Self {
        Self {
            t: s.t.as_nanos_f64(),
            depth: s.depth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub t: f64,
    pub enq: f64,
    pub deq: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimResult {
    pub summary: RunSummary,
    pub latency_stats: LatencyStats,
    pub wait_stats: WaitStats,
    pub leader_util: BTreeMap<usize, f64>,
    pub leader_block_fraction: BTreeMap<usize, f64>,
    pub follower_util_sample: BTreeMap<usize, f64>,
    pub queue_ts_exec: Vec<DepthPoint>,
    pub queue_ts_arrival: Vec<DepthPoint>,
    pub rate_ts: Vec<RatePoint>,
    pub completed_tasks: u64,
    pub total_enqueued: u64,
    pub total_dequeued: u64,
}

/// 软件 / 硬件派发的成对对比，是交给绘图工具的顶层产物
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedResult {
    pub software: SimResult,
    pub hardware: SimResult,
}

fn fractions(times: &[SimTime], elapsed_ns: f64) -> BTreeMap<usize, f64> {
    times
        .iter()
        .enumerate()
        .map(|(i, t)| (i, t.as_nanos_f64() / elapsed_ns))
        .collect()
}

impl SimResult {
    pub fn collect(
        mode: DispatchMode,
        cfg: &SimConfig,
        now: SimTime,
        aborted: bool,
        metrics: &Metrics,
    ) -> Self {
        let mut latencies = Vec::new();
        let mut waits = Vec::new();
        for rec in metrics.tasks() {
            if let Some(lat) = rec.latency() {
                latencies.push(lat.as_nanos_f64());
            }
            if let Some(wait) = rec.queue_wait() {
                waits.push(wait.as_nanos_f64());
            }
        }

        let env_now = now.as_nanos_f64();
        let elapsed = env_now.max(UTIL_ELAPSED_FLOOR_NS);
        let follower_busy = metrics.follower_busy();
        let sampled = &follower_busy[..follower_busy.len().min(FOLLOWER_SAMPLE_CAP)];

        Self {
            summary: RunSummary {
                mode,
                env_now,
                num_tasks: cfg.task_count,
                num_followers: cfg.follower_count,
                num_leaders: cfg.leader_count,
                task_duration_mean: cfg.task_duration_mean,
                task_duration_sd: cfg.task_duration_sd,
                dispatch_time: cfg.dispatch_time(mode),
                arrival_rate: cfg.arrival_rate,
                arrival_model: cfg.arrival_model,
                queue_capacity: cfg.exec_queue_capacity,
                batch_enqueue: cfg.batch_size,
                sample_interval: cfg.sample_interval,
                seed: cfg.seed,
                aborted,
            },
            latency_stats: LatencyStats::from_samples(&latencies),
            wait_stats: WaitStats::from_samples(&waits),
            leader_util: fractions(metrics.leader_busy(), elapsed),
            leader_block_fraction: fractions(metrics.leader_blocked(), elapsed),
            follower_util_sample: fractions(sampled, elapsed),
            queue_ts_exec: metrics.queue_samples_exec.iter().map(DepthPoint::from).collect(),
            queue_ts_arrival: metrics
                .queue_samples_arrival
                .iter()
                .map(DepthPoint::from)
                .collect(),
            rate_ts: metrics
                .rate_samples
                .iter()
                .map(|s| RatePoint {
                    t: s.t.as_nanos_f64(),
                    enq: s.enq,
                    deq: s.deq,
                })
                .collect(),
            completed_tasks: metrics.completed_tasks,
            total_enqueued: metrics.total_enqueued,
            total_dequeued: metrics.total_dequeued,
        }
    }

    /// 一行摘要（CLI 输出）
    pub fn summary_line(&self) -> String {
        format!(
            "mode={} completed={}/{} env_now={:.3} median_ns={:.3} p99_ns={:.3}",
            self.summary.mode,
            self.completed_tasks,
            self.summary.num_tasks,
            self.summary.env_now,
            self.latency_stats.median_ns,
            self.latency_stats.p99_ns,
        )
    }
}
