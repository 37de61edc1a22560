//! 汇总统计
//!
//! 空输入一律返回 0；样本数不足以分辨所求分位数时回退到最大值。

use serde::{Deserialize, Serialize};

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn sorted(xs: &[f64]) -> Vec<f64> {
    let mut v = xs.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// 偶数个样本时取中间两个的平均。
pub fn median(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let v = sorted(xs);
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        v[mid]
    } else {
        (v[mid - 1] + v[mid]) / 2.0
    }
}

pub fn min(xs: &[f64]) -> f64 {
    xs.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub fn max(xs: &[f64]) -> f64 {
    xs.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// 把数据切成 `n` 等份的第 `i` 个切点（1 <= i < n），"exclusive" 插值法。
///
/// 要求 `sorted.len() >= 2`。
fn exclusive_cut(sorted: &[f64], n: usize, i: usize) -> f64 {
    let len = sorted.len();
    let m = len + 1;
    let j = (i * m / n).clamp(1, len - 1);
    let delta = (i * m) as f64 - (j * n) as f64;
    let n = n as f64;
    (sorted[j - 1] * (n - delta) + sorted[j] * delta) / n
}

/// 第 `i`/`n` 分位数；样本少于 `n` 个时回退到最大值，空输入为 0。
pub fn quantile_or_max(xs: &[f64], n: usize, i: usize) -> f64 {
    debug_assert!(i >= 1 && i < n);
    if xs.len() >= n.max(2) {
        exclusive_cut(&sorted(xs), n, i)
    } else {
        max(xs)
    }
}

pub fn p90(xs: &[f64]) -> f64 {
    quantile_or_max(xs, 10, 9)
}

pub fn p99(xs: &[f64]) -> f64 {
    quantile_or_max(xs, 100, 99)
}

/// 端到端延迟（finish - arrival），单位 ns
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub avg_ns: f64,
    pub median_ns: f64,
    pub p90_ns: f64,
    pub p99_ns: f64,
    pub min_ns: f64,
    pub max_ns: f64,
}

impl LatencyStats {
    pub fn from_samples(xs: &[f64]) -> Self {
        Self {
            avg_ns: mean(xs),
            median_ns: median(xs),
            p90_ns: p90(xs),
            p99_ns: p99(xs),
            min_ns: min(xs),
            max_ns: max(xs),
        }
    }
}

/// 执行队列中的等待（start - enqueue），单位 ns
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitStats {
    pub avg_wait_ns: f64,
    pub median_wait_ns: f64,
    pub max_wait_ns: f64,
}

impl WaitStats {
    pub fn from_samples(xs: &[f64]) -> Self {
        Self {
            avg_wait_ns: mean(xs),
            median_wait_ns: median(xs),
            max_wait_ns: max(xs),
        }
    }
}
