//! 仿真时间类型
//!
//! 定义仿真时间及其单位转换。内部以皮秒计数，对外统一以纳秒（f64）报告。

use std::ops::{Add, Sub};

const PS_PER_NS: u64 = 1_000;

/// 仿真时间（皮秒）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub const MAX: SimTime = SimTime(u64::MAX);

    pub fn from_nanos(ns: u64) -> SimTime {
        SimTime(ns.saturating_mul(PS_PER_NS))
    }

    /// 由分布采样得到的实数纳秒值转换为仿真时间，四舍五入到皮秒。
    ///
    /// 负数与 NaN 视为 0；过大的值饱和到 `SimTime::MAX`。
    pub fn from_nanos_f64(ns: f64) -> SimTime {
        if !(ns > 0.0) {
            return SimTime::ZERO;
        }
        let ps = (ns * PS_PER_NS as f64).round();
        if ps >= u64::MAX as f64 {
            SimTime::MAX
        } else {
            SimTime(ps as u64)
        }
    }

    pub fn as_nanos_f64(self) -> f64 {
        self.0 as f64 / PS_PER_NS as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(rhs.0))
    }

    pub fn saturating_sub(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_sub(rhs.0))
    }
}

impl Add for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> SimTime {
        self.saturating_add(rhs)
    }
}

impl Sub for SimTime {
    type Output = SimTime;

    fn sub(self, rhs: SimTime) -> SimTime {
        self.saturating_sub(rhs)
    }
}
