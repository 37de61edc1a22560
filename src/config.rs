//! 仿真配置
//!
//! `SimConfig` 在每次运行前构造一次，以引用传给所有组件；运行期间不可变。
//! `ConfigOverlay` 是可选覆盖项的子集（JSON），未识别的键被忽略。
//! 所有时间单位均为纳秒。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 到达过程模型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalModel {
    /// 指数分布的到达间隔，速率为 `arrival_rate`
    #[default]
    Poisson,
    /// 固定到达间隔 `1 / arrival_rate`
    Deterministic,
}

impl fmt::Display for ArrivalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArrivalModel::Poisson => "poisson",
            ArrivalModel::Deterministic => "deterministic",
        })
    }
}

impl FromStr for ArrivalModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poisson" => Ok(ArrivalModel::Poisson),
            "deterministic" => Ok(ArrivalModel::Deterministic),
            _ => Err(ConfigError::UnknownVariant {
                kind: "arrival model",
                value: s.to_string(),
            }),
        }
    }
}

/// 派发代价档位：软件路径或硬件加速路径
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DispatchMode {
    #[serde(rename = "sw")]
    Software,
    #[serde(rename = "hw")]
    Hardware,
}

impl DispatchMode {
    pub const ALL: [DispatchMode; 2] = [DispatchMode::Software, DispatchMode::Hardware];
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DispatchMode::Software => "sw",
            DispatchMode::Hardware => "hw",
        })
    }
}

impl FromStr for DispatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sw" | "software" => Ok(DispatchMode::Software),
            "hw" | "hardware" => Ok(DispatchMode::Hardware),
            _ => Err(ConfigError::UnknownVariant {
                kind: "dispatch mode",
                value: s.to_string(),
            }),
        }
    }
}

/// 一次运行的完整配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub task_count: u64,
    pub follower_count: usize,
    pub leader_count: usize,
    pub task_duration_mean: f64,
    pub task_duration_sd: f64,
    pub dispatch_time_sw: f64,
    pub dispatch_time_hw: f64,
    /// 任务/ns
    pub arrival_rate: f64,
    pub arrival_model: ArrivalModel,
    /// `None` 表示无界
    pub exec_queue_capacity: Option<usize>,
    pub batch_size: usize,
    pub sample_interval: f64,
    pub seed: u64,
    /// 安全上限：虚拟时间超过它即中止运行
    pub max_sim_time: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            task_count: 1000,
            follower_count: 64,
            leader_count: 1,
            task_duration_mean: 10.0,
            task_duration_sd: 0.0,
            dispatch_time_sw: 5.0,
            dispatch_time_hw: 1.0,
            arrival_rate: 0.2,
            arrival_model: ArrivalModel::Poisson,
            exec_queue_capacity: None,
            batch_size: 1,
            sample_interval: 2.0,
            seed: 42,
            max_sim_time: 1e9,
        }
    }
}

impl SimConfig {
    /// 当前档位的每批派发代价（ns）
    pub fn dispatch_time(&self, mode: DispatchMode) -> f64 {
        match mode {
            DispatchMode::Software => self.dispatch_time_sw,
            DispatchMode::Hardware => self.dispatch_time_hw,
        }
    }

    /// 返回叠加了覆盖项的新配置。
    pub fn apply(&self, overlay: &ConfigOverlay) -> SimConfig {
        let mut cfg = self.clone();
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = overlay.$field.clone() {
                    cfg.$field = v;
                })*
            };
        }
        take!(
            task_count,
            follower_count,
            leader_count,
            task_duration_mean,
            task_duration_sd,
            dispatch_time_sw,
            dispatch_time_hw,
            arrival_rate,
            arrival_model,
            exec_queue_capacity,
            batch_size,
            sample_interval,
            seed,
            max_sim_time,
        );
        cfg
    }

    /// 拒绝会让引擎空转或无意义的取值。
    ///
    /// `arrival_rate` 只要求有限：`<= 0` 表示到达间隔为 0（全部任务在 t=0 到达）。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.arrival_rate.is_finite() {
            return Err(ConfigError::NonFiniteValue {
                field: "arrival_rate",
            });
        }
        let reals = [
            ("task_duration_mean", self.task_duration_mean),
            ("task_duration_sd", self.task_duration_sd),
            ("dispatch_time_sw", self.dispatch_time_sw),
            ("dispatch_time_hw", self.dispatch_time_hw),
            ("sample_interval", self.sample_interval),
            ("max_sim_time", self.max_sim_time),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { field });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }
        if self.sample_interval <= 0.0 {
            return Err(ConfigError::NonPositiveSampleInterval(self.sample_interval));
        }
        if self.max_sim_time <= 0.0 {
            return Err(ConfigError::NonPositiveCeiling(self.max_sim_time));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatch);
        }
        if self.exec_queue_capacity == Some(0) {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.task_count > 0 {
            if self.leader_count == 0 {
                return Err(ConfigError::ZeroLeaders);
            }
            if self.follower_count == 0 {
                return Err(ConfigError::ZeroFollowers);
            }
        }
        Ok(())
    }
}

/// 可选覆盖项；同时接受旧版大写键名（如 `NUM_TASKS`、`BATCH_ENQUEUE`）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    #[serde(alias = "NUM_TASKS")]
    pub task_count: Option<u64>,
    #[serde(alias = "NUM_FOLLOWERS")]
    pub follower_count: Option<usize>,
    #[serde(alias = "NUM_LEADERS")]
    pub leader_count: Option<usize>,
    #[serde(alias = "TASK_DURATION_MEAN")]
    pub task_duration_mean: Option<f64>,
    #[serde(alias = "TASK_DURATION_SD")]
    pub task_duration_sd: Option<f64>,
    #[serde(alias = "DISPATCH_TIME_SW")]
    pub dispatch_time_sw: Option<f64>,
    #[serde(alias = "DISPATCH_TIME_HW")]
    pub dispatch_time_hw: Option<f64>,
    #[serde(alias = "ARRIVAL_RATE")]
    pub arrival_rate: Option<f64>,
    #[serde(alias = "ARRIVAL_MODEL")]
    pub arrival_model: Option<ArrivalModel>,
    /// 外层 `None`：未给出；`Some(None)`：显式 `null`，恢复为无界。
    #[serde(
        alias = "EXEC_QUEUE_CAPACITY",
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub exec_queue_capacity: Option<Option<usize>>,
    #[serde(alias = "BATCH_ENQUEUE")]
    pub batch_size: Option<usize>,
    #[serde(alias = "SIM_TRACE_SAMPLE_INTERVAL")]
    pub sample_interval: Option<f64>,
    #[serde(alias = "SEED")]
    pub seed: Option<u64>,
    #[serde(alias = "MAX_SIM_TIME")]
    pub max_sim_time: Option<f64>,
}

fn present_or_null<'de, D>(d: D) -> Result<Option<Option<usize>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<usize>::deserialize(d).map(Some)
}

/// 旧版大写键名 -> 字段名
const LEGACY_KEYS: [(&str, &str); 14] = [
    ("NUM_TASKS", "task_count"),
    ("NUM_FOLLOWERS", "follower_count"),
    ("NUM_LEADERS", "leader_count"),
    ("TASK_DURATION_MEAN", "task_duration_mean"),
    ("TASK_DURATION_SD", "task_duration_sd"),
    ("DISPATCH_TIME_SW", "dispatch_time_sw"),
    ("DISPATCH_TIME_HW", "dispatch_time_hw"),
    ("ARRIVAL_RATE", "arrival_rate"),
    ("ARRIVAL_MODEL", "arrival_model"),
    ("EXEC_QUEUE_CAPACITY", "exec_queue_capacity"),
    ("BATCH_ENQUEUE", "batch_size"),
    ("SIM_TRACE_SAMPLE_INTERVAL", "sample_interval"),
    ("SEED", "seed"),
    ("MAX_SIM_TIME", "max_sim_time"),
];

impl ConfigOverlay {
    /// 从任意 JSON 对象解析；未识别的键被忽略。
    ///
    /// 旧键名先被改写为字段名；同一项两种写法都出现时，以字段名为准。
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let Some(obj) = value.as_object() else {
            return ConfigOverlay::deserialize(value);
        };
        let mut canonical = serde_json::Map::with_capacity(obj.len());
        for (key, v) in obj {
            let name = LEGACY_KEYS
                .iter()
                .find(|&&(legacy, _)| legacy == key.as_str())
                .map_or(key.as_str(), |&(_, name)| name);
            if name == key.as_str() || !obj.contains_key(name) {
                canonical.insert(name.to_string(), v.clone());
            }
        }
        serde_json::from_value(serde_json::Value::Object(canonical))
    }
}
