//! 错误类型

use thiserror::Error;

/// 配置校验失败
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("leader_count must be at least 1 when task_count > 0")]
    ZeroLeaders,
    #[error("follower_count must be at least 1 when task_count > 0")]
    ZeroFollowers,
    #[error("batch_size must be at least 1")]
    ZeroBatch,
    #[error("exec_queue_capacity must be at least 1 (omit it for an unbounded queue)")]
    ZeroCapacity,
    #[error("sample_interval must be > 0, got {0}")]
    NonPositiveSampleInterval(f64),
    #[error("max_sim_time must be > 0, got {0}")]
    NonPositiveCeiling(f64),
    #[error("{field} must be >= 0, got {value}")]
    NegativeValue { field: &'static str, value: f64 },
    #[error("{field} must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("unknown {kind} `{value}`")]
    UnknownVariant { kind: &'static str, value: String },
}

/// 二进制入口的错误（配置、文件读写、JSON）
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
