//! 事件引擎统一错误定义
//!
//! 聚焦发布守卫、校验、实体查找、调度器交互与订阅者执行等最小必要集合，
//! 便于在各协作方实现层统一转换为 `ReactorError`。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReactorError {
    // --- 发布阶段 ---
    #[error("console guard: {reason}")]
    ConsoleGuard { reason: String },
    #[error("validation failed: {reason}")]
    Validation { reason: String },
    #[error("malformed event: {reason}")]
    MalformedEvent { reason: String },

    // --- 执行阶段 ---
    #[error("entity lookup failed: type={entity_type}, id={entity_id}, reason={reason}")]
    Lookup {
        entity_type: String,
        entity_id: String,
        reason: String,
    },
    #[error("subscriber error: subscriber={subscriber}, reason={reason}")]
    Subscriber { subscriber: String, reason: String },

    // --- 调度器交互 ---
    #[error("scheduler error: {reason}")]
    Scheduler { reason: String },

    // --- 序列化/解析 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
}

/// 统一 Result 类型别名
pub type ReactorResult<T> = Result<T, ReactorError>;

// 允许在时间属性解析处直接使用 `?` 将 chrono 错误转换为 ReactorError
impl From<chrono::ParseError> for ReactorError {
    fn from(err: chrono::ParseError) -> Self {
        ReactorError::Parse {
            reason: err.to_string(),
        }
    }
}
