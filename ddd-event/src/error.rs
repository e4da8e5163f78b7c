//! 事件系统统一错误定义
//!
//! 容器解析失败与监听器执行失败均原样向 `trigger`/`until` 的调用方传播，
//! 调度器本身不做重试与转换。
//!
//! “无监听者”不是错误，而是 [`Outcome::NoListener`](crate::Outcome::NoListener)。
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    // --- 容器解析 ---
    #[error("resolution failed: id={id}, reason={reason}")]
    Resolution { id: String, reason: String },

    // --- 调用 ---
    #[error("method not found: object={object}, method={method}")]
    MethodNotFound { object: String, method: String },
    #[error("static listener not found: {target}")]
    StaticNotFound { target: String },
    #[error("listener error: listener={listener}, reason={reason}")]
    Listener { listener: String, reason: String },

    // --- 通用 ---
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EventError {
    pub fn resolution(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn method_not_found(object: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            object: object.into(),
            method: method.into(),
        }
    }

    pub fn listener(listener: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Listener {
            listener: listener.into(),
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type EventResult<T> = Result<T, EventError>;

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Other(err.into())
    }
}
