//! 事件参数与负载
//!
//! - [`Params`]：传给监听器的唯一参数，类型擦除、可廉价克隆；
//! - [`EventPayload`]：结构化事件对象，事件名默认取其运行时类型名；
//! - [`Event`]：`trigger` 的第一个参数，可以是事件名，也可以是负载对象。
//!
use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// 监听器参数（可为空）
#[derive(Clone, Default)]
pub struct Params(Option<Arc<dyn Any + Send + Sync>>);

impl Params {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    pub fn from_arc(value: Arc<dyn Any + Send + Sync>) -> Self {
        Self(Some(value))
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// 以具体类型读取参数；类型不符或为空时返回 `None`
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|v| v.downcast_ref::<T>())
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(_) => f.write_str("Params(Some(..))"),
            None => f.write_str("Params(None)"),
        }
    }
}

/// 结构化事件负载
///
/// 以负载对象触发事件时，事件名由 `event_name` 推导，负载本身作为监听器参数。
/// 默认实现返回运行时类型名（`std::any::type_name`），可通过
/// `#[derive(EventPayload)]` 与 `#[event_payload(name = "...")]` 覆写。
pub trait EventPayload: Any + Send + Sync {
    fn event_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(type_name::<Self>())
    }
}

/// 触发目标：事件名或负载对象
#[derive(Clone, Debug)]
pub enum Event {
    Name(String),
    Payload { name: String, payload: Params },
}

impl Event {
    /// 由负载对象构造：事件名取自负载，负载作为参数
    pub fn payload<P: EventPayload>(payload: P) -> Self {
        let name = payload.event_name().into_owned();
        Self::Payload {
            name,
            payload: Params::new(payload),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Payload { name, .. } => name,
        }
    }

    /// 拆解为 (事件名, 参数)；负载对象覆盖显式传入的 `params`
    pub(crate) fn into_parts(self, params: Params) -> (String, Params) {
        match self {
            Self::Name(name) => (name, params),
            Self::Payload { name, payload } => (name, payload),
        }
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Event {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for Event {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}
