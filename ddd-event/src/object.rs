//! 可注册对象（观察者 / 订阅者 / 处理器）
//!
//! 以显式能力接口替代运行时反射：
//! - `methods`：公开方法名列表（观察者据此按 `on` 前缀自动注册）；
//! - `event_prefix`：事件名前缀（约定字段，可为私有字段）；
//! - `call`：按方法名调用；
//! - `as_subscriber`：若对象实现了手动订阅，返回其 [`Subscriber`] 视图。
//!
//! 手写实现或使用 `ddd_event_macros::observer` 自动生成。
use crate::dispatcher::EventDispatcher;
use crate::error::EventResult;
use crate::payload::Params;
use serde_json::Value;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

pub trait EventObject: Send + Sync {
    /// 对象类型名（用于日志与错误信息）
    fn object_name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// 公开方法名，按稳定顺序返回
    fn methods(&self) -> &[&'static str] {
        &[]
    }

    /// 约定的事件名前缀
    fn event_prefix(&self) -> Option<&str> {
        None
    }

    /// 按方法名调用
    fn call(&self, method: &str, params: &Params) -> EventResult<Value>;

    fn as_subscriber(&self) -> Option<&dyn Subscriber> {
        None
    }
}

/// 手动订阅者：完全自行决定注册哪些监听器（不再走自动绑定）
pub trait Subscriber: Send + Sync {
    fn subscribe(&self, events: &EventDispatcher) -> EventResult<()>;
}

/// 对象引用：实例，或交由容器解析的标识
#[derive(Clone)]
pub enum ObjectRef {
    Instance(Arc<dyn EventObject>),
    Id(String),
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(obj) => write!(f, "Instance({})", obj.object_name()),
            Self::Id(id) => write!(f, "Id({id})"),
        }
    }
}

impl From<&str> for ObjectRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for ObjectRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<Arc<dyn EventObject>> for ObjectRef {
    fn from(obj: Arc<dyn EventObject>) -> Self {
        Self::Instance(obj)
    }
}

impl<T: EventObject + 'static> From<Arc<T>> for ObjectRef {
    fn from(obj: Arc<T>) -> Self {
        Self::Instance(obj)
    }
}
