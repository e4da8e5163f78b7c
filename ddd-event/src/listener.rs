//! 监听器句柄
//!
//! 每种调用形式对应一个变体，调度时只需对标签做一次 `match`：
//! - `Callable`：闭包，直接调用；
//! - `Method`：(接收者实例, 方法名)，调用 `receiver.method(params)`；
//! - `Static`：`Class::method` 形式，无需实例化即可调用；
//! - `Class`：处理器类名，调度时经容器解析为实例后调用其 `handle` 方法。
//!
//! 相等性用于触发前去重：闭包与接收者按引用同一性比较，字符串形式按值比较。
use crate::error::{EventError, EventResult};
use crate::object::EventObject;
use crate::payload::Params;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

pub type ListenerFn = dyn Fn(&Params) -> EventResult<Value> + Send + Sync;

#[derive(Clone)]
pub enum Listener {
    Callable(Arc<ListenerFn>),
    Method {
        receiver: Arc<dyn EventObject>,
        method: Cow<'static, str>,
    },
    Static(String),
    Class(String),
}

impl Listener {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&Params) -> EventResult<Value> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(f))
    }

    pub fn method(receiver: Arc<dyn EventObject>, method: impl Into<Cow<'static, str>>) -> Self {
        Self::Method {
            receiver,
            method: method.into(),
        }
    }

    /// 字符串形式：`::` 出现在首位之后视为静态方法引用，否则视为处理器类名
    pub fn parse(target: &str) -> Self {
        match target.find("::") {
            Some(pos) if pos > 0 => Self::Static(target.to_string()),
            _ => Self::Class(target.to_string()),
        }
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Callable(a), Self::Callable(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (
                Self::Method {
                    receiver: ra,
                    method: ma,
                },
                Self::Method {
                    receiver: rb,
                    method: mb,
                },
            ) => std::ptr::addr_eq(Arc::as_ptr(ra), Arc::as_ptr(rb)) && ma == mb,
            (Self::Static(a), Self::Static(b)) => a == b,
            (Self::Class(a), Self::Class(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(c) => write!(f, "Callable({:p})", Arc::as_ptr(c)),
            Self::Method { receiver, method } => {
                write!(f, "Method({}::{method})", receiver.object_name())
            }
            Self::Static(target) => write!(f, "Static({target})"),
            Self::Class(class) => write!(f, "Class({class})"),
        }
    }
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("closure"),
            Self::Method { receiver, method } => {
                write!(f, "{}::{method}", receiver.object_name())
            }
            Self::Static(target) => f.write_str(target),
            Self::Class(class) => f.write_str(class),
        }
    }
}

impl From<&str> for Listener {
    fn from(target: &str) -> Self {
        Self::parse(target)
    }
}

impl From<String> for Listener {
    fn from(target: String) -> Self {
        Self::parse(&target)
    }
}

/// 监听器方法返回值到统一结果的转换（`#[observer]` 生成的调用代码依赖它）
pub trait IntoListenerResult {
    fn into_listener_result(self) -> EventResult<Value>;
}

impl IntoListenerResult for Value {
    fn into_listener_result(self) -> EventResult<Value> {
        Ok(self)
    }
}

impl IntoListenerResult for () {
    fn into_listener_result(self) -> EventResult<Value> {
        Ok(Value::Null)
    }
}

impl IntoListenerResult for bool {
    fn into_listener_result(self) -> EventResult<Value> {
        Ok(Value::Bool(self))
    }
}

impl<T: IntoListenerResult> IntoListenerResult for Option<T> {
    fn into_listener_result(self) -> EventResult<Value> {
        match self {
            Some(v) => v.into_listener_result(),
            None => Ok(Value::Null),
        }
    }
}

impl<T, E> IntoListenerResult for Result<T, E>
where
    T: IntoListenerResult,
    E: Into<EventError>,
{
    fn into_listener_result(self) -> EventResult<Value> {
        match self {
            Ok(v) => v.into_listener_result(),
            Err(e) => Err(e.into()),
        }
    }
}

/// 按值相等去重，保留首次出现的位置
pub(crate) fn dedup(listeners: Vec<Listener>) -> Vec<(usize, Listener)> {
    let mut unique: Vec<(usize, Listener)> = Vec::with_capacity(listeners.len());
    for (pos, l) in listeners.into_iter().enumerate() {
        if !unique.iter().any(|(_, seen)| *seen == l) {
            unique.push((pos, l));
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl EventObject for Probe {
        fn call(&self, _method: &str, _params: &Params) -> EventResult<Value> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn parse_string_forms() {
        assert_eq!(
            Listener::from("app::listener::Audit::record"),
            Listener::Static("app::listener::Audit::record".into())
        );
        assert_eq!(Listener::from("AuditHandler"), Listener::Class("AuditHandler".into()));
        // 以 `::` 开头不算静态引用
        assert_eq!(Listener::from("::handle"), Listener::Class("::handle".into()));
    }

    #[test]
    fn callables_compare_by_identity() {
        let a = Listener::callable(|_| Ok(Value::Null));
        let b = Listener::callable(|_| Ok(Value::Null));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn methods_compare_by_receiver_and_name() {
        let r1: Arc<dyn EventObject> = Arc::new(Probe);
        let r2: Arc<dyn EventObject> = Arc::new(Probe);
        assert_eq!(
            Listener::method(r1.clone(), "onLogin"),
            Listener::method(r1.clone(), "onLogin")
        );
        assert_ne!(
            Listener::method(r1.clone(), "onLogin"),
            Listener::method(r1, "onLogout")
        );
        assert_ne!(
            Listener::method(Arc::clone(&r2), "onLogin"),
            Listener::method(Arc::new(Probe), "onLogin")
        );
    }

    #[test]
    fn listener_results_convert() {
        assert_eq!(().into_listener_result().unwrap(), Value::Null);
        assert_eq!(false.into_listener_result().unwrap(), Value::Bool(false));
        assert_eq!(None::<Value>.into_listener_result().unwrap(), Value::Null);
        let ok: anyhow::Result<bool> = Ok(true);
        assert_eq!(ok.into_listener_result().unwrap(), Value::Bool(true));
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("nope"));
        assert!(matches!(err.into_listener_result(), Err(EventError::Other(_))));
    }

    #[test]
    fn dedup_keeps_first_position() {
        let a = Listener::from("A");
        let b = Listener::from("B");
        let out = dedup(vec![a.clone(), b.clone(), a.clone(), Listener::from("C")]);
        let positions: Vec<usize> = out.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![0, 1, 3]);
        assert_eq!(out[0].1, a);
        assert_eq!(out[1].1, b);
    }
}
