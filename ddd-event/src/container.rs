//! 外部协作者：容器（Resolver）与调用器（Invoker）
//!
//! 调度器不关心实例如何构造、方法如何调用，只通过这两个接口委托；
//! 任何失败都原样返回。`InMemoryContainer` 是一个基于内存表的默认实现，
//! 适用于测试、示例与无需依赖注入框架的场景。
//!
use crate::error::{EventError, EventResult};
use crate::listener::ListenerFn;
use crate::object::EventObject;
use crate::payload::Params;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// 将标识解析为实例
pub trait Resolver: Send + Sync {
    fn make(&self, id: &str) -> EventResult<Arc<dyn EventObject>>;
}

/// 执行一次调用
pub trait Invoker: Send + Sync {
    fn invoke(&self, call: CallForm<'_>, params: &Params) -> EventResult<Value>;
}

/// 调度器为每个监听器构造的调用形式
pub enum CallForm<'a> {
    Callable(&'a ListenerFn),
    Method {
        receiver: Arc<dyn EventObject>,
        method: &'a str,
    },
    Static(&'a str),
}

type Factory = Arc<dyn Fn() -> EventResult<Arc<dyn EventObject>> + Send + Sync>;

#[derive(Clone)]
enum Binding {
    Factory(Factory),
    Shared(Arc<dyn EventObject>),
}

/// 基于内存的容器实现
/// - `bind`：每次解析调用工厂创建新实例；
/// - `instance`：注册共享实例，每次解析返回同一对象；
/// - `bind_static`：注册 `Class::method` 形式的静态调用目标。
#[derive(Default)]
pub struct InMemoryContainer {
    bindings: DashMap<String, Binding>,
    statics: DashMap<String, Arc<ListenerFn>>,
}

impl InMemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind<F>(&self, id: impl Into<String>, factory: F) -> &Self
    where
        F: Fn() -> EventResult<Arc<dyn EventObject>> + Send + Sync + 'static,
    {
        self.bindings
            .insert(id.into(), Binding::Factory(Arc::new(factory)));
        self
    }

    pub fn instance(&self, id: impl Into<String>, obj: Arc<dyn EventObject>) -> &Self {
        self.bindings.insert(id.into(), Binding::Shared(obj));
        self
    }

    pub fn bind_static<F>(&self, target: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&Params) -> EventResult<Value> + Send + Sync + 'static,
    {
        self.statics.insert(target.into(), Arc::new(f));
        self
    }
}

impl Resolver for InMemoryContainer {
    fn make(&self, id: &str) -> EventResult<Arc<dyn EventObject>> {
        // 先克隆出绑定再调用工厂，避免持有分片锁时重入容器
        let Some(binding) = self.bindings.get(id).map(|b| b.value().clone()) else {
            return Err(EventError::resolution(id, "not bound"));
        };

        match binding {
            Binding::Factory(factory) => factory(),
            Binding::Shared(obj) => Ok(obj),
        }
    }
}

impl Invoker for InMemoryContainer {
    fn invoke(&self, call: CallForm<'_>, params: &Params) -> EventResult<Value> {
        match call {
            CallForm::Callable(f) => f(params),
            CallForm::Method { receiver, method } => receiver.call(method, params),
            CallForm::Static(target) => {
                let Some(f) = self.statics.get(target).map(|f| f.clone()) else {
                    return Err(EventError::StaticNotFound {
                        target: target.to_string(),
                    });
                };
                f(params)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter;

    impl EventObject for Counter {
        fn call(&self, method: &str, _params: &Params) -> EventResult<Value> {
            match method {
                "handle" => Ok(Value::from("handled")),
                other => Err(EventError::method_not_found(self.object_name(), other)),
            }
        }
    }

    #[test]
    fn factory_creates_fresh_instances() {
        let built = Arc::new(AtomicUsize::new(0));
        let c = InMemoryContainer::new();
        {
            let built = built.clone();
            c.bind("Counter", move || {
                built.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(Counter) as Arc<dyn EventObject>)
            });
        }
        let a = c.make("Counter").unwrap();
        let b = c.make("Counter").unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert!(!std::ptr::addr_eq(Arc::as_ptr(&a), Arc::as_ptr(&b)));
    }

    #[test]
    fn shared_instance_is_reused() {
        let c = InMemoryContainer::new();
        c.instance("Counter", Arc::new(Counter));
        let a = c.make("Counter").unwrap();
        let b = c.make("Counter").unwrap();
        assert!(std::ptr::addr_eq(Arc::as_ptr(&a), Arc::as_ptr(&b)));
    }

    #[test]
    fn unbound_id_fails_with_resolution_error() {
        let c = InMemoryContainer::new();
        match c.make("Missing") {
            Err(EventError::Resolution { id, .. }) => assert_eq!(id, "Missing"),
            other => panic!("unexpected: {:?}", other.map(|o| o.object_name())),
        }
    }

    #[test]
    fn invoke_each_call_form() {
        let c = InMemoryContainer::new();
        c.bind_static("Audit::record", |_| Ok(Value::from(7)));

        let f: Arc<ListenerFn> = Arc::new(|_: &Params| Ok(Value::from(1)));
        let p = Params::none();
        assert_eq!(c.invoke(CallForm::Callable(&*f), &p).unwrap(), Value::from(1));
        assert_eq!(
            c.invoke(
                CallForm::Method {
                    receiver: Arc::new(Counter),
                    method: "handle"
                },
                &p
            )
            .unwrap(),
            Value::from("handled")
        );
        assert_eq!(c.invoke(CallForm::Static("Audit::record"), &p).unwrap(), Value::from(7));
        assert!(matches!(
            c.invoke(CallForm::Static("Audit::missing"), &p),
            Err(EventError::StaticNotFound { .. })
        ));
    }
}
