//! 进程内事件调度（ddd-event）
//!
//! 组件按事件名登记兴趣（直接注册、经别名、或由观察者对象自动绑定），
//! 生产方按事件名或结构化负载触发事件：
//! - 别名表（`alias`）：短标识 -> 完整事件名，单跳解析；
//! - 注册表（`registry`）：事件名 -> 有序监听器列表；
//! - 观察者（`observer`）与订阅者（`subscriber`）：按 `on` 前缀约定自动注册或手动注册；
//! - 调度器（`dispatcher`）：`trigger`/`until`，支持 `<prefix>.*` 通配、去重与短路。
//!
//! 实例解析与方法调用委托给外部容器（`container::Resolver` / `container::Invoker`），
//! `InMemoryContainer` 为默认的内存实现。
//!
//! 典型用法：
//! ```rust
//! use ddd_event::{EventDispatcher, InMemoryContainer, Listener, Outcome, Params, Value};
//! use std::sync::Arc;
//!
//! let events = EventDispatcher::new(Arc::new(InMemoryContainer::new()));
//! events.listen("user.login", Listener::callable(|_| Ok(Value::from("audit"))));
//! events.listen("user.*", Listener::callable(|_| Ok(Value::from("metrics"))));
//!
//! let out = events.trigger("user.login", Params::none()).unwrap();
//! assert_eq!(out.results().map(|r| r.len()), Some(2));
//! assert_eq!(events.trigger("nobody", Params::none()).unwrap(), Outcome::NoListener);
//! ```
//!
//! 注册与触发均只需 `&self`，调度器可在线程间共享；执行监听器时不持有任何锁。
//!
pub mod alias;
pub mod config;
pub mod container;
pub mod dispatcher;
pub mod error;
pub mod listener;
pub mod object;
pub mod observer;
pub mod outcome;
pub mod payload;
pub mod registry;
pub mod subscriber;

pub use config::EventConfig;
pub use container::{CallForm, InMemoryContainer, Invoker, Resolver};
pub use dispatcher::EventDispatcher;
pub use error::{EventError, EventResult};
pub use listener::{IntoListenerResult, Listener, ListenerFn};
pub use object::{EventObject, ObjectRef, Subscriber};
pub use outcome::Outcome;
pub use payload::{Event, EventPayload, Params};
pub use serde_json::Value;

// 允许在本 crate 内部通过 ::ddd_event 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::ddd_event 路径。
extern crate self as ddd_event;
