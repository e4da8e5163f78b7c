//! 事件调度器（EventDispatcher）
//!
//! 持有别名表与监听器注册表，对外提供注册与触发入口：
//! - 注册：`bind` / `listen` / `listen_first` / `listen_events` / `remove`；
//! - 自动绑定：`observe`（观察者）与 `subscribe`（订阅者），见同名模块；
//! - 触发：`trigger` / `until` / `fire`。
//!
//! 触发流程：
//! 1. 负载对象触发时，事件名取自负载，负载本身作为参数（覆盖显式参数）；
//! 2. 经别名表解析（单跳）；
//! 3. 无直接监听器且事件名不含命名空间时，返回 [`Outcome::NoListener`]；
//! 4. 先取直接监听器，再追加 `<prefix>.*` 通配监听器（仅按第一个 `.` 切分）；
//! 5. 按值去重，保留首次出现的位置；
//! 6. 依次调用，遇到 `false` 或（`until` 模式下）非空结果即停止。
//!
//! 调度器本身在两次触发之间无状态；容器与调用器的错误原样返回，
//! 已执行的监听器不会回滚。
//!
use crate::alias::AliasTable;
use crate::container::{CallForm, Invoker, Resolver};
use crate::error::EventResult;
use crate::listener::{Listener, dedup};
use crate::outcome::Outcome;
use crate::payload::{Event, Params};
use crate::registry::ListenerRegistry;
use bon::Builder;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

// 导入由 bon::Builder 生成的 typestate 模块与状态转换别名
use self::event_dispatcher_builder::{IsUnset, SetInvoker, SetResolver, State as BuilderState};

/// 通配监听器的后缀
pub const WILDCARD: &str = "*";

/// 处理器类被解析为实例后调用的约定方法
pub const HANDLE_METHOD: &str = "handle";

#[derive(Builder)]
pub struct EventDispatcher {
    resolver: Arc<dyn Resolver>,
    invoker: Arc<dyn Invoker>,
    #[builder(skip)]
    aliases: AliasTable,
    #[builder(skip)]
    registry: ListenerRegistry,
}

impl<S: BuilderState> EventDispatcherBuilder<S> {
    /// 同一个容器同时充当解析器与调用器
    pub fn container<C>(self, container: Arc<C>) -> EventDispatcherBuilder<SetInvoker<SetResolver<S>>>
    where
        C: Resolver + Invoker + 'static,
        <S as BuilderState>::Resolver: IsUnset,
        <S as BuilderState>::Invoker: IsUnset,
    {
        let resolver: Arc<dyn Resolver> = container.clone();
        let invoker: Arc<dyn Invoker> = container;
        self.resolver(resolver).invoker(invoker)
    }
}

impl EventDispatcher {
    pub fn new<C>(container: Arc<C>) -> Self
    where
        C: Resolver + Invoker + 'static,
    {
        Self::builder().container(container).build()
    }

    pub(crate) fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.resolver
    }

    // ---- 别名 ----

    /// 合并事件别名，同名键后者覆盖前者
    pub fn bind<I, K, V>(&self, aliases: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.aliases.bind(aliases);
        self
    }

    /// 单跳别名解析
    pub fn resolve_alias(&self, event: &str) -> String {
        self.aliases.resolve(event).into_owned()
    }

    pub fn aliases(&self) -> BTreeMap<String, String> {
        self.aliases.snapshot()
    }

    // ---- 注册 ----

    /// 追加监听器
    pub fn listen(&self, event: &str, listener: impl Into<Listener>) -> &Self {
        self.register(event, listener.into(), false)
    }

    /// 优先执行：已有监听器时插入到最前
    pub fn listen_first(&self, event: &str, listener: impl Into<Listener>) -> &Self {
        self.register(event, listener.into(), true)
    }

    fn register(&self, event: &str, listener: Listener, prepend: bool) -> &Self {
        let event = self.resolve_alias(event);
        trace!(event = %event, listener = %listener, prepend, "listen");
        self.registry.push(event, listener, prepend);
        self
    }

    /// 批量注册：`事件 -> [监听器]`，按给定顺序追加
    pub fn listen_events<I, K, L>(&self, events: I) -> &Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: AsRef<str>,
        L: IntoIterator,
        L::Item: Into<Listener>,
    {
        for (event, listeners) in events {
            let event = self.resolve_alias(event.as_ref());
            trace!(event = %event, "listen batch");
            self.registry
                .extend(event, listeners.into_iter().map(Into::into));
        }
        self
    }

    pub fn has_listener(&self, event: &str) -> bool {
        self.registry.contains(&self.resolve_alias(event))
    }

    /// 移除事件的全部监听器（删除条目本身）
    pub fn remove(&self, event: &str) {
        let event = self.resolve_alias(event);
        if self.registry.remove(&event).is_some() {
            trace!(event = %event, "listeners removed");
        }
    }

    /// 某事件已注册的监听器（只读副本，不含通配监听器）
    pub fn listeners(&self, event: &str) -> Vec<Listener> {
        self.registry
            .get(&self.resolve_alias(event))
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<String> {
        self.registry.events()
    }

    // ---- 触发 ----

    /// 触发事件，收集每个被调用监听器的结果
    pub fn trigger(&self, event: impl Into<Event>, params: Params) -> EventResult<Outcome> {
        self.fire(event, params, false)
    }

    /// 触发事件，只取第一个非空结果
    pub fn until(&self, event: impl Into<Event>, params: Params) -> EventResult<Outcome> {
        self.fire(event, params, true)
    }

    /// 通用触发入口；`once` 为真时等价于 [`until`](Self::until)
    pub fn fire(&self, event: impl Into<Event>, params: Params, once: bool) -> EventResult<Outcome> {
        let (name, params) = event.into().into_parts(params);
        let name = self.resolve_alias(&name);

        let direct = self.registry.get(&name);
        let namespace = split_namespace(&name);
        if direct.is_none() && namespace.is_none() {
            trace!(event = %name, "no listener");
            return Ok(Outcome::NoListener);
        }

        let mut listeners = direct.unwrap_or_default();
        if let Some((prefix, _)) = namespace {
            if let Some(wildcard) = self.registry.get(&format!("{prefix}.{WILDCARD}")) {
                listeners.extend(wildcard);
            }
        }
        let listeners = dedup(listeners);

        debug!(event = %name, listeners = listeners.len(), once, "dispatching event");

        let mut results = BTreeMap::new();
        let mut last = Value::Null;
        for (pos, listener) in listeners {
            let result = self.dispatch(&listener, &params)?;
            let stop = result == Value::Bool(false) || (once && !result.is_null());

            if once {
                last = result;
            } else {
                results.insert(pos, result);
            }

            if stop {
                debug!(event = %name, position = pos, listener = %listener, "dispatch stopped");
                break;
            }
        }

        Ok(if once {
            Outcome::Single(last)
        } else {
            Outcome::Collected(results)
        })
    }

    /// 构造调用形式并交给调用器执行
    fn dispatch(&self, listener: &Listener, params: &Params) -> EventResult<Value> {
        let call = match listener {
            Listener::Callable(f) => CallForm::Callable(&**f),
            Listener::Method { receiver, method } => CallForm::Method {
                receiver: receiver.clone(),
                method: method.as_ref(),
            },
            Listener::Static(target) => CallForm::Static(target),
            Listener::Class(class) => CallForm::Method {
                receiver: self.resolver.make(class)?,
                method: HANDLE_METHOD,
            },
        };
        self.invoker.invoke(call, params)
    }
}

/// 按第一个 `.` 切分为 (前缀, 后缀)；位于首位的 `.` 不构成命名空间
pub(crate) fn split_namespace(name: &str) -> Option<(&str, &str)> {
    match name.find('.') {
        Some(pos) if pos > 0 => Some((&name[..pos], &name[pos + 1..])),
        _ => None,
    }
}
