//! 事件调度器演示：配置加载、观察者、订阅者与负载对象触发
//!
//! 运行：`RUST_LOG=ddd_event=trace cargo run -p ddd-event --example event_dispatcher`
use ddd_event::{
    Event, EventConfig, EventDispatcher, EventObject, EventResult, InMemoryContainer, Listener,
    Params, Subscriber, Value,
};
use ddd_event_macros::{EventPayload, observer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, EventPayload)]
#[event_payload(name = "user.Login")]
struct UserLoggedIn {
    user_id: u64,
}

/// 观察者：`on_login` / `on_logout` 自动绑定到 `user.Login` / `user.Logout`
struct UserObserver;

#[observer(prefix = "user.")]
impl UserObserver {
    pub fn on_login(&self, params: &Params) -> Value {
        match params.get::<UserLoggedIn>() {
            Some(e) => Value::from(format!("welcome #{}", e.user_id)),
            None => Value::Null,
        }
    }

    pub fn on_logout(&self) -> bool {
        true
    }
}

/// 订阅者：手动注册 `user.*` 通配监听器
struct AuditSubscriber;

#[observer(subscriber)]
impl AuditSubscriber {}

impl Subscriber for AuditSubscriber {
    fn subscribe(&self, events: &EventDispatcher) -> EventResult<()> {
        events.listen(
            "user.*",
            Listener::callable(|_| {
                tracing::info!("audit trail recorded");
                Ok(Value::Null)
            }),
        );
        Ok(())
    }
}

/// 处理器类：经容器解析后调用 `handle`
struct CacheWarmer;

#[observer]
impl CacheWarmer {
    pub fn handle(&self) -> Value {
        Value::from("cache warmed")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let container = Arc::new(InMemoryContainer::new());
    container
        .bind("CacheWarmer", || {
            Ok(Arc::new(CacheWarmer) as Arc<dyn EventObject>)
        })
        .instance("app::subscribe::Audit", Arc::new(AuditSubscriber))
        .bind_static("app::listener::Boot::run", |_| Ok(Value::from("booted")));

    let events = EventDispatcher::new(container);

    let config = EventConfig::from_json(
        r#"{
            "bind": { "AppInit": "app.init" },
            "listen": {
                "AppInit": ["app::listener::Boot::run", "CacheWarmer"]
            },
            "subscribe": ["app::subscribe::Audit"]
        }"#,
    )?;
    events.configure(&config)?;
    events.observe(Arc::new(UserObserver), "")?;

    let init = events.trigger("AppInit", Params::none())?;
    tracing::info!(?init, "application initialised");

    let login = events.trigger(Event::payload(UserLoggedIn { user_id: 42 }), Params::none())?;
    tracing::info!(?login, "user logged in");

    let first = events.until("user.Logout", Params::none())?;
    tracing::info!(?first, "first non-null logout result");

    tracing::info!(events = ?events.events(), aliases = ?events.aliases(), "registry snapshot");
    Ok(())
}
