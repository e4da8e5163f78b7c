//! 事件配置
//!
//! 应用初始化阶段一次性提供：
//! - `bind`：事件别名；
//! - `listen`：`事件 -> [监听器]`，监听器为字符串（`Class::method` 或处理器类名）；
//! - `subscribe`：订阅者标识，经容器解析。
//!
//! 典型来源是 JSON 配置文件：
//! ```rust
//! use ddd_event::EventConfig;
//!
//! let cfg = EventConfig::from_json(r#"{
//!     "bind": { "AppInit": "app.init" },
//!     "listen": { "app.init": ["app::listener::Boot"] },
//!     "subscribe": ["app::subscribe::User"]
//! }"#).unwrap();
//! assert_eq!(cfg.bind["AppInit"], "app.init");
//! ```
use crate::dispatcher::EventDispatcher;
use crate::error::EventResult;
use crate::listener::Listener;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Builder, Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    #[builder(default)]
    pub bind: BTreeMap<String, String>,
    #[builder(default)]
    pub listen: BTreeMap<String, Vec<String>>,
    #[builder(default)]
    pub subscribe: Vec<String>,
}

impl EventConfig {
    pub fn from_json(json: &str) -> EventResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.bind.is_empty() && self.listen.is_empty() && self.subscribe.is_empty()
    }
}

impl EventDispatcher {
    /// 按 别名 -> 监听器 -> 订阅者 的顺序应用配置
    pub fn configure(&self, config: &EventConfig) -> EventResult<&Self> {
        self.bind(config.bind.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.listen_events(
            config
                .listen
                .iter()
                .map(|(event, targets)| (event, targets.iter().map(|t| Listener::parse(t)))),
        );
        self.subscribe_all(config.subscribe.iter().map(String::as_str))?;

        debug!(
            aliases = config.bind.len(),
            events = config.listen.len(),
            subscribers = config.subscribe.len(),
            "event config applied"
        );
        Ok(self)
    }
}
