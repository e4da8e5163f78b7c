//! 观察者自动绑定
//!
//! 对象的每个以 `on` 开头的公开方法注册为 `<prefix><suffix>` 事件的监听器：
//! - `onLogin` -> `Login`（去掉 `on`，其余大小写保持不变）；
//! - `on_login` / `on_password_reset` -> `Login` / `PasswordReset`（蛇形命名转为驼峰）。
//!
//! 前缀优先使用显式参数；为空时读取对象的 `event_prefix`。
//! 注册顺序与 `EventObject::methods` 的返回顺序一致。
use crate::dispatcher::EventDispatcher;
use crate::error::EventResult;
use crate::listener::Listener;
use crate::object::{EventObject, ObjectRef};
use std::sync::Arc;
use tracing::debug;

/// 事件方法前缀
pub const METHOD_PREFIX: &str = "on";

impl EventDispatcher {
    /// 自动注册观察者；`observer` 为标识时先经容器解析
    pub fn observe(&self, observer: impl Into<ObjectRef>, prefix: &str) -> EventResult<&Self> {
        let observer = self.instantiate(observer.into())?;

        let prefix = match prefix {
            "" => observer.event_prefix().unwrap_or_default().to_string(),
            explicit => explicit.to_string(),
        };

        let mut bound = 0usize;
        for method in observer.methods() {
            if let Some(suffix) = event_suffix(method) {
                self.listen(
                    &format!("{prefix}{suffix}"),
                    Listener::method(observer.clone(), *method),
                );
                bound += 1;
            }
        }

        debug!(observer = observer.object_name(), prefix = %prefix, bound, "observer bound");
        Ok(self)
    }

    pub(crate) fn instantiate(&self, target: ObjectRef) -> EventResult<Arc<dyn EventObject>> {
        match target {
            ObjectRef::Instance(obj) => Ok(obj),
            ObjectRef::Id(id) => self.resolver().make(&id),
        }
    }
}

/// 由方法名推导事件后缀；不以 `on` 开头时返回 `None`
pub fn event_suffix(method: &str) -> Option<String> {
    let rest = method.strip_prefix(METHOD_PREFIX)?;
    let Some(snake) = rest.strip_prefix('_') else {
        return Some(rest.to_string());
    };

    Some(
        snake
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::InMemoryContainer;
    use crate::error::EventError;
    use crate::payload::Params;
    use serde_json::Value;

    #[test]
    fn suffix_derivation() {
        assert_eq!(event_suffix("onLogin").as_deref(), Some("Login"));
        assert_eq!(event_suffix("onlogin").as_deref(), Some("login"));
        assert_eq!(event_suffix("on_login").as_deref(), Some("Login"));
        assert_eq!(event_suffix("on_password_reset").as_deref(), Some("PasswordReset"));
        assert_eq!(event_suffix("handle"), None);
        assert_eq!(event_suffix("subscribe"), None);
    }

    struct User {
        prefix: String,
    }

    impl EventObject for User {
        fn methods(&self) -> &[&'static str] {
            &["onLogin", "onLogout", "handle"]
        }

        fn event_prefix(&self) -> Option<&str> {
            Some(&self.prefix)
        }

        fn call(&self, method: &str, _params: &Params) -> EventResult<Value> {
            Ok(Value::from(method))
        }
    }

    fn user() -> Arc<User> {
        Arc::new(User {
            prefix: "user.".into(),
        })
    }

    #[test]
    fn binds_on_methods_with_instance_prefix() {
        let d = EventDispatcher::new(Arc::new(InMemoryContainer::new()));
        d.observe(user(), "").unwrap();

        assert_eq!(d.events(), ["user.Login", "user.Logout"]);
        let out = d.trigger("user.Logout", Params::none()).unwrap();
        assert_eq!(out.results().unwrap()[&0], Value::from("onLogout"));
    }

    #[test]
    fn explicit_prefix_wins() {
        let d = EventDispatcher::new(Arc::new(InMemoryContainer::new()));
        d.observe(user(), "member.").unwrap();
        assert_eq!(d.events(), ["member.Login", "member.Logout"]);
    }

    #[test]
    fn observer_resolved_from_container() {
        let c = Arc::new(InMemoryContainer::new());
        c.instance("app::subscribe::User", user());
        let d = EventDispatcher::new(c);

        d.observe("app::subscribe::User", "").unwrap();
        assert!(d.has_listener("user.Login"));
        assert!(matches!(
            d.observe("app::subscribe::Missing", ""),
            Err(EventError::Resolution { .. })
        ));
    }

    /// 驼峰与蛇形两种写法映射到同一事件，按 `methods()` 顺序依次注册
    struct Mixed;

    impl EventObject for Mixed {
        fn methods(&self) -> &[&'static str] {
            &["on_login", "onLogout", "onLogin"]
        }

        fn event_prefix(&self) -> Option<&str> {
            Some("user.")
        }

        fn call(&self, method: &str, _params: &Params) -> EventResult<Value> {
            Ok(Value::from(method))
        }
    }

    #[test]
    fn camel_and_snake_forms_share_one_event() {
        assert_eq!(event_suffix("onLogin"), event_suffix("on_login"));

        let d = EventDispatcher::new(Arc::new(InMemoryContainer::new()));
        let m: Arc<dyn EventObject> = Arc::new(Mixed);
        d.observe(m.clone(), "").unwrap();

        assert_eq!(d.events(), ["user.Login", "user.Logout"]);
        assert_eq!(
            d.listeners("user.Login"),
            [Listener::method(m.clone(), "on_login"), Listener::method(m, "onLogin")]
        );

        // 方法名不同，不会被去重，两者都被调用
        let out = d.trigger("user.Login", Params::none()).unwrap();
        let results = out.results().unwrap();
        assert_eq!(results[&0], Value::from("on_login"));
        assert_eq!(results[&1], Value::from("onLogin"));
    }

    #[test]
    fn registration_order_follows_methods_order() {
        let d = EventDispatcher::new(Arc::new(InMemoryContainer::new()));
        d.listen("user.Login", Listener::from("EarlierHandler"));
        d.observe(Arc::new(Mixed), "").unwrap();

        let names: Vec<String> = d.listeners("user.Login").iter().map(|l| l.to_string()).collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], "EarlierHandler");
        assert!(names[1].ends_with("::on_login"));
        assert!(names[2].ends_with("::onLogin"));
    }

    #[test]
    fn observing_twice_is_deduplicated_at_dispatch() {
        let d = EventDispatcher::new(Arc::new(InMemoryContainer::new()));
        let u = user();
        d.observe(u.clone(), "").unwrap();
        d.observe(u, "").unwrap();

        assert_eq!(d.listeners("user.Login").len(), 2);
        let out = d.trigger("user.Login", Params::none()).unwrap();
        assert_eq!(out.results().unwrap().len(), 1);
    }
}
