use ddd_event::{EventObject, EventResult, Params, Value};
use ddd_event_macros::observer;

struct UserObserver;

#[observer(prefix = "user.")]
impl UserObserver {
    pub fn on_login(&self, params: &Params) -> EventResult<Value> {
        Ok(Value::from(params.get::<&str>().copied().unwrap_or("anonymous")))
    }

    pub fn on_logout(&self) {}

    pub fn handle(&self, _params: &Params) -> bool {
        false
    }

    fn on_private(&self) {}

    pub fn on_mutable(&mut self) {}

    pub fn build() -> Self {
        Self
    }
}

fn main() {
    let obs = UserObserver::build();
    obs.on_private();
    assert_eq!(obs.methods(), &["on_login", "on_logout", "handle"]);
    assert_eq!(obs.event_prefix(), Some("user."));
    assert_eq!(
        obs.call("on_login", &Params::new("alice")).unwrap(),
        Value::from("alice")
    );
    assert_eq!(obs.call("on_logout", &Params::none()).unwrap(), Value::Null);
    assert_eq!(obs.call("handle", &Params::none()).unwrap(), Value::Bool(false));
    assert!(obs.call("on_mutable", &Params::none()).is_err());
    assert!(obs.as_subscriber().is_none());
}
