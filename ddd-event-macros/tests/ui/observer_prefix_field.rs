use ddd_event::{EventDispatcher, EventObject, EventResult, Subscriber};
use ddd_event_macros::observer;

mod inner {
    use super::*;

    pub struct Order {
        event_prefix: String,
    }

    impl Order {
        pub fn new(prefix: &str) -> Self {
            Self {
                event_prefix: prefix.to_string(),
            }
        }
    }

    #[observer(prefix_field = event_prefix, subscriber)]
    impl Order {
        pub fn on_paid(&self) -> receipt::Receipt {
            receipt::Receipt
        }
    }

    impl Subscriber for Order {
        fn subscribe(&self, _events: &EventDispatcher) -> EventResult<()> {
            Ok(())
        }
    }

    pub mod receipt {
        pub struct Receipt;

        impl ddd_event::IntoListenerResult for Receipt {
            fn into_listener_result(self) -> ddd_event::EventResult<ddd_event::Value> {
                Ok(ddd_event::Value::from("paid"))
            }
        }
    }
}

fn main() {
    let order = inner::Order::new("order.");
    assert_eq!(order.event_prefix(), Some("order."));
    assert_eq!(order.methods(), &["on_paid"]);
    assert!(order.as_subscriber().is_some());
    assert_eq!(
        order.call("on_paid", &ddd_event::Params::none()).unwrap(),
        ddd_event::Value::from("paid")
    );
}
