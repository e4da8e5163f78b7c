use ddd_event::{Event, EventPayload};
use ddd_event_macros::EventPayload;

#[derive(EventPayload)]
struct UserLogin {
    #[allow(dead_code)]
    user: String,
}

#[derive(EventPayload)]
#[event_payload(name = "order.paid")]
struct OrderPaid;

#[derive(EventPayload)]
struct Wrapped<T: Send + Sync + 'static> {
    #[allow(dead_code)]
    inner: T,
}

fn main() {
    let login = UserLogin { user: "alice".into() };
    assert!(login.event_name().ends_with("UserLogin"));
    assert_eq!(OrderPaid.event_name(), "order.paid");
    assert_eq!(Event::payload(OrderPaid).name(), "order.paid");
    assert!(Wrapped { inner: 1_u8 }.event_name().contains("Wrapped<u8>"));
}
