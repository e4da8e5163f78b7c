//! 订阅者注册
//!
//! 对象实现了 [`Subscriber`](crate::Subscriber) 时由其手动注册，否则按观察者自动绑定。
use crate::dispatcher::EventDispatcher;
use crate::error::EventResult;
use crate::object::ObjectRef;
use tracing::debug;

impl EventDispatcher {
    pub fn subscribe(&self, subscriber: impl Into<ObjectRef>) -> EventResult<&Self> {
        self.subscribe_all([subscriber.into()])
    }

    pub fn subscribe_all<I>(&self, subscribers: I) -> EventResult<&Self>
    where
        I: IntoIterator,
        I::Item: Into<ObjectRef>,
    {
        for subscriber in subscribers {
            let obj = self.instantiate(subscriber.into())?;

            if let Some(manual) = obj.as_subscriber() {
                debug!(subscriber = obj.object_name(), "manual subscribe");
                manual.subscribe(self)?;
                continue;
            }

            self.observe(obj, "")?;
        }
        Ok(self)
    }
}
