//! 监听器注册表
//!
//! 事件名 -> 有序监听器列表。键存在当且仅当该事件至少注册过一个监听器（且未被移除）。
//! 注册时不去重，去重发生在触发阶段。
//!
//! 读取时总是克隆出列表，调用方不会在持有分片锁的情况下执行监听器。
use crate::listener::Listener;
use dashmap::DashMap;

#[derive(Default)]
pub struct ListenerRegistry {
    by_event: DashMap<String, Vec<Listener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加监听器；`prepend` 为真时插入到列表最前
    pub fn push(&self, event: String, listener: Listener, prepend: bool) {
        let mut list = self.by_event.entry(event).or_default();
        if prepend {
            list.insert(0, listener);
        } else {
            list.push(listener);
        }
    }

    /// 按给定顺序批量追加，保留已有监听器；空批次不创建键
    pub fn extend<I>(&self, event: String, listeners: I)
    where
        I: IntoIterator<Item = Listener>,
    {
        let mut listeners = listeners.into_iter().peekable();
        if listeners.peek().is_none() {
            return;
        }
        self.by_event.entry(event).or_default().extend(listeners);
    }

    pub fn contains(&self, event: &str) -> bool {
        self.by_event.contains_key(event)
    }

    /// 删除整个条目（而非清空列表）
    pub fn remove(&self, event: &str) -> Option<Vec<Listener>> {
        self.by_event.remove(event).map(|(_, list)| list)
    }

    pub fn get(&self, event: &str) -> Option<Vec<Listener>> {
        self.by_event.get(event).map(|list| list.value().clone())
    }

    /// 已注册事件名（排序后的只读视图）
    pub fn events(&self) -> Vec<String> {
        let mut events: Vec<String> = self.by_event.iter().map(|e| e.key().clone()).collect();
        events.sort_unstable();
        events
    }
}
