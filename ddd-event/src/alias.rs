//! 事件别名表
//!
//! 将短标识映射为完整事件名。解析只做一跳查找，不做传递：
//! 即便调用方构造了循环（`a -> b`, `b -> a`），`resolve("a")` 也只返回 `b`。
use dashmap::DashMap;
use std::borrow::Cow;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct AliasTable {
    aliases: DashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并别名，同名键后者覆盖前者
    pub fn bind<I, K, V>(&self, aliases: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (alias, event) in aliases {
            self.aliases.insert(alias.into(), event.into());
        }
    }

    /// 有别名则返回目标事件名，否则原样返回
    pub fn resolve<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self.aliases.get(name) {
            Some(target) => Cow::Owned(target.value().clone()),
            None => Cow::Borrowed(name),
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.aliases
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
