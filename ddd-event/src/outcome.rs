use serde_json::Value;
use std::collections::BTreeMap;

/// 一次触发的结果
///
/// - `NoListener`：既无直接监听器、事件名也不含命名空间，与监听器返回的 `false` 区分；
/// - `Collected`：普通触发，位置 -> 结果，仅包含实际被调用的监听器；
/// - `Single`：`until` 模式，停止点上最后产生的结果（全部为空时为 `Value::Null`）。
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    NoListener,
    Collected(BTreeMap<usize, Value>),
    Single(Value),
}

impl Outcome {
    pub fn is_no_listener(&self) -> bool {
        matches!(self, Self::NoListener)
    }

    pub fn results(&self) -> Option<&BTreeMap<usize, Value>> {
        match self {
            Self::Collected(results) => Some(results),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }
}
