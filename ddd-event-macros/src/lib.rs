//! ddd-event 的过程宏
//!
//! - `#[observer]`：为固有 impl 块生成 `EventObject` 实现，替代运行时反射；
//! - `#[derive(EventPayload)]`：将结构体声明为可直接触发的事件负载。
//!
//! 生成代码通过 `::ddd_event` 路径引用运行时类型，使用方需同时依赖 `ddd-event`。
use proc_macro::TokenStream;

mod event_payload;
mod observer;
mod utils;

/// 观察者宏
///
/// ```ignore
/// struct UserObserver { event_prefix: String }
///
/// #[observer(prefix_field = event_prefix)]
/// impl UserObserver {
///     pub fn on_login(&self, params: &Params) -> EventResult<Value> { .. }
///     pub fn on_logout(&self) {}
/// }
/// ```
///
/// 生成的 `methods()` 按声明顺序列出所有可调用的公开方法（包括不以 `on` 开头的，
/// 例如处理器约定的 `handle`），由调度器按 `on` 前缀筛选注册。
#[proc_macro_attribute]
pub fn observer(attr: TokenStream, item: TokenStream) -> TokenStream {
    observer::expand(attr, item)
}

/// 事件负载派生宏，可选 `#[event_payload(name = "...")]` 覆写事件名
#[proc_macro_derive(EventPayload, attributes(event_payload))]
pub fn derive_event_payload(input: TokenStream) -> TokenStream {
    event_payload::expand(input)
}
