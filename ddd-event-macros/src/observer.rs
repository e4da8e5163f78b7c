use crate::utils::{compile_error, expect_ident, expect_lit_str};
use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    FnArg, ImplItem, Item, Result, Token, Visibility, parse::Parse, parse::ParseStream,
    parse_macro_input,
};

/// #[observer] 宏实现
/// - 仅支持固有 impl 块：`impl Type { ... }`
/// - 收集可统一调用的公开方法：`pub fn m(&self)` 或 `pub fn m(&self, params: &Params)`，
///   按声明顺序生成 `EventObject::methods` 与 `EventObject::call`
/// - 返回值经 `IntoListenerResult` 转换（`()`、`bool`、`Value`、`Option<_>`、`Result<_, E>`）
/// - 参数：`prefix = "user."` 固定前缀；`prefix_field = field` 读取字段（可为私有字段）；
///   `subscriber` 表示类型实现了 `Subscriber`，订阅时走手动注册
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ObserverAttrConfig);
    let input = parse_macro_input!(item as Item);

    let item_impl = match input {
        Item::Impl(i) if i.trait_.is_none() => i,
        other => {
            return compile_error(
                other.span(),
                "#[observer] can only be used on inherent impl blocks",
            );
        }
    };

    let mut names: Vec<syn::LitStr> = Vec::new();
    let mut arms = Vec::new();

    for it in &item_impl.items {
        let ImplItem::Fn(f) = it else { continue };
        if !matches!(f.vis, Visibility::Public(_)) {
            continue;
        }

        let sig = &f.sig;
        // 仅 `&self` 接收者、非泛型、非 async 的方法可被统一调用
        let Some(FnArg::Receiver(recv)) = sig.inputs.first() else {
            continue;
        };
        if recv.reference.is_none() || recv.mutability.is_some() {
            continue;
        }
        if !sig.generics.params.is_empty() || sig.asyncness.is_some() {
            continue;
        }

        let ident = &sig.ident;
        let call = match sig.inputs.len() {
            1 => quote! { self.#ident() },
            2 => quote! { self.#ident(params) },
            _ => continue,
        };

        let lit = syn::LitStr::new(&ident.unraw().to_string(), ident.span());
        arms.push(quote! {
            #lit => ::ddd_event::IntoListenerResult::into_listener_result(#call)
        });
        names.push(lit);
    }

    let self_ty = &item_impl.self_ty;
    let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();

    let prefix_fn = match &cfg.prefix {
        Some(Prefix::Literal(lit)) => quote! {
            fn event_prefix(&self) -> ::std::option::Option<&str> {
                ::std::option::Option::Some(#lit)
            }
        },
        Some(Prefix::Field(field)) => quote! {
            fn event_prefix(&self) -> ::std::option::Option<&str> {
                ::std::option::Option::Some(::std::convert::AsRef::<str>::as_ref(&self.#field))
            }
        },
        None => quote! {},
    };

    let subscriber_fn = if cfg.subscriber {
        quote! {
            fn as_subscriber(&self) -> ::std::option::Option<&dyn ::ddd_event::Subscriber> {
                ::std::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    let out = quote! {
        #item_impl

        impl #impl_generics ::ddd_event::EventObject for #self_ty #where_clause {
            fn methods(&self) -> &[&'static str] {
                &[ #( #names ),* ]
            }

            #prefix_fn

            fn call(
                &self,
                method: &str,
                params: &::ddd_event::Params,
            ) -> ::ddd_event::EventResult<::ddd_event::Value> {
                let _ = params;
                match method {
                    #( #arms, )*
                    other => ::std::result::Result::Err(::ddd_event::EventError::method_not_found(
                        ::ddd_event::EventObject::object_name(self),
                        other,
                    )),
                }
            }

            #subscriber_fn
        }
    };

    TokenStream::from(out)
}

// -------- parsing --------

enum Prefix {
    Literal(syn::LitStr),
    Field(syn::Ident),
}

struct ObserverAttrConfig {
    prefix: Option<Prefix>,
    subscriber: bool,
}

impl Parse for ObserverAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut prefix: Option<Prefix> = None;
        let mut subscriber = false;

        if input.is_empty() {
            return Ok(Self { prefix, subscriber });
        }

        let elems: Punctuated<ObserverAttrElem, Token![,]> = Punctuated::parse_terminated(input)?;

        for elem in elems {
            match elem {
                ObserverAttrElem::Prefix(span, p) => {
                    if prefix.is_some() {
                        return Err(syn::Error::new(
                            span,
                            "duplicate prefix; use either 'prefix' or 'prefix_field' once",
                        ));
                    }
                    prefix = Some(p);
                }
                ObserverAttrElem::Subscriber(span) => {
                    if subscriber {
                        return Err(syn::Error::new(span, "duplicate key 'subscriber' in attribute"));
                    }
                    subscriber = true;
                }
            }
        }

        Ok(Self { prefix, subscriber })
    }
}

enum ObserverAttrElem {
    Prefix(proc_macro2::Span, Prefix),
    Subscriber(proc_macro2::Span),
}

impl Parse for ObserverAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let span = key.span();

        if key == "subscriber" {
            return Ok(Self::Subscriber(span));
        }

        let _eq: Token![=] = input.parse()?;
        let value: syn::Expr = input.parse()?;
        match key.to_string().as_str() {
            "prefix" => Ok(Self::Prefix(
                span,
                Prefix::Literal(expect_lit_str(value, "prefix")?),
            )),
            "prefix_field" => Ok(Self::Prefix(
                span,
                Prefix::Field(expect_ident(value, "prefix_field")?),
            )),
            _ => Err(syn::Error::new(
                span,
                "unknown key; expected 'prefix' | 'prefix_field' | 'subscriber'",
            )),
        }
    }
}
