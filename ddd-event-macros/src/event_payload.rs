use crate::utils::{AttrKv, expect_lit_str};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{DeriveInput, Result, Token, parse_macro_input};

/// #[derive(EventPayload)] 宏实现
/// - 默认事件名为运行时类型名（由 `EventPayload` 的默认方法给出）
/// - `#[event_payload(name = "user.login")]` 覆写事件名
pub(crate) fn expand(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let mut name: Option<syn::LitStr> = None;
    for attr in input.attrs.iter() {
        if !attr.path().is_ident("event_payload") {
            continue;
        }
        match parse_payload_attr(attr) {
            Ok(lit) => {
                if name.is_some() {
                    return syn::Error::new(attr.span(), "duplicate #[event_payload(name = ...)]")
                        .to_compile_error()
                        .into();
                }
                name = Some(lit);
            }
            Err(err) => return err.to_compile_error().into(),
        }
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match name {
        Some(lit) => quote! {
            fn event_name(&self) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed(#lit)
            }
        },
        None => quote! {},
    };

    let out = quote! {
        impl #impl_generics ::ddd_event::EventPayload for #ident #ty_generics #where_clause {
            #body
        }
    };

    TokenStream::from(out)
}

fn parse_payload_attr(attr: &syn::Attribute) -> Result<syn::LitStr> {
    let pairs: Punctuated<AttrKv, Token![,]> =
        attr.parse_args_with(Punctuated::<AttrKv, Token![,]>::parse_terminated)?;

    let mut name: Option<syn::LitStr> = None;
    for kv in pairs {
        match kv.key.to_string().as_str() {
            "name" => {
                if name.is_some() {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "duplicate key 'name' in attribute",
                    ));
                }
                name = Some(expect_lit_str(kv.value, "name")?);
            }
            _ => {
                return Err(syn::Error::new(kv.key.span(), "unknown key; expected 'name'"));
            }
        }
    }

    name.ok_or_else(|| syn::Error::new(attr.span(), "expected #[event_payload(name = \"...\")]"))
}
