use proc_macro::TokenStream;
use syn::spanned::Spanned;
use syn::{Expr, Ident, Result, Token, parse::Parse, parse::ParseStream};

// 统一生成编译错误
pub(crate) fn compile_error(span: proc_macro2::Span, msg: &str) -> TokenStream {
    syn::Error::new(span, msg).to_compile_error().into()
}

/// 属性中的 `key = value` 片段
pub(crate) struct AttrKv {
    pub(crate) key: Ident,
    #[allow(dead_code)]
    pub(crate) eq: Token![=],
    pub(crate) value: Expr,
}

impl Parse for AttrKv {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            key: input.parse()?,
            eq: input.parse()?,
            value: input.parse()?,
        })
    }
}

// 取字符串字面量值
pub(crate) fn expect_lit_str(value: Expr, key: &str) -> Result<syn::LitStr> {
    match value {
        Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(lit),
            ..
        }) => Ok(lit),
        other => Err(syn::Error::new(
            other.span(),
            format!("expected string literal for '{key}'"),
        )),
    }
}

// 取单段路径作为标识符（字段名）
pub(crate) fn expect_ident(value: Expr, key: &str) -> Result<Ident> {
    match value {
        Expr::Path(p) if p.qself.is_none() && p.path.segments.len() == 1 => {
            Ok(p.path.segments[0].ident.clone())
        }
        other => Err(syn::Error::new(
            other.span(),
            format!("expected field name for '{key}'"),
        )),
    }
}
