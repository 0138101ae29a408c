use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{LitStr, spanned::Spanned};

/// A string in generated code, classified by how it can be produced.
#[derive(Clone)]
pub(crate) enum StringExpr {
    /// Known at compile time: a literal, or a macro such as `module_path!()`.
    Const(TokenStream),
    /// A `&'static str` computed at runtime, e.g. `<T as TypePath>::type_path()`.
    Borrowed(TokenStream),
    /// A `String` computed at runtime.
    Owned(TokenStream),
}

impl Default for StringExpr {
    fn default() -> Self {
        Self::Const("".to_token_stream())
    }
}

impl<T: ToString + Spanned> From<T> for StringExpr {
    fn from(value: T) -> Self {
        Self::Const(LitStr::new(&value.to_string(), value.span()).to_token_stream())
    }
}

impl StringExpr {
    /// Creates a [constant](StringExpr::Const) expression from a [`struct@LitStr`].
    pub fn from_lit(lit: &LitStr) -> Self {
        Self::Const(lit.to_token_stream())
    }

    /// Creates a [constant](StringExpr::Const) expression from a string literal.
    pub fn from_str(string: &str) -> Self {
        Self::Const(string.to_token_stream())
    }

    /// Returns tokens for a `&str`.
    pub fn into_borrowed(self) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => tokens,
            Self::Owned(owned) => quote! {
                &#owned as &str
            },
        }
    }

    /// Returns tokens for a `String`.
    pub fn into_owned(self, fw_frame_path: &syn::Path) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => {
                let alloc_utils_ = crate::path::alloc_utils_(fw_frame_path);
                quote! {
                    #alloc_utils_::ToString::to_string(#tokens)
                }
            }
            Self::Owned(owned) => owned,
        }
    }

    fn is_const(&self) -> bool {
        matches!(self, StringExpr::Const(_))
    }

    /// Concatenates the expressions.
    ///
    /// If all of them are [`StringExpr::Const`] the result is a `concat!`,
    /// otherwise a `String` is built at runtime.
    pub fn from_iter<T: IntoIterator<Item = StringExpr>>(
        iter: T,
        fw_frame_path: &syn::Path,
    ) -> Self {
        let exprs: Vec<StringExpr> = iter.into_iter().collect();

        if exprs.is_empty() {
            return Self::default();
        }

        if exprs.iter().all(StringExpr::is_const) {
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);

            Self::Const(quote! {
                ::core::concat!( #(#inner),* )
            })
        } else {
            let concat_ = crate::path::concat_(fw_frame_path);
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);

            Self::Owned(quote! {
                #concat_(&[ #(#inner),* ])
            })
        }
    }
}
