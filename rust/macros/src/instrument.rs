use proc_macro2::{Ident, Span};
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Wrap the function body so that entering it logs `> path::name` and leaving
/// it (by any route) logs `< path::name`, both at trace level.
pub fn instrument(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    if let Some(tt) = attr.into_iter().next() {
        return syn::Error::new(tt.span().into(), "No attribute arguments expected")
            .into_compile_error()
            .into();
    }

    if let Some(asyncness) = &input.sig.asyncness {
        return syn::Error::new_spanned(asyncness, "async functions cannot be instrumented")
            .into_compile_error()
            .into();
    }

    let ItemFn {
        ref attrs,
        ref vis,
        ref sig,
        ref block,
    } = input;

    let fn_name = sig.ident.to_string();
    let guard_ty = Ident::new("__KetiTraceGuard", Span::mixed_site());
    let guard = Ident::new("__keti_trace_guard", Span::mixed_site());

    quote! {
        #(#attrs)*
        #vis #sig {
            struct #guard_ty(&'static str);

            impl ::core::ops::Drop for #guard_ty {
                fn drop(&mut self) {
                    ::log::trace!("< {}", self.0);
                }
            }

            let #guard = #guard_ty(::core::concat!(::core::module_path!(), "::", #fn_name));
            ::log::trace!("> {}", #guard.0);

            #block
        }
    }
    .into()
}
