// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Procedural macros for the ctest harness.
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    Error, Item, ItemFn, Macro, Path, ReturnType, parse_macro_input, parse_quote_spanned,
    visit_mut::VisitMut,
};

/// Assertion macros that count against the enclosing test.
const ASSERT_MACROS: &[&str] = &["assert", "assert_eq", "assert_eq_str"];

/// Name of the failure counter local to every generated test function.
const COUNTER: &str = "__ctest_failed_assertions";

/// Marks a function as a unit test.
///
/// # Example
///
/// ```rust,ignore
/// use ctest::def_test;
///
/// #[def_test]
/// fn test_addition() {
///     let a = 2 + 2;
///     assert_eq!(a, 4);
///     assert_eq!(a, 5, "a is {}", a);
/// }
/// ```
///
/// The function becomes `fn test_addition() -> usize`, returning how many of
/// its assertions failed, and is registered with `ctest::TESTS`.
///
/// Inside the body, `assert!`, `assert_eq!` and `assert_eq_str!` (bare or
/// written as `ctest::...`) are the non-aborting ctest assertions. Use
/// `std::assert!` for a check that should panic. Assertions written inside
/// other macros' arguments or inside nested items are left untouched.
///
/// The function must take no arguments, return nothing, and be neither
/// `async` nor generic.
#[proc_macro_attribute]
pub fn def_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    generate_function_test(attr.into(), input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Generate test code for a single function
fn generate_function_test(attr: TokenStream2, mut input: ItemFn) -> syn::Result<TokenStream2> {
    if !attr.is_empty() {
        return Err(Error::new_spanned(
            attr,
            "expect an empty attribute: `#[def_test]`",
        ));
    }

    let sig = &input.sig;
    if !sig.inputs.is_empty() {
        return Err(Error::new_spanned(
            &sig.inputs,
            "expect no input arguments for a test function",
        ));
    }
    if let ReturnType::Type(..) = sig.output {
        return Err(Error::new_spanned(
            &sig.output,
            "expect no return value for a test function",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new_spanned(asyncness, "test functions cannot be async"));
    }
    if !sig.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &sig.generics,
            "test functions cannot be generic",
        ));
    }

    let fn_name = input.sig.ident.clone();
    let fn_name_str = fn_name.to_string();
    let counter = Ident::new(COUNTER, Span::call_site());

    AssertRewriter {
        counter: &counter,
        test_name: &fn_name_str,
    }
    .visit_block_mut(&mut input.block);

    let fn_attrs = &input.attrs;
    let fn_vis = &input.vis;
    let fn_block = &input.block;

    // Generate a unique identifier for the test descriptor
    let descriptor_name = format_ident!("__CTEST_CASE_{}", fn_name_str.to_uppercase());

    // The body runs in a closure so that an early `return` leaves the body,
    // not the counting wrapper.
    Ok(quote! {
        #(#fn_attrs)*
        #fn_vis fn #fn_name() -> usize {
            #[allow(unused_mut)]
            let mut #counter: usize = 0;
            (|| -> () #fn_block)();
            #counter
        }

        #[::ctest::__private::linkme::distributed_slice(::ctest::TESTS)]
        #[linkme(crate = ::ctest::__private::linkme)]
        #[allow(non_upper_case_globals)]
        static #descriptor_name: ::ctest::TestCase = ::ctest::TestCase::new(
            #fn_name_str,
            module_path!(),
            file!(),
            line!(),
            #fn_name,
        );
    })
}

/// Binds every assertion in a test body to the test's counter and name.
struct AssertRewriter<'a> {
    counter: &'a Ident,
    test_name: &'a str,
}

impl VisitMut for AssertRewriter<'_> {
    fn visit_macro_mut(&mut self, mac: &mut Macro) {
        let Some(name) = assertion_name(&mac.path) else {
            return;
        };
        let counter = self.counter;
        let test_name = self.test_name;
        let tokens = &mac.tokens;
        // `line!()` reports where the invocation starts, so the new path keeps
        // the span of the one it replaces.
        let span = mac.path.segments[0].ident.span();
        mac.path = parse_quote_spanned!(span=> ::ctest::#name);
        mac.tokens = quote!(@tally #counter, #test_name; #tokens);
    }

    // Nested items have no counter in scope.
    fn visit_item_mut(&mut self, _item: &mut Item) {}
}

/// Returns the macro name when `path` is `name` or `ctest::name` for one of
/// the assertion macros.
fn assertion_name(path: &Path) -> Option<Ident> {
    let last = path.segments.last()?;
    let ours = match path.segments.len() {
        1 => path.leading_colon.is_none(),
        2 => path.segments[0].ident == "ctest",
        _ => false,
    };
    (ours && ASSERT_MACROS.iter().any(|name| last.ident == *name)).then(|| last.ident.clone())
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn expand(attr: TokenStream2, item: ItemFn) -> syn::Result<String> {
        generate_function_test(attr, item).map(|tokens| tokens.to_string())
    }

    #[test]
    fn bare_assertions_are_bound_to_counter() {
        let out = expand(
            TokenStream2::new(),
            parse_quote! {
                fn add_returns_sum() {
                    assert_eq!(2 + 2, 4);
                    ctest::assert!(true, "never {}", 1);
                }
            },
        )
        .unwrap();
        assert!(out.contains("fn add_returns_sum () -> usize"));
        assert!(out.contains(
            ":: ctest :: assert_eq ! (@ tally __ctest_failed_assertions , \"add_returns_sum\" ; 2 + 2 , 4)"
        ));
        assert!(out.contains(":: ctest :: assert ! (@ tally __ctest_failed_assertions"));
        assert!(out.contains("static __CTEST_CASE_ADD_RETURNS_SUM : :: ctest :: TestCase"));
    }

    #[test]
    fn qualified_std_assertions_are_kept() {
        let out = expand(
            TokenStream2::new(),
            parse_quote! {
                fn panics_on_purpose() {
                    std::assert!(1 < 2);
                    core::assert_eq!(1, 1);
                }
            },
        )
        .unwrap();
        assert!(out.contains("std :: assert ! (1 < 2)"));
        assert!(out.contains("core :: assert_eq ! (1 , 1)"));
    }

    #[test]
    fn assertions_in_closures_are_rewritten() {
        let out = expand(
            TokenStream2::new(),
            parse_quote! {
                fn all_positive() {
                    [1, 2, 3].iter().for_each(|x| assert!(*x > 0));
                }
            },
        )
        .unwrap();
        assert!(out.contains(":: ctest :: assert ! (@ tally __ctest_failed_assertions , \"all_positive\" ; * x > 0)"));
    }

    #[test]
    fn nested_items_are_left_alone() {
        let out = expand(
            TokenStream2::new(),
            parse_quote! {
                fn outer() {
                    fn helper() {
                        assert!(true);
                    }
                    helper();
                }
            },
        )
        .unwrap();
        assert!(out.contains("fn helper () { assert ! (true) ; }"));
    }

    #[test]
    fn rejects_bad_signatures() {
        let err = |item: ItemFn| expand(TokenStream2::new(), item).unwrap_err().to_string();
        assert_eq!(
            err(parse_quote! { fn f(x: u32) {} }),
            "expect no input arguments for a test function"
        );
        assert_eq!(
            err(parse_quote! { fn f() -> u32 { 0 } }),
            "expect no return value for a test function"
        );
        assert_eq!(
            err(parse_quote! { async fn f() {} }),
            "test functions cannot be async"
        );
        assert_eq!(
            err(parse_quote! { fn f<T>() {} }),
            "test functions cannot be generic"
        );
    }

    #[test]
    fn rejects_attribute_arguments() {
        let err = expand(quote!(ignore), parse_quote! { fn f() {} }).unwrap_err();
        assert_eq!(err.to_string(), "expect an empty attribute: `#[def_test]`");
    }
}
