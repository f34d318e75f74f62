//! Macros for [benchkit](https://github.com/benchkit-rs/benchkit), an
//! adaptive micro-benchmarking harness.

#![warn(missing_docs)]

mod attr_options;

use attr_options::AttrOptions;
use proc_macro::TokenStream;
use quote::quote;
use syn::ItemFn;

/// Turns a zero-argument function into a benchmarkable (spec §4.1, §6: the
/// "benchmarkable factory" external collaborator).
///
/// The annotated function's body becomes the *core* expression, run inside
/// an `#[inline(never)]` barrier so the optimizer can't hoist, fold, or
/// dead-code-eliminate it across the timing instrumentation in
/// [`benchkit::Benchmarkable::run`](../benchkit/trait.Benchmarkable.html).
///
/// # Examples
///
/// ```
/// #[benchkit::bench]
/// fn add() -> i32 {
///     std::hint::black_box(1) + std::hint::black_box(2)
/// }
///
/// fn main() {
///     let results = benchkit::execute(&mut add(), Default::default()).unwrap();
///     println!("{:?}", results.summarize().unwrap());
/// }
/// ```
///
/// # Options
///
/// - `#[benchkit::bench(setup = path::to::setup)]`: a zero-argument
///   function run once per invocation, before any sample is taken; its
///   return value is threaded as `&mut S` into the core expression (spec
///   §4.1: "Perform any user-defined setup once").
/// - `#[benchkit::bench(teardown = path::to::teardown)]`: a one-argument
///   function run once per invocation, after every sample has been taken
///   (spec §4.1: "Perform any user-defined teardown once").
/// - `#[benchkit::bench(crate = path::to::benchkit)]`: the path to the
///   specific `benchkit` crate instance used by this macro's generated
///   code, for crates that re-export `benchkit` under another name.
#[proc_macro_attribute]
pub fn bench(attr: TokenStream, item: TokenStream) -> TokenStream {
    let options = match AttrOptions::parse(attr, "bench") {
        Ok(options) => options,
        Err(error) => return error,
    };

    let item_fn = syn::parse_macro_input!(item as ItemFn);
    let ItemFn { attrs, vis, sig, block } = item_fn;

    let fn_name = &sig.ident;
    let output_ty = &sig.output;
    let private_mod = &options.private_mod;

    // The annotated function takes either zero parameters (no setup state)
    // or exactly one `&mut S` parameter binding the value `setup` produced
    // (spec §4.1's "state threaded into the core expression").
    let state_pat = match sig.inputs.len() {
        0 => None,
        1 => Some(sig.inputs.first().unwrap().clone()),
        _ => {
            return syn::Error::new_spanned(&sig.inputs, "`#[benchkit::bench]` functions take at most one `&mut S` state parameter")
                .into_compile_error()
                .into();
        }
    };

    let setup_expr = match &options.setup {
        Some(path) => quote! { #path },
        None => quote! { || () },
    };
    let teardown_expr = match &options.teardown {
        Some(path) => quote! { #path },
        None => quote! { |__benchkit_state| { let _ = __benchkit_state; } },
    };

    let core_fn = match state_pat {
        Some(param) => quote! {
            #[inline(never)]
            fn __benchkit_core(#param) #output_ty #block
            __benchkit_core(__benchkit_state)
        },
        None => quote! {
            #[inline(never)]
            fn __benchkit_core() #output_ty #block
            let _ = &__benchkit_state;
            __benchkit_core()
        },
    };

    let expanded = quote! {
        #(#attrs)*
        #vis fn #fn_name() -> impl #private_mod::Benchmarkable {
            #private_mod::benchmark_fn(
                #setup_expr,
                |__benchkit_state| {
                    #core_fn
                },
                #teardown_expr,
            )
        }
    };

    expanded.into()
}
