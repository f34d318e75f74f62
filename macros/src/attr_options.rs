use proc_macro::TokenStream;
use quote::quote;
use syn::{parse::Parser, Path};

/// Parsed options shared by `#[benchkit::bench]`.
///
/// Grounded in `divan-macros`' `AttrOptions`: a small option-parser built on
/// `syn::meta::parser` that recognizes a closed set of keys and leaves
/// everything else a compile error, rather than a full `syn::parse::Parse`
/// impl.
pub(crate) struct AttrOptions {
    /// `benchkit::__private`.
    pub private_mod: proc_macro2::TokenStream,

    /// Path to a zero-argument setup function run once per invocation,
    /// producing the state threaded into `core` (spec §4.1: "Perform any
    /// user-defined setup once").
    pub setup: Option<Path>,

    /// Path to a one-argument teardown function run once per invocation
    /// after all samples have been taken (spec §4.1: "Perform any
    /// user-defined teardown once").
    pub teardown: Option<Path>,
}

impl AttrOptions {
    pub fn parse(tokens: TokenStream, macro_name: &str) -> Result<Self, TokenStream> {
        let mut benchkit_crate = None::<syn::Path>;
        let mut setup = None::<Path>;
        let mut teardown = None::<Path>;

        let attr_parser = syn::meta::parser(|meta| {
            let repeat_error = || Err(meta.error(format_args!("repeated '{macro_name}' option")));

            if meta.path.is_ident("crate") {
                if benchkit_crate.is_none() {
                    benchkit_crate = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    repeat_error()
                }
            } else if meta.path.is_ident("setup") {
                if setup.is_none() {
                    setup = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    repeat_error()
                }
            } else if meta.path.is_ident("teardown") {
                if teardown.is_none() {
                    teardown = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    repeat_error()
                }
            } else {
                Err(meta.error(format_args!("unsupported '{macro_name}' option")))
            }
        });

        match attr_parser.parse(tokens) {
            Ok(()) => {}
            Err(error) => return Err(error.into_compile_error().into()),
        }

        let benchkit_crate = benchkit_crate.unwrap_or_else(|| syn::parse_quote!(::benchkit));
        let private_mod = quote! { #benchkit_crate::__private };

        Ok(Self { private_mod, setup, teardown })
    }
}
