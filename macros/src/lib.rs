extern crate proc_macro;
mod field_parser;
mod form;
mod macro_utils;

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;
use syn::{parse_macro_input, DeriveInput};

/// Derives `faxboard::FormEntity` and registers the struct's form schema with the dashboard.
///
/// ```ignore
/// #[derive(Form)]
/// #[form(table = "faxes", plural = "Faxes")]
/// pub struct Fax {
///     pub account_id: String,
///     #[field(current_user)]
///     pub user_id: String,
///     pub page_count: Option<i32>,
///     #[field(datetime)]
///     pub sent_at: Option<String>,
/// }
/// ```
#[proc_macro_derive(Form, attributes(form, field))]
#[proc_macro_error]
pub fn derive_form(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let struct_ident = &ast.ident;

    let stream = match field_parser::parse_form(&ast) {
        Ok(form_def) => form::expand(struct_ident, &form_def),
        Err(e) => e.to_compile_error(),
    };
    macro_utils::submit_struct_to_stream(stream, "form", struct_ident, ".rs")
}
