use crate::field_parser::{FieldDef, FormDef, Kind};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

fn kind_tokens(kind: Kind) -> TokenStream {
    match kind {
        Kind::Text => quote! { faxboard::FieldKind::Text },
        Kind::Number => quote! { faxboard::FieldKind::Number },
        Kind::DateTime => quote! { faxboard::FieldKind::DateTime },
        Kind::Url => quote! { faxboard::FieldKind::Url },
        Kind::Boolean => quote! { faxboard::FieldKind::Boolean },
    }
}

fn field_descriptor(field: &FieldDef) -> TokenStream {
    let name = field.name.to_string();
    let label = &field.label;
    let kind = kind_tokens(field.kind);
    let required = field.required;
    let default_source = if field.current_user {
        quote! { faxboard::DefaultSource::CurrentUser }
    } else {
        quote! { faxboard::DefaultSource::None }
    };
    quote! {
        faxboard::FieldDescriptor {
            name: #name,
            label: #label,
            kind: #kind,
            required: #required,
            default_source: #default_source,
        }
    }
}

pub fn expand(struct_ident: &Ident, form: &FormDef) -> TokenStream {
    let struct_name = struct_ident.to_string();
    let FormDef { table, route, label, plural, fields } = form;
    let descriptors: Vec<TokenStream> = fields.iter().map(field_descriptor).collect();
    quote! {
        impl faxboard::FormEntity for #struct_ident {
            fn schema() -> &'static faxboard::EntitySchema {
                static SCHEMA: faxboard::EntitySchema = faxboard::EntitySchema {
                    table: #table,
                    route: #route,
                    label: #label,
                    plural: #plural,
                    fields: &[#(#descriptors),*],
                };
                &SCHEMA
            }
        }

        faxboard::inventory::submit! {
            faxboard::FormInfo {
                name: #struct_name,
                schema_fn: <#struct_ident as faxboard::FormEntity>::schema,
            }
        }
    }
}
