use crate::macro_utils::{self, InnerKind};
use proc_macro2::Ident;
use syn::spanned::Spanned;
use syn::{DeriveInput, Fields, LitStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Number,
    DateTime,
    Url,
    Boolean,
}

#[derive(Clone)]
pub struct FieldDef {
    pub name: Ident,
    pub label: String,
    pub kind: Kind,
    pub required: bool,
    pub current_user: bool,
}

pub struct FormDef {
    pub table: String,
    pub route: String,
    pub label: String,
    pub plural: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Default)]
struct FormAttrs {
    table: Option<String>,
    route: Option<String>,
    label: Option<String>,
    plural: Option<String>,
}

#[derive(Default)]
struct FieldAttrs {
    label: Option<String>,
    required: bool,
    datetime: bool,
    url: bool,
    current_user: bool,
}

fn parse_form_attrs(ast: &DeriveInput) -> Result<FormAttrs, syn::Error> {
    let mut attrs = FormAttrs::default();
    for attr in ast.attrs.iter().filter(|a| a.path().is_ident("form")) {
        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("table") {
                &mut attrs.table
            } else if meta.path.is_ident("route") {
                &mut attrs.route
            } else if meta.path.is_ident("label") {
                &mut attrs.label
            } else if meta.path.is_ident("plural") {
                &mut attrs.plural
            } else {
                return Err(meta.error("expected one of `table`, `route`, `label`, `plural`"));
            };
            let value: LitStr = meta.value()?.parse()?;
            if value.value().is_empty() {
                return Err(syn::Error::new(value.span(), "value must not be empty"));
            }
            *slot = Some(value.value());
            Ok(())
        })?;
    }
    Ok(attrs)
}

fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs, syn::Error> {
    let mut attrs = FieldAttrs::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("field")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("label") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.label = Some(value.value());
            } else if meta.path.is_ident("required") {
                attrs.required = true;
            } else if meta.path.is_ident("datetime") {
                attrs.datetime = true;
            } else if meta.path.is_ident("url") {
                attrs.url = true;
            } else if meta.path.is_ident("current_user") {
                attrs.current_user = true;
            } else {
                return Err(meta.error("expected one of `label`, `required`, `datetime`, `url`, `current_user`"));
            }
            Ok(())
        })?;
    }
    Ok(attrs)
}

fn parse_field(field: &syn::Field) -> Result<FieldDef, syn::Error> {
    let name = field.ident.clone().ok_or_else(|| syn::Error::new(field.span(), "Unnamed fields not supported"))?;
    let attrs = parse_field_attrs(field)?;
    let (inner, optional) = match macro_utils::option_inner(&field.ty) {
        Some(inner) => (inner, true),
        None => (&field.ty, false),
    };
    let inner_kind = macro_utils::classify_inner_type(inner);

    if attrs.datetime && attrs.url {
        return Err(syn::Error::new(field.span(), "`datetime` and `url` are mutually exclusive"));
    }
    if (attrs.datetime || attrs.url || attrs.current_user) && inner_kind != InnerKind::String {
        return Err(syn::Error::new(
            field.ty.span(),
            "`datetime`, `url` and `current_user` fields must be `String` or `Option<String>`",
        ));
    }
    let kind = match inner_kind {
        InnerKind::String if attrs.datetime => Kind::DateTime,
        InnerKind::String if attrs.url => Kind::Url,
        InnerKind::String => Kind::Text,
        InnerKind::Number => Kind::Number,
        InnerKind::Bool => Kind::Boolean,
        InnerKind::Other => {
            return Err(syn::Error::new(
                field.ty.span(),
                "Form fields must be `String`, a numeric primitive or `bool`, optionally wrapped in `Option`",
            ))
        }
    };
    let label = attrs.label.unwrap_or_else(|| macro_utils::humanize(&name.to_string()));
    // an unchecked checkbox submits nothing, so it can never be enforced
    let required = kind != Kind::Boolean && (attrs.required || !optional);
    Ok(FieldDef { name, label, kind, required, current_user: attrs.current_user })
}

pub fn parse_form(ast: &DeriveInput) -> Result<FormDef, syn::Error> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new(ast.generics.span(), "`#[derive(Form)]` does not support generic structs"));
    }
    let named = match &ast.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => return Err(syn::Error::new(ast.span(), "`#[derive(Form)]` only supports structs with named fields.")),
        },
        _ => return Err(syn::Error::new(ast.span(), "`#[derive(Form)]` only supports structs")),
    };
    if named.is_empty() {
        return Err(syn::Error::new(ast.ident.span(), "`#[derive(Form)]` needs at least one field"));
    }

    let fields = named.iter().map(parse_field).collect::<Result<Vec<_>, _>>()?;
    let attrs = parse_form_attrs(ast)?;
    let struct_name = ast.ident.to_string();
    let table = attrs.table.unwrap_or_else(|| format!("{}s", macro_utils::to_snake_case(&struct_name)));
    let route = attrs.route.unwrap_or_else(|| table.replace('_', "-"));
    let label = attrs.label.unwrap_or_else(|| macro_utils::split_camel_case(&struct_name).join(" "));
    let plural = attrs.plural.unwrap_or_else(|| format!("{}s", label));
    Ok(FormDef { table, route, label, plural, fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn defaults_come_from_struct_name() {
        let ast: DeriveInput = parse_quote! {
            struct FaxNumber {
                account_id: String,
                label: Option<String>,
            }
        };
        let form = parse_form(&ast).unwrap();
        assert_eq!(form.table, "fax_numbers");
        assert_eq!(form.route, "fax-numbers");
        assert_eq!(form.label, "Fax Number");
        assert_eq!(form.plural, "Fax Numbers");
        assert!(form.fields[0].required);
        assert!(!form.fields[1].required);
        assert_eq!(form.fields[0].label, "Account Id");
    }

    #[test]
    fn field_attributes_refine_kind_and_source() {
        let ast: DeriveInput = parse_quote! {
            #[form(table = "faxes", plural = "Faxes")]
            struct Fax {
                #[field(current_user)]
                user_id: String,
                #[field(datetime)]
                sent_at: Option<String>,
                #[field(url, label = "Document")]
                document_url: Option<String>,
                page_count: Option<i32>,
                is_default: bool,
                #[field(required)]
                status: Option<String>,
            }
        };
        let form = parse_form(&ast).unwrap();
        assert_eq!(form.plural, "Faxes");
        assert_eq!(form.route, "faxes");
        let kinds: Vec<_> = form.fields.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![Kind::Text, Kind::DateTime, Kind::Url, Kind::Number, Kind::Boolean, Kind::Text]);
        assert!(form.fields[0].current_user);
        assert_eq!(form.fields[2].label, "Document");
        assert!(!form.fields[4].required);
        assert!(form.fields[5].required);
    }

    #[test]
    fn unsupported_types_and_conflicts_are_errors() {
        let ast: DeriveInput = parse_quote! { struct A { data: Vec<u8> } };
        assert!(parse_form(&ast).is_err());
        let ast: DeriveInput = parse_quote! { struct A { #[field(datetime, url)] at: String } };
        assert!(parse_form(&ast).is_err());
        let ast: DeriveInput = parse_quote! { struct A { #[field(current_user)] owner: i64 } };
        assert!(parse_form(&ast).is_err());
        let ast: DeriveInput = parse_quote! { struct A { #[field(hidden)] owner: String } };
        assert!(parse_form(&ast).is_err());
        let ast: DeriveInput = parse_quote! { struct A(String); };
        assert!(parse_form(&ast).is_err());
    }
}
