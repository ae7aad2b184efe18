use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::quote;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use syn::{GenericArgument, PathArguments, Type};

/// Returns `T` for `Option<T>`, `None` for anything else.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(tp) = ty else { return None };
    let segment = tp.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn last_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => tp.path.segments.last().map(|seg| seg.ident.to_string()),
        _ => None,
    }
}

pub fn is_string(ty: &Type) -> bool {
    last_ident(ty).is_some_and(|ident| ident == "String")
}

pub fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(tp) if tp.path.is_ident("bool"))
}

pub fn is_integer(ty: &Type) -> bool {
    last_ident(ty).is_some_and(|ident| {
        matches!(ident.as_str(), "u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i32" | "i64" | "isize")
    })
}

pub fn is_float(ty: &Type) -> bool {
    last_ident(ty).is_some_and(|ident| matches!(ident.as_str(), "f32" | "f64"))
}

pub fn classify_inner_type(ty: &Type) -> InnerKind {
    if is_string(ty) {
        InnerKind::String
    } else if is_integer(ty) || is_float(ty) {
        InnerKind::Number
    } else if is_bool(ty) {
        InnerKind::Bool
    } else {
        InnerKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerKind {
    String,
    Number,
    Bool,
    Other,
}

/// `owner_id` → `Owner Id`
pub fn humanize(snake: &str) -> String {
    snake
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `CoverPageTemplate` → `["Cover", "Page", "Template"]`
pub fn split_camel_case(camel: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for c in camel.chars() {
        match words.last_mut() {
            Some(word) if !c.is_uppercase() => word.push(c),
            _ => words.push(c.to_string()),
        }
    }
    words
}

pub fn to_snake_case(camel: &str) -> String {
    split_camel_case(camel).iter().map(|w| w.to_lowercase()).collect::<Vec<_>>().join("_")
}

pub fn write_to_local_file(lines: Vec<String>, dir_name: &str, file_name: &str) {
    let dir_path = match env::current_dir() {
        Ok(dir) => dir.join("target").join("macros").join(dir_name),
        Err(e) => {
            eprintln!("Current dir inaccessible: {}", e);
            return;
        }
    };
    if let Err(e) = std::fs::create_dir_all(&dir_path) {
        eprintln!("Failed to create directory {:?}: {}", dir_path, e);
        return;
    }
    let full_path = dir_path.join(file_name);

    #[cfg(not(test))]
    {
        if let Err(e) = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&full_path)
            .and_then(|mut file| file.write_all(lines.join("\n").as_bytes()))
        {
            eprintln!("Failed to write to {:?}: {}", full_path, e);
        }
    }
}

pub fn submit_struct_to_stream(stream: proc_macro2::TokenStream, dir: &str, struct_ident: &Ident, suffix: &str) -> TokenStream {
    let formatted_token_stream = match syn::parse2::<syn::File>(stream.clone()) {
        Ok(ast) => prettyplease::unparse(&ast),
        Err(_) => stream.to_string(),
    };

    write_to_local_file(vec![formatted_token_stream], dir, &format!("{}{}", struct_ident, suffix));

    quote! {
        #stream
    }
    .into()
}
