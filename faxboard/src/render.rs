//! Server-side HTML for the dashboard pages.

use crate::form::{FormMode, FormSession};
use crate::record::{FormValues, Record};
use crate::registry::Registry;
use crate::schema::{is_checked, EntitySchema, FieldDescriptor, FieldKind};
use serde_json::Value;
use std::fmt::Write;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#111827}\
.container{max-width:42rem}.back{font-size:.875rem;color:#6b7280}\
.error{margin-bottom:1.5rem;border:1px solid #fecaca;background:#fef2f2;color:#b91c1c;padding:.75rem 1rem;border-radius:.5rem}\
.field{margin-bottom:1.25rem}label{display:block;font-weight:500;margin-bottom:.25rem}\
input{width:100%;padding:.5rem;border:1px solid #d1d5db;border-radius:.375rem}input[type=checkbox]{width:auto}\
.actions{display:flex;gap:.75rem;padding-top:1rem;border-top:1px solid #e5e7eb}\
table{border-collapse:collapse}td,th{padding:.375rem .75rem;border-bottom:1px solid #e5e7eb;text-align:left}";

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<div class=\"container\">\n{}</div>\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

fn back_link(schema: &EntitySchema) -> String {
    format!("<a class=\"back\" href=\"{}\">Back to {}</a>\n", escape(&schema.list_route()), escape(schema.plural))
}

pub fn error_banner(message: &str) -> String {
    format!("<div class=\"error\" role=\"alert\">{}</div>\n", escape(message))
}

/// The create or edit form for the session's mode, with its current values, error and submitting state.
pub fn form_page(schema: &EntitySchema, session: &FormSession) -> String {
    let (title, action, button) = match &session.mode {
        FormMode::Create => (format!("Add {}", schema.label), schema.new_route(), format!("Create {}", schema.label)),
        FormMode::Edit(id) => {
            (format!("Edit {}", schema.label), schema.edit_route(id.as_str()), format!("Update {}", schema.label))
        }
    };
    let creating = session.mode == FormMode::Create;

    let mut body = back_link(schema);
    let _ = writeln!(body, "<h1>{}</h1>", escape(&title));
    if let Some(message) = &session.last_error {
        body.push_str(&error_banner(message));
    }
    let _ = writeln!(body, "<form method=\"post\" action=\"{}\">", escape(&action));
    for field in schema.input_fields() {
        body.push_str(&input(field, &session.values, creating));
    }
    let button = if session.submitting { "Saving...".to_string() } else { button };
    let disabled = if session.submitting { " disabled" } else { "" };
    let _ = writeln!(
        body,
        "<div class=\"actions\">\n<button type=\"submit\"{}>{}</button>\n<a href=\"{}\">Cancel</a>\n</div>\n</form>",
        disabled,
        escape(&button),
        escape(&schema.list_route())
    );
    page(&title, &body)
}

fn input(field: &FieldDescriptor, values: &FormValues, with_placeholder: bool) -> String {
    let mut html = String::from("<div class=\"field\">\n");
    let _ = writeln!(html, "<label for=\"{}\">{}</label>", field.name, escape(field.label));
    let _ = write!(html, "<input id=\"{0}\" name=\"{0}\" type=\"{1}\"", field.name, field.kind.input_type());
    let value = values.get(field.name).unwrap_or_default();
    if field.kind == FieldKind::Boolean {
        if is_checked(value) {
            html.push_str(" checked");
        }
    } else {
        if !value.is_empty() {
            let _ = write!(html, " value=\"{}\"", escape(value));
        }
        if with_placeholder {
            let _ = write!(html, " placeholder=\"{}\"", escape(&field.placeholder()));
        }
        if field.kind == FieldKind::Number {
            html.push_str(" step=\"any\"");
        }
    }
    if field.required && field.kind != FieldKind::Boolean {
        html.push_str(" required");
    }
    html.push_str(">\n</div>\n");
    html
}

pub fn loading_page(schema: &EntitySchema) -> String {
    page(&format!("Edit {}", schema.label), "<p class=\"loading\" aria-busy=\"true\">Loading...</p>\n")
}

/// Shown instead of the edit form when the record could not be loaded.
pub fn not_found_page(schema: &EntitySchema, message: Option<&str>) -> String {
    let mut body = back_link(schema);
    let _ = writeln!(body, "<div class=\"error\" role=\"alert\">\n<p>{} not found.</p>", escape(schema.label));
    if let Some(message) = message {
        let _ = writeln!(body, "<p>{}</p>", escape(message));
    }
    body.push_str("</div>\n");
    page(&format!("{} not found", schema.label), &body)
}

fn cell(field: &FieldDescriptor, row: &Record) -> String {
    match row.get(field.name) {
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        value => escape(&field.kind.display(value)),
    }
}

pub fn list_page(schema: &EntitySchema, rows: &[Record]) -> String {
    let mut body = String::from("<a class=\"back\" href=\"/dashboard\">Dashboard</a>\n");
    let _ = writeln!(body, "<h1>{}</h1>", escape(schema.plural));
    let _ = writeln!(body, "<p><a href=\"{}\">Add {}</a></p>", escape(&schema.new_route()), escape(schema.label));
    if rows.is_empty() {
        let _ = writeln!(body, "<p>No {} yet.</p>", escape(&schema.plural.to_lowercase()));
        return page(schema.plural, &body);
    }
    body.push_str("<table>\n<thead><tr>");
    for field in schema.fields {
        let _ = write!(body, "<th>{}</th>", escape(field.label));
    }
    body.push_str("<th></th></tr></thead>\n<tbody>\n");
    for row in rows {
        body.push_str("<tr>");
        for field in schema.fields {
            let _ = write!(body, "<td>{}</td>", cell(field, row));
        }
        match row.get("id") {
            Some(Value::String(id)) => {
                let _ = write!(body, "<td><a href=\"{}\">Edit</a></td>", escape(&schema.edit_route(id)));
            }
            Some(Value::Number(id)) => {
                let _ = write!(body, "<td><a href=\"{}\">Edit</a></td>", escape(&schema.edit_route(&id.to_string())));
            }
            _ => body.push_str("<td></td>"),
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");
    page(schema.plural, &body)
}

pub fn index_page(registry: &Registry) -> String {
    let mut body = String::from("<h1>Dashboard</h1>\n<ul>\n");
    for schema in registry.iter() {
        let _ = writeln!(
            body,
            "<li><a href=\"{}\">{}</a> <a href=\"{}\">Add {}</a></li>",
            escape(&schema.list_route()),
            escape(schema.plural),
            escape(&schema.new_route()),
            escape(schema.label)
        );
    }
    body.push_str("</ul>\n");
    page("Dashboard", &body)
}
