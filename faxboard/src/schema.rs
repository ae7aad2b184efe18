//! Static per-entity form declarations.
//!
//! An [`EntitySchema`] is plain `'static` data, normally produced by `#[derive(Form)]`. It is read by the
//! form controller, the renderer and the router, and never mutated after definition.

use crate::error::SchemaError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::HashSet;
use utoipa::ToSchema;

const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    DateTime,
    Url,
    Boolean,
}

impl FieldKind {
    pub const fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::DateTime => "datetime-local",
            FieldKind::Url => "url",
            FieldKind::Boolean => "checkbox",
        }
    }

    /// Turns a submitted input value into the value written to the backend.
    /// Absent and empty inputs become `null`, except checkboxes which are `false` when absent.
    pub fn coerce(&self, raw: Option<&str>) -> Value {
        match self {
            FieldKind::Boolean => Value::Bool(raw.is_some_and(is_checked)),
            _ => match raw {
                None => Value::Null,
                Some(s) if s.is_empty() => Value::Null,
                Some(s) => match self {
                    FieldKind::Number => parse_number(s),
                    _ => Value::String(s.to_string()),
                },
            },
        }
    }

    /// Renders a stored value as the initial content of an input. Missing and `null` render empty.
    pub fn display(&self, value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) if *self == FieldKind::DateTime => datetime_input_value(s),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

pub fn is_checked(raw: &str) -> bool {
    matches!(raw, "on" | "true" | "1")
}

fn parse_number(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        Value::Number(int.into())
    } else {
        trimmed.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Renders a stored timestamp as a `datetime-local` value in UTC. The offset is dropped and the form posts
/// back a naive time, so this assumes a backend whose session timezone is UTC; otherwise an unchanged edit
/// moves the stored instant.
fn datetime_input_value(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.with_timezone(&Utc).format(DATETIME_INPUT_FORMAT).to_string()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        naive.format(DATETIME_INPUT_FORMAT).to_string()
    } else {
        raw.to_string()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSource {
    #[default]
    None,
    CurrentUser,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default_source: DefaultSource,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        FieldDescriptor { name, label, kind, required: false, default_source: DefaultSource::None }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub const fn datetime(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::DateTime)
    }

    pub const fn url(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Url)
    }

    pub const fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub const fn required(self) -> Self {
        FieldDescriptor { required: true, ..self }
    }

    pub const fn current_user(self) -> Self {
        FieldDescriptor { default_source: DefaultSource::CurrentUser, ..self }
    }

    /// Fields filled from the signed-in user are never rendered and never read from form input.
    pub fn is_input(&self) -> bool {
        self.default_source == DefaultSource::None
    }

    pub fn placeholder(&self) -> String {
        format!("Enter {}", self.label.to_lowercase())
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    pub table: &'static str,
    pub route: &'static str,
    pub label: &'static str,
    pub plural: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn input_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_input())
    }

    pub fn current_user_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| f.default_source == DefaultSource::CurrentUser)
    }

    pub fn list_route(&self) -> String {
        format!("/dashboard/{}", self.route)
    }

    pub fn new_route(&self) -> String {
        format!("/dashboard/{}/new", self.route)
    }

    pub fn edit_route(&self, id: &str) -> String {
        format!("/dashboard/{}/{}/edit", self.route, urlencoding::encode(id))
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty(self.table));
        }
        let mut seen = HashSet::new();
        for field in self.fields {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField { table: self.table, field: field.name });
            }
            if field.default_source == DefaultSource::CurrentUser && field.kind != FieldKind::Text {
                return Err(SchemaError::InvalidDefault { table: self.table, field: field.name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub static ACCOUNTS: EntitySchema = EntitySchema {
        table: "accounts",
        route: "accounts",
        label: "Account",
        plural: "Accounts",
        fields: &[
            FieldDescriptor::text("owner_id", "Owner Id").required(),
            FieldDescriptor::text("subscription_plan", "Subscription Plan"),
            FieldDescriptor::number("pages_sent_this_month", "Pages Sent This Month"),
            FieldDescriptor::datetime("billing_period_start", "Billing Period Start"),
        ],
    };

    pub static CONTACTS: EntitySchema = EntitySchema {
        table: "contacts",
        route: "contacts",
        label: "Contact",
        plural: "Contacts",
        fields: &[
            FieldDescriptor::text("account_id", "Account Id").required(),
            FieldDescriptor::text("user_id", "User Id").required().current_user(),
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::url("website", "Website"),
            FieldDescriptor::boolean("is_default", "Is Default"),
        ],
    };
}
