use axum::extract::rejection::{BytesRejection, JsonRejection};
use http::StatusCode;
use thiserror::Error;

/// Failures of the record backend. `Rejected` carries the backend's own message verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{table} record {id} not found")]
    NotFound { table: String, id: String },

    #[error("{0}")]
    Rejected(String),

    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected backend payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(table: &str, id: impl ToString) -> Self {
        StoreError::NotFound { table: table.to_string(), id: id.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema `{0}` declares no fields")]
    Empty(&'static str),

    #[error("schema `{table}` declares field `{field}` more than once")]
    DuplicateField { table: &'static str, field: &'static str },

    #[error("schema `{table}` field `{field}` is filled from the current user and must be text")]
    InvalidDefault { table: &'static str, field: &'static str },

    #[error("route `{0}` is claimed by more than one schema")]
    DuplicateRoute(&'static str),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON rejection: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Body rejection: {0}")]
    BodyRejection(#[from] BytesRejection),

    #[error("Form decoding error: {0}")]
    FormDecode(#[from] serde_urlencoded::de::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::FormDecode(_) => StatusCode::BAD_REQUEST,
            AppError::BodyRejection(r) => r.status(),
            AppError::JsonRejection(r) => r.status(),
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Rejected(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for axum::Error {
    fn from(val: AppError) -> Self {
        axum::Error::new(val.to_string())
    }
}
