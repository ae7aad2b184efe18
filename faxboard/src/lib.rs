//! faxboard reads struct annotations and derives the create and edit forms of an admin dashboard from them.
//!
//! Each `#[derive(Form)]` struct becomes a static [`EntitySchema`] registered through `inventory`. One generic
//! [`FormController`] drives every form page against a [`RecordStore`] backend, either in memory or a
//! PostgREST-compatible HTTP service, and the axum routing shell in [`shell`] serves the pages.
//!

pub mod error;
pub mod form;
pub mod logger;
pub mod record;
pub mod registry;
pub mod render;
pub mod schema;
pub mod settings;
pub mod shell;
pub mod store;

pub use axum;
pub use chrono;
pub use http;
pub use inventory;
pub use macros::Form;
pub use serde;
pub use serde::Deserialize;
pub use serde::Serialize;
pub use serde_json;
pub use tokio;
pub use tower_http;
pub use utoipa;

pub use error::{AppError, SchemaError, StoreError};
pub use form::{FormController, FormMode, FormSession, FormState, LoadOutcome, Navigation, SubmitOutcome};
pub use record::{FormValues, Record, RecordId, UserId};
pub use registry::{FormEntity, FormInfo, Registry};
pub use schema::{DefaultSource, EntitySchema, FieldDescriptor, FieldKind};
pub use settings::{AppConfig, BackendKind, BackendSettings, HttpSettings};
pub use shell::{build_router, serve, RequestState};
pub use store::{MemoryStore, RecordStore, RestStore, TableConstraints};
#[cfg(feature = "testing")]
pub use store::{RecordingStore, StoreCall};
