pub mod entities;
pub mod launcher;

use faxboard::{Registry, SchemaError};

/// Every entity declared in [`entities`], validated and keyed by route.
pub fn registry() -> Result<Registry, SchemaError> {
    Registry::discover()
}
