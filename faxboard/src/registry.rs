use crate::error::SchemaError;
use crate::schema::EntitySchema;
use std::collections::BTreeMap;

/// Implemented by `#[derive(Form)]`.
pub trait FormEntity {
    fn schema() -> &'static EntitySchema;
}

/// Link-time registration of a derived schema, collected by [`Registry::discover`].
pub struct FormInfo {
    pub name: &'static str,
    pub schema_fn: fn() -> &'static EntitySchema,
}

inventory::collect!(FormInfo);

/// All schemas served by one dashboard, keyed by route segment.
#[derive(Debug, Default)]
pub struct Registry {
    schemas: BTreeMap<&'static str, &'static EntitySchema>,
}

impl Registry {
    pub fn discover() -> Result<Self, SchemaError> {
        Self::from_schemas(inventory::iter::<FormInfo>.into_iter().map(|info| (info.schema_fn)()))
    }

    pub fn from_schemas<I>(schemas: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = &'static EntitySchema>,
    {
        let mut registry = Registry::default();
        for schema in schemas {
            schema.validate()?;
            if registry.schemas.insert(schema.route, schema).is_some() {
                return Err(SchemaError::DuplicateRoute(schema.route));
            }
        }
        Ok(registry)
    }

    pub fn get(&self, route: &str) -> Option<&'static EntitySchema> {
        self.schemas.get(route).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static EntitySchema> + '_ {
        self.schemas.values().copied()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
