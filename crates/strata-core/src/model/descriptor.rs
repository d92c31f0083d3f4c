use super::{Identity, Mapper};
use crate::{Error, Result};

use std::sync::Arc;

/// Names the table, collection or index a model is bound to.
///
/// ```
/// use strata_core::Descriptor;
///
/// let users = Descriptor::new("users").with_id_attribute("user_id");
/// assert_eq!(users.table_name(), "users");
/// ```
#[derive(Debug, Clone)]
pub struct Descriptor {
    table_name: String,

    /// The search engine's type dimension. Required there, ignored elsewhere.
    table_type: Option<String>,

    /// Document store only: the value of this field is moved into `_id`.
    id_attribute: Option<String>,

    mapper: Arc<dyn Mapper>,
}

impl Descriptor {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table_type: None,
            id_attribute: None,
            mapper: Arc::new(Identity),
        }
    }

    pub fn with_table_type(mut self, table_type: impl Into<String>) -> Self {
        self.table_type = Some(table_type.into());
        self
    }

    pub fn with_id_attribute(mut self, id_attribute: impl Into<String>) -> Self {
        self.id_attribute = Some(id_attribute.into());
        self
    }

    /// Installs the mapping between application and wire shapes.
    pub fn with_mapper(mut self, mapper: impl Mapper) -> Self {
        self.mapper = Arc::new(mapper);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn table_type(&self) -> Option<&str> {
        self.table_type.as_deref()
    }

    pub fn id_attribute(&self) -> Option<&str> {
        self.id_attribute.as_deref()
    }

    pub fn mapper(&self) -> &dyn Mapper {
        &*self.mapper
    }

    /// Checks the fields every backend needs. `require_type` is set by the
    /// search engine.
    pub fn validate(&self, require_type: bool) -> Result<()> {
        if self.table_name.trim().is_empty() {
            return Err(Error::configuration("tableName must be defined"));
        }

        let has_type = matches!(self.table_type(), Some(ty) if !ty.trim().is_empty());
        if require_type && !has_type {
            return Err(Error::configuration("tableType must be defined"));
        }

        Ok(())
    }
}
