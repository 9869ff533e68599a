//! Extension store access.
//!
//! Extensions are schema-described attribute tables keyed by network
//! element id, managed by the engine next to the core topology data. The
//! schema registry is introspection only: it documents each extension
//! type's attributes but is not enforced on the data path.

use crate::Network;
use gridlink_core::{GridError, GridResult};
use gridlink_engine::{ExtensionSchema, Table};
use tracing::debug;

impl Network {
    /// Names of every extension type the engine knows about.
    pub fn extension_names(&self) -> GridResult<Vec<String>> {
        Ok(self
            .backend()
            .extension_schemas()?
            .into_iter()
            .map(|s| s.name)
            .collect())
    }

    /// Schema of one extension type: description plus ordered attributes.
    pub fn extension_schema(&self, name: &str) -> GridResult<ExtensionSchema> {
        self.backend()
            .extension_schemas()?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| GridError::not_found("extension type", name))
    }

    /// All rows of one extension type, keyed by element id. Empty table
    /// when no element carries the extension.
    pub fn get_extensions(&self, name: &str) -> GridResult<Table> {
        self.backend().get_extensions(self.handle(), name)
    }

    /// Attach extension rows to elements; the table index holds the element
    /// ids. Existing rows for the same ids are replaced.
    pub fn create_extensions(&self, name: &str, rows: &Table) -> GridResult<()> {
        debug!(extension = name, rows = rows.len(), "creating extensions");
        self.backend().create_extensions(self.handle(), name, rows)
    }

    /// Update attributes of existing rows. A row id without an existing
    /// extension is a not-found error.
    pub fn update_extensions(&self, name: &str, rows: &Table) -> GridResult<()> {
        debug!(extension = name, rows = rows.len(), "updating extensions");
        self.backend().update_extensions(self.handle(), name, rows)
    }

    /// Remove the extension from the given elements; ids without a row are
    /// ignored.
    pub fn remove_extensions(&self, name: &str, element_ids: &[String]) -> GridResult<()> {
        debug!(extension = name, count = element_ids.len(), "removing extensions");
        self.backend().remove_extensions(self.handle(), name, element_ids)
    }
}
