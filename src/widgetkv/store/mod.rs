//! # Storage Layer
//!
//! The [`AttributeStore`] trait hides where the attribute map of a scope lives.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One JSON document per scope, `attributes.json` unless configured otherwise
//!   - A missing document reads as an empty map
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! .widgetkv/
//! ├── attributes.json     # { widget: { field: [ {id|value, label}, ... ] } }
//! └── config.json         # Scope configuration
//! ```
//!
//! The whole map is read and written at once; documents hold a handful of
//! widgets, not thousands.

use crate::error::Result;
use crate::model::{AttributeMap, Scope};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface for attribute map storage.
pub trait AttributeStore {
    /// Load the attribute map of a scope (empty if nothing was saved yet)
    fn load(&self, scope: Scope) -> Result<AttributeMap>;

    /// Replace the stored attribute map of a scope
    fn save(&mut self, scope: Scope, map: &AttributeMap) -> Result<()>;

    /// Location of the scope's document (for file-based stores)
    fn document_path(&self, scope: Scope) -> Result<PathBuf>;
}
