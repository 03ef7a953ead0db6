//! Editable layer state for diagram visibility control.
//!
//! [`LayerStore`] owns the layers a user edits: adding, toggling and
//! reordering layers, and managing each layer's filters. Layers round-trip
//! through [`LayerDocument`], a JSON document that is validated in full
//! before an import touches the store.
//!
//! - `store.rs` - the mutable state and its operations
//! - `document.rs` - JSON export and import, atomic file writes
//! - `validate.rs` - path-addressed shape checks for imports
//! - `error.rs` - error types

mod document;
mod error;
mod store;
mod validate;

pub use document::LayerDocument;
pub use error::{ImportError, Result, StoreError, ValidationIssue};
pub use store::{DEFAULT_CONFIGURATION, LayerPatch, LayerStore};
pub use validate::{ImportMode, validate_document};
