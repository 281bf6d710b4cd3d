//! Ordered key/value tree shared by persistence and the editor, plus its JSON form.

pub mod element;
pub mod value;

pub use element::SerializerElement;
pub use value::SerializerValue;

use thiserror::Error;

/// Errors raised when converting the tree to or from its persisted JSON text.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("invalid serialized content: {0}")]
    Json(#[from] serde_json::Error),
}
