//! Unified error type exposed by **`protoschema-core`**.
//!
//! The schema generator itself never fails. Errors only surface while a
//! [`DescriptorPool`](crate::pool::DescriptorPool) is assembled, while
//! configuration is read, or when a caller asks for a message by a name the
//! pool does not know. Adapter crates convert their own errors into one of
//! these variants before bubbling them up.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ProtoSchemaError>;

#[derive(Debug, Error)]
pub enum ProtoSchemaError {
    /// Two message descriptors share the same fully-qualified name.
    #[error("message `{full_name}` is defined more than once")]
    DuplicateMessage { full_name: String },

    /// Two enum descriptors share the same fully-qualified name.
    #[error("enum `{full_name}` is defined more than once")]
    DuplicateEnum { full_name: String },

    /// A message declares the same field name or field number twice.
    #[error("message `{message}` declares field `{field}` more than once")]
    DuplicateField { message: String, field: String },

    /// A field points at a message or enum that is not part of the pool.
    #[error("field `{message}.{field}` references unknown type `{target}`")]
    UnresolvedReference {
        message: String,
        field: String,
        target: String,
    },

    /// Lookup of a top-level message by name failed.
    #[error("message `{0}` is not part of the descriptor pool")]
    UnknownMessage(String),

    /// Failure while serialising or deserialising JSON documents.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic forwarding of adapter-specific errors that don’t fit another
    /// category.
    #[error("adapter returned an error: {0}")]
    Adapter(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid: {0}")]
    Invalid(String),
}
