//! # `protoschema` – The umbrella crate
//!
//! One-stop import for the workspace:
//!
//! | Crate                    | What it provides                                                        |
//! |--------------------------|-------------------------------------------------------------------------|
//! | **`protoschema-core`**   | Descriptors, validated pool, recursion-safe `SchemaGenerator`, errors    |
//! | **`protoschema-openai`** | Strict-mode `tools[]` and `response_format` envelopes *(optional)*      |
//!
//! The `openai` feature (on by default) re-exports the adapter crate as
//! [`openai`]. The `tracing` feature forwards to both crates and emits
//! `debug!`/`trace!` events while schemas are generated.
//!
//! ## Quick example
//!
//! ```rust
//! use protoschema::{
//!     descriptor::{FieldDescriptor, MessageDescriptor, ScalarKind},
//!     DescriptorPool, SchemaGenerator,
//! };
//!
//! let pool = DescriptorPool::builder()
//!     .add_message(
//!         MessageDescriptor::new("test.Post")
//!             .with_field(FieldDescriptor::scalar("tags", 1, ScalarKind::String).repeated()),
//!     )
//!     .build()?;
//!
//! let schema = SchemaGenerator::new(&pool).generate_schema_by_name("test.Post")?;
//! assert_eq!(
//!     serde_json::to_string(&schema)?,
//!     r#"{"type":"object","properties":{"tags":{"type":"array","items":{"type":"string"}}}}"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![doc(html_root_url = "https://docs.rs/protoschema/latest")]

pub use protoschema_core::*;

#[cfg(feature = "openai")]
pub use protoschema_openai as openai;
