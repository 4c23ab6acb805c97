//! Provider-agnostic core of **protoschema**: a descriptor model for
//! protobuf-style message types and a generator that turns them into
//! JSON Schema, terminating on self-referential and mutually-recursive
//! type graphs.
//!
//! ```rust
//! use protoschema_core::{
//!     descriptor::{FieldDescriptor, MessageDescriptor, ScalarKind},
//!     generator::SchemaGenerator,
//!     pool::DescriptorPool,
//! };
//!
//! let pool = DescriptorPool::builder()
//!     .add_message(
//!         MessageDescriptor::new("test.RecursiveNode")
//!             .with_field(FieldDescriptor::scalar("value", 1, ScalarKind::String))
//!             .with_field(FieldDescriptor::message("next", 2, "test.RecursiveNode")),
//!     )
//!     .build()?;
//!
//! let schema = SchemaGenerator::new(&pool).generate_schema_by_name("test.RecursiveNode")?;
//! let next = schema.properties().and_then(|p| p.get("next")).unwrap();
//! assert!(next.as_document().unwrap().properties().is_none());
//! # Ok::<(), protoschema_core::error::ProtoSchemaError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod generator;
pub mod pool;
pub mod schema_util;

pub use config::SchemaGeneratorBuilder;
pub use document::{SchemaDocument, SchemaValue};
pub use error::{ProtoSchemaError, Result};
pub use generator::{SchemaGenerator, VisitedSet};
pub use pool::DescriptorPool;
