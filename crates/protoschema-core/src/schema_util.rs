//! Helpers for publishing the JSON Schema of the *input* format, i.e. of
//! [`DescriptorSet`]. Tools that hand-write or emit descriptor sets can
//! validate them against this schema before feeding them to the pool.
//!
//! The schema is produced with [`schemars`] from the same types the pool
//! deserialises, so the two cannot drift apart.

use schemars::{r#gen::SchemaSettings, JsonSchema};
use serde_json::Value;

use crate::{descriptor::DescriptorSet, error::Result};

/// Generate a JSON Schema for the given `T` **inline**, i.e. without
/// `$ref` pointers to external definitions.
///
/// `T` must not be recursive; inlining a self-referential type never ends.
pub fn inline_schema_for<T>() -> Result<Value>
where
    T: JsonSchema + 'static,
{
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let root = generator.into_root_schema_for::<T>();

    Ok(serde_json::to_value(root)?)
}

/// JSON Schema of the [`DescriptorSet`] JSON format.
///
/// ```
/// use protoschema_core::schema_util::descriptor_set_schema;
///
/// let schema = descriptor_set_schema().unwrap();
/// assert_eq!(schema["title"], "DescriptorSet");
/// ```
pub fn descriptor_set_schema() -> Result<Value> {
    inline_schema_for::<DescriptorSet>()
}
