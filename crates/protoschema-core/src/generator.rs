//! Recursive descriptor → JSON Schema conversion.
//!
//! The walk is bounded by a [`VisitedSet`] of message full names. A message
//! is recorded the first time it is expanded and is **never removed** for the
//! rest of that top-level call. Any later reference to it, whether it sits
//! on a genuine cycle (`Node.next -> Node`) or merely on a sibling branch
//! (`Person.home: Address`, `Person.work: Address`), yields the placeholder
//! `{"type": "object"}` without `"properties"`.
//!
//! In other words this is per-invocation memoization of the first expansion,
//! not strict cycle detection. It guarantees that recursion depth is bounded
//! by the number of distinct message names reachable from the root.
//!
//! A cycle-only variant would clone the set for every sibling and remove the
//! name again on return. That produces full expansions for repeated
//! non-recursive references at the cost of exponential output on wide,
//! shared type graphs. It is not implemented.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    config::SchemaGeneratorBuilder,
    descriptor::{
        normalize_name, Cardinality, FieldDescriptor, FieldKind, MessageDescriptor, ScalarKind,
    },
    document::{SchemaDocument, SchemaValue},
    error::{ProtoSchemaError, Result},
    pool::DescriptorPool,
};

/// Message full names already expanded during one top-level invocation.
///
/// Insert-only: membership is a one-way latch per name. Create a fresh set
/// for every top-level call and never share one between concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    names: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `full_name`. Returns `false` if it was already present.
    pub fn insert(&mut self, full_name: &str) -> bool {
        let name = normalize_name(full_name);
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_owned())
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.names
            .contains(normalize_name(full_name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Converts message descriptors from a [`DescriptorPool`] into
/// [`SchemaDocument`]s.
///
/// The generator holds no per-call state; the only mutable state is the
/// [`VisitedSet`] passed through a single invocation. It can therefore be
/// copied and used from many threads at once.
///
/// With `compatibility_mode` enabled the output follows OpenAI’s strict
/// structured-output dialect:
///
/// * every expanded object lists all of its properties under `"required"` and
///   sets `"additionalProperties": false`,
/// * fields with explicit presence are encoded as a type union with `"null"`
///   instead of being left out of `"required"`,
/// * enum fields carry their value names under `"enum"`,
/// * map fields become arrays of closed `{key, value}` entry objects.
///
/// The recursion guard behaves identically in both modes.
#[derive(Debug, Clone, Copy)]
pub struct SchemaGenerator<'p> {
    pool: &'p DescriptorPool,
    compatibility_mode: bool,
}

impl<'p> SchemaGenerator<'p> {
    /// Generator with default settings (compatibility mode off).
    pub fn new(pool: &'p DescriptorPool) -> Self {
        Self {
            pool,
            compatibility_mode: false,
        }
    }

    /// See [`SchemaGeneratorBuilder`] for environment-driven configuration.
    pub fn builder() -> SchemaGeneratorBuilder {
        SchemaGeneratorBuilder::new()
    }

    pub fn with_compatibility_mode(mut self, enabled: bool) -> Self {
        self.compatibility_mode = enabled;
        self
    }

    pub fn compatibility_mode(&self) -> bool {
        self.compatibility_mode
    }

    pub fn pool(&self) -> &'p DescriptorPool {
        self.pool
    }

    /// Schema for `descriptor`, starting from an empty [`VisitedSet`].
    ///
    /// ```rust
    /// use protoschema_core::descriptor::{FieldDescriptor, MessageDescriptor, ScalarKind};
    /// use protoschema_core::generator::SchemaGenerator;
    /// use protoschema_core::pool::DescriptorPool;
    ///
    /// let pool = DescriptorPool::builder()
    ///     .add_message(
    ///         MessageDescriptor::new("test.Leaf")
    ///             .with_field(FieldDescriptor::scalar("value", 1, ScalarKind::String)),
    ///     )
    ///     .build()
    ///     .unwrap();
    ///
    /// let leaf = pool.message("test.Leaf").unwrap();
    /// let schema = SchemaGenerator::new(&pool).generate_schema(leaf);
    ///
    /// assert_eq!(
    ///     serde_json::to_string(&schema).unwrap(),
    ///     r#"{"type":"object","properties":{"value":{"type":"string"}}}"#
    /// );
    /// ```
    pub fn generate_schema(&self, descriptor: &MessageDescriptor) -> SchemaDocument {
        self.message_schema(descriptor, &mut VisitedSet::new())
    }

    /// Like [`Self::generate_schema`], looking the message up by name.
    ///
    /// # Errors
    ///
    /// * [`ProtoSchemaError::UnknownMessage`] – `full_name` is not in the pool.
    pub fn generate_schema_by_name(&self, full_name: &str) -> Result<SchemaDocument> {
        let descriptor = self
            .pool
            .message(full_name)
            .ok_or_else(|| ProtoSchemaError::UnknownMessage(full_name.to_owned()))?;
        Ok(self.generate_schema(descriptor))
    }

    /// [`Self::generate_schema`] converted into a `serde_json::Value`.
    pub fn generate_value(&self, descriptor: &MessageDescriptor) -> Value {
        self.generate_schema(descriptor).into()
    }

    /// Object schema for one message type.
    ///
    /// Returns `{"type": "object"}` without `"properties"` if the message was
    /// already expanded in this invocation; otherwise records it in
    /// `visited` and expands every field in declaration order.
    pub fn message_schema(
        &self,
        descriptor: &MessageDescriptor,
        visited: &mut VisitedSet,
    ) -> SchemaDocument {
        let full_name = descriptor.full_name();
        if !visited.insert(full_name) {
            #[cfg(feature = "tracing")]
            tracing::debug!(full_name, "already expanded, emitting placeholder");
            return SchemaDocument::of_type("object");
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            full_name,
            fields = descriptor.fields().len(),
            "expanding message"
        );

        let mut properties = SchemaDocument::new();
        for field in descriptor.fields() {
            properties.insert(field.name(), self.field_schema(field, visited));
        }

        let mut schema = SchemaDocument::of_type("object").with("properties", properties);
        if self.compatibility_mode {
            let required: Vec<SchemaValue> = descriptor
                .fields()
                .iter()
                .map(|field| SchemaValue::from(field.name()))
                .collect();
            schema.insert("required", required);
            schema.insert("additionalProperties", false);
        }
        schema
    }

    /// Schema fragment for one field, recursing into message references with
    /// the same `visited` set.
    pub fn field_schema(&self, field: &FieldDescriptor, visited: &mut VisitedSet) -> SchemaDocument {
        match field.cardinality() {
            Cardinality::Singular => self.kind_schema(field.kind(), false, visited),
            Cardinality::Optional => {
                self.kind_schema(field.kind(), self.compatibility_mode, visited)
            }
            Cardinality::Repeated => SchemaDocument::of_type("array")
                .with("items", self.kind_schema(field.kind(), false, visited)),
            Cardinality::Map { key } if self.compatibility_mode => {
                self.map_entries_schema(key, field.kind(), visited)
            }
            // JSON object keys are strings whatever the proto key type is.
            Cardinality::Map { .. } => SchemaDocument::of_type("object").with(
                "additionalProperties",
                self.kind_schema(field.kind(), false, visited),
            ),
        }
    }

    /// Strict objects must close with `"additionalProperties": false`, so a
    /// map is sent as a list of `{key, value}` entries instead.
    fn map_entries_schema(
        &self,
        key: ScalarKind,
        value: &FieldKind,
        visited: &mut VisitedSet,
    ) -> SchemaDocument {
        let properties = SchemaDocument::new()
            .with("key", scalar_schema(key))
            .with("value", self.kind_schema(value, false, visited));
        let entry = SchemaDocument::of_type("object")
            .with("properties", properties)
            .with(
                "required",
                vec![SchemaValue::from("key"), SchemaValue::from("value")],
            )
            .with("additionalProperties", false);

        SchemaDocument::of_type("array").with("items", entry)
    }

    fn kind_schema(
        &self,
        kind: &FieldKind,
        nullable: bool,
        visited: &mut VisitedSet,
    ) -> SchemaDocument {
        let mut schema = match kind {
            FieldKind::Scalar(scalar) => scalar_schema(*scalar),
            FieldKind::Enum(full_name) => self.enum_schema(full_name),
            FieldKind::Message(full_name) => match self.pool.message(full_name) {
                Some(message) => self.message_schema(message, visited),
                // Only reachable for descriptors assembled outside the pool.
                None => SchemaDocument::of_type("object"),
            },
        };

        let placeholder = matches!(kind, FieldKind::Message(_)) && schema.properties().is_none();
        if nullable && !placeholder {
            make_nullable(&mut schema);
        }
        schema
    }

    fn enum_schema(&self, full_name: &str) -> SchemaDocument {
        let schema = SchemaDocument::of_type("string");
        if !self.compatibility_mode {
            return schema;
        }

        match self.pool.enumeration(full_name) {
            Some(descriptor) if !descriptor.values().is_empty() => {
                let values: Vec<SchemaValue> = descriptor
                    .values()
                    .iter()
                    .map(|value| SchemaValue::from(value.as_str()))
                    .collect();
                schema.with("enum", values)
            }
            _ => schema,
        }
    }
}

fn scalar_schema(kind: ScalarKind) -> SchemaDocument {
    let schema = SchemaDocument::of_type(kind.json_type());
    match kind {
        ScalarKind::Bytes => schema.with("contentEncoding", "base64"),
        _ => schema,
    }
}

/// `"type": T` becomes `"type": [T, "null"]`; an `"enum"` list gains `null`.
fn make_nullable(schema: &mut SchemaDocument) {
    if let Some(SchemaValue::String(json_type)) = schema.get("type").cloned() {
        schema.insert(
            "type",
            vec![SchemaValue::String(json_type), SchemaValue::from("null")],
        );
    }
    if let Some(SchemaValue::Array(values)) = schema.get_mut("enum") {
        values.push(SchemaValue::Null);
    }
}
