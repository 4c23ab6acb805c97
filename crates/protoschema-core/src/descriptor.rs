//! In-memory descriptors for protobuf-style message types.
//!
//! Descriptors are plain, owned data. A field never embeds the message it
//! points at; it stores the target's **fully-qualified name** and the
//! [`DescriptorPool`](crate::pool::DescriptorPool) resolves it on demand.
//! That keeps ownership a tree even when the logical type graph is cyclic
//! (`message Node { Node next = 1; }`).
//!
//! All types derive `serde` and `schemars` so a descriptor set can be
//! loaded from JSON and its format published as a schema of its own, see
//! [`crate::schema_util::descriptor_set_schema`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Scalar field types as declared in a `.proto` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl ScalarKind {
    /// JSON Schema primitive name used for this scalar.
    pub fn json_type(self) -> &'static str {
        match self {
            ScalarKind::Double | ScalarKind::Float => "number",
            ScalarKind::Int32
            | ScalarKind::Int64
            | ScalarKind::Uint32
            | ScalarKind::Uint64
            | ScalarKind::Sint32
            | ScalarKind::Sint64
            | ScalarKind::Fixed32
            | ScalarKind::Fixed64
            | ScalarKind::Sfixed32
            | ScalarKind::Sfixed64 => "integer",
            ScalarKind::Bool => "boolean",
            ScalarKind::String | ScalarKind::Bytes => "string",
        }
    }
}

/// What a single field (or a single element of a repeated/map field) holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Fully-qualified name of an enum type.
    Enum(String),
    /// Fully-qualified name of a message type.
    Message(String),
}

/// How many values a field carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Plain proto3 field without explicit presence.
    #[default]
    Singular,
    /// Field with explicit presence (`optional`, or a singular message field).
    Optional,
    /// `repeated` field; the field kind describes one element.
    Repeated,
    /// `map<key, value>` field; the field kind describes the value.
    Map { key: ScalarKind },
}

/// One field of a message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescriptor {
    pub(crate) name: String,
    pub(crate) number: u32,
    pub(crate) kind: FieldKind,
    #[serde(default)]
    pub(crate) cardinality: Cardinality,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            cardinality: Cardinality::Singular,
        }
    }

    /// Shorthand for a singular scalar field.
    ///
    /// ```rust
    /// use protoschema_core::descriptor::{FieldDescriptor, ScalarKind};
    ///
    /// let value = FieldDescriptor::scalar("value", 1, ScalarKind::String);
    /// assert!(!value.is_repeated());
    /// ```
    pub fn scalar(name: impl Into<String>, number: u32, kind: ScalarKind) -> Self {
        Self::new(name, number, FieldKind::Scalar(kind))
    }

    pub fn message(name: impl Into<String>, number: u32, type_name: impl Into<String>) -> Self {
        Self::new(name, number, FieldKind::Message(type_name.into()))
    }

    pub fn enumeration(name: impl Into<String>, number: u32, type_name: impl Into<String>) -> Self {
        Self::new(name, number, FieldKind::Enum(type_name.into()))
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn optional(self) -> Self {
        self.with_cardinality(Cardinality::Optional)
    }

    pub fn repeated(self) -> Self {
        self.with_cardinality(Cardinality::Repeated)
    }

    pub fn map(self, key: ScalarKind) -> Self {
        self.with_cardinality(Cardinality::Map { key })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    pub fn is_optional(&self) -> bool {
        self.cardinality == Cardinality::Optional
    }

    /// Fully-qualified name of the referenced message, if this is a message
    /// field.
    pub fn message_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Message(name) => Some(name),
            _ => None,
        }
    }
}

/// A composite record type: a unique name plus its fields in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MessageDescriptor {
    pub(crate) full_name: String,
    #[serde(default)]
    pub(crate) fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Unqualified name, i.e. the last dotted segment of the full name.
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit('.')
            .next()
            .unwrap_or(self.full_name.as_str())
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// An enum type and its value names in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumDescriptor {
    pub(crate) full_name: String,
    #[serde(default)]
    pub(crate) values: Vec<String>,
}

impl EnumDescriptor {
    pub fn new<I, S>(full_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            full_name: full_name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Canonical spelling of a type name: protobuf's leading dots stripped.
pub(crate) fn normalize_name(name: &str) -> &str {
    name.trim_start_matches('.')
}

/// Serialisable bundle of descriptors, the input format of the pool.
///
/// ```json
/// {
///   "messages": [
///     { "full_name": "test.Leaf",
///       "fields": [ { "name": "value", "number": 1, "kind": { "scalar": "string" } } ] }
///   ],
///   "enums": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DescriptorSet {
    #[serde(default)]
    pub messages: Vec<MessageDescriptor>,
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
}

impl DescriptorSet {
    /// Parse a descriptor set from its JSON text form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
