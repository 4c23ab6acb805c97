//! Validated lookup table of message and enum descriptors.
//!
//! The generator walks fields by *name*, so every reference must resolve.
//! [`DescriptorPool`] checks that once, at construction time; afterwards
//! all lookups of referenced types are guaranteed to succeed.
//!
//! Names are stored without protobuf’s leading dot, so `.test.Node` and
//! `test.Node` refer to the same type.

use std::collections::{HashMap, HashSet};

use crate::{
    descriptor::{normalize_name, DescriptorSet, EnumDescriptor, FieldKind, MessageDescriptor},
    error::{ProtoSchemaError, Result},
};

/// Immutable, validated set of descriptors keyed by fully-qualified name.
///
/// The pool is read-only after construction and can be shared freely
/// between threads and concurrent generator invocations.
#[derive(Debug, Clone, Default)]
pub struct DescriptorPool {
    messages: HashMap<String, MessageDescriptor>,
    enums: HashMap<String, EnumDescriptor>,
}

impl DescriptorPool {
    /// Start an empty [`DescriptorPoolBuilder`].
    pub fn builder() -> DescriptorPoolBuilder {
        DescriptorPoolBuilder::default()
    }

    /// Validate `set` and index it by name.
    ///
    /// # Errors
    ///
    /// * [`ProtoSchemaError::Invalid`] – a descriptor has an empty name.
    /// * [`ProtoSchemaError::DuplicateMessage`] / [`ProtoSchemaError::DuplicateEnum`]
    ///   – a full name is used twice.
    /// * [`ProtoSchemaError::DuplicateField`] – a message repeats a field
    ///   name or field number.
    /// * [`ProtoSchemaError::UnresolvedReference`] – a field targets a type
    ///   missing from the set.
    pub fn from_set(set: DescriptorSet) -> Result<Self> {
        let mut messages = HashMap::with_capacity(set.messages.len());
        for mut message in set.messages {
            message.full_name = normalize(&message.full_name);
            if message.full_name.is_empty() {
                return Err(ProtoSchemaError::Invalid(
                    "message descriptor without a name".into(),
                ));
            }
            for field in &mut message.fields {
                match &mut field.kind {
                    FieldKind::Message(target) | FieldKind::Enum(target) => {
                        *target = normalize(target);
                    }
                    FieldKind::Scalar(_) => {}
                }
            }
            check_fields(&message)?;

            if messages.contains_key(&message.full_name) {
                return Err(ProtoSchemaError::DuplicateMessage {
                    full_name: message.full_name,
                });
            }
            messages.insert(message.full_name.clone(), message);
        }

        let mut enums = HashMap::with_capacity(set.enums.len());
        for mut descriptor in set.enums {
            descriptor.full_name = normalize(&descriptor.full_name);
            if descriptor.full_name.is_empty() {
                return Err(ProtoSchemaError::Invalid(
                    "enum descriptor without a name".into(),
                ));
            }
            if enums.contains_key(&descriptor.full_name) {
                return Err(ProtoSchemaError::DuplicateEnum {
                    full_name: descriptor.full_name,
                });
            }
            enums.insert(descriptor.full_name.clone(), descriptor);
        }

        let pool = Self { messages, enums };
        pool.check_references()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            messages = pool.messages.len(),
            enums = pool.enums.len(),
            "descriptor pool built"
        );

        Ok(pool)
    }

    /// Parse a JSON descriptor set and validate it in one go.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_set(DescriptorSet::from_json_str(json)?)
    }

    /// Look up a message by fully-qualified name (leading dot optional).
    pub fn message(&self, full_name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(normalize_name(full_name))
    }

    /// Look up an enum by fully-qualified name (leading dot optional).
    pub fn enumeration(&self, full_name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(normalize_name(full_name))
    }

    pub fn messages(&self) -> impl Iterator<Item = &MessageDescriptor> {
        self.messages.values()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn check_references(&self) -> Result<()> {
        for message in self.messages.values() {
            for field in message.fields() {
                let target = match field.kind() {
                    FieldKind::Scalar(_) => continue,
                    FieldKind::Message(target) if self.messages.contains_key(target) => continue,
                    FieldKind::Enum(target) if self.enums.contains_key(target) => continue,
                    FieldKind::Message(target) | FieldKind::Enum(target) => target,
                };
                return Err(ProtoSchemaError::UnresolvedReference {
                    message: message.full_name().to_owned(),
                    field: field.name().to_owned(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }
}

impl TryFrom<DescriptorSet> for DescriptorPool {
    type Error = ProtoSchemaError;

    fn try_from(value: DescriptorSet) -> Result<Self> {
        Self::from_set(value)
    }
}

/// Collects descriptors before validating them into a [`DescriptorPool`].
///
/// ```rust
/// use protoschema_core::descriptor::{FieldDescriptor, MessageDescriptor, ScalarKind};
/// use protoschema_core::pool::DescriptorPool;
///
/// let pool = DescriptorPool::builder()
///     .add_message(
///         MessageDescriptor::new("test.Leaf")
///             .with_field(FieldDescriptor::scalar("value", 1, ScalarKind::String)),
///     )
///     .build()
///     .expect("valid descriptors");
///
/// assert!(pool.message(".test.Leaf").is_some());
/// ```
#[derive(Debug, Default)]
pub struct DescriptorPoolBuilder {
    set: DescriptorSet,
}

impl DescriptorPoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(mut self, message: MessageDescriptor) -> Self {
        self.set.messages.push(message);
        self
    }

    pub fn add_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.set.enums.push(descriptor);
        self
    }

    /// Validate everything added so far, see [`DescriptorPool::from_set`].
    pub fn build(self) -> Result<DescriptorPool> {
        DescriptorPool::from_set(self.set)
    }
}

fn normalize(name: &str) -> String {
    normalize_name(name).to_owned()
}

fn check_fields(message: &MessageDescriptor) -> Result<()> {
    let mut names = HashSet::new();
    let mut numbers = HashSet::new();
    for field in message.fields() {
        if !names.insert(field.name()) || !numbers.insert(field.number()) {
            return Err(ProtoSchemaError::DuplicateField {
                message: message.full_name().to_owned(),
                field: field.name().to_owned(),
            });
        }
    }
    Ok(())
}
