//! JSON-Schema-shaped output documents.
//!
//! [`SchemaDocument`] is an insertion-ordered mapping so that `properties`
//! come out in field declaration order, independent of whether
//! `serde_json` was built with `preserve_order`. Values are a closed set of
//! shapes ([`SchemaValue`]) instead of an untyped `serde_json::Value`; the
//! conversion to `Value` happens only at the edge.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};

/// A single value inside a [`SchemaDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaValue {
    /// Only used as the `null` member of a nullable `enum` list.
    Null,
    Bool(bool),
    String(String),
    Document(SchemaDocument),
    Array(Vec<SchemaValue>),
}

impl SchemaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SchemaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&SchemaDocument> {
        match self {
            SchemaValue::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[SchemaValue]> {
        match self {
            SchemaValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for SchemaValue {
    fn from(value: &str) -> Self {
        SchemaValue::String(value.to_owned())
    }
}

impl From<String> for SchemaValue {
    fn from(value: String) -> Self {
        SchemaValue::String(value)
    }
}

impl From<bool> for SchemaValue {
    fn from(value: bool) -> Self {
        SchemaValue::Bool(value)
    }
}

impl From<SchemaDocument> for SchemaValue {
    fn from(value: SchemaDocument) -> Self {
        SchemaValue::Document(value)
    }
}

impl From<Vec<SchemaValue>> for SchemaValue {
    fn from(value: Vec<SchemaValue>) -> Self {
        SchemaValue::Array(value)
    }
}

/// Ordered `key -> value` mapping representing one JSON Schema node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    entries: Vec<(String, SchemaValue)>,
}

impl SchemaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with only a `"type"` entry, e.g. `{"type": "string"}`.
    pub fn of_type(json_type: &str) -> Self {
        Self::new().with("type", json_type)
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SchemaValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SchemaValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&SchemaValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k.as_str() == key).then_some(v))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut SchemaValue> {
        self.entries
            .iter_mut()
            .find_map(|(k, v)| (k.as_str() == key).then_some(v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `"properties"` sub-document, absent when recursion was cut.
    pub fn properties(&self) -> Option<&SchemaDocument> {
        self.get("properties").and_then(SchemaValue::as_document)
    }

    /// Convert into a `serde_json::Value` object.
    pub fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl Serialize for SchemaValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SchemaValue::Null => serializer.serialize_none(),
            SchemaValue::Bool(b) => serializer.serialize_bool(*b),
            SchemaValue::String(s) => serializer.serialize_str(s),
            SchemaValue::Document(doc) => doc.serialize(serializer),
            SchemaValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for SchemaDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl From<&SchemaValue> for Value {
    fn from(value: &SchemaValue) -> Self {
        match value {
            SchemaValue::Null => Value::Null,
            SchemaValue::Bool(b) => Value::Bool(*b),
            SchemaValue::String(s) => Value::String(s.clone()),
            SchemaValue::Document(doc) => Value::from(doc),
            SchemaValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
        }
    }
}

impl From<&SchemaDocument> for Value {
    fn from(doc: &SchemaDocument) -> Self {
        let map: Map<String, Value> = doc
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v)))
            .collect();
        Value::Object(map)
    }
}

impl From<SchemaDocument> for Value {
    fn from(doc: SchemaDocument) -> Self {
        Value::from(&doc)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut doc = SchemaDocument::of_type("string").with("format", "byte");
        doc.insert("type", "integer");

        assert_eq!(doc.keys().collect::<Vec<_>>(), ["type", "format"]);
        assert_eq!(doc.get("type").and_then(SchemaValue::as_str), Some("integer"));
    }

    #[test]
    fn serializes_in_insertion_order() {
        let doc = SchemaDocument::new()
            .with("zeta", true)
            .with("alpha", SchemaDocument::of_type("string"))
            .with(
                "mid",
                vec![SchemaValue::from("string"), SchemaValue::Null],
            );

        let text = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            text,
            r#"{"zeta":true,"alpha":{"type":"string"},"mid":["string",null]}"#
        );
    }

    #[test]
    fn converts_into_json_value() {
        let doc = SchemaDocument::of_type("object")
            .with("properties", SchemaDocument::new())
            .with("additionalProperties", false);

        assert_eq!(
            doc.to_value(),
            json!({"type": "object", "properties": {}, "additionalProperties": false})
        );
        assert!(doc.properties().unwrap().is_empty());
    }
}
