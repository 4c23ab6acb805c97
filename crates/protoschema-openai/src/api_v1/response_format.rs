use protoschema_core::SchemaDocument;
use serde::Serialize;
use serde_json::Value;

/// `response_format` value requesting structured output.
///
/// Serialises as
/// `{"type": "json_schema", "json_schema": {"name": .., "schema": .., "strict": true}}`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonSchema { json_schema: JsonSchemaFormat },
}

impl ResponseFormat {
    pub fn json_schema(json_schema: JsonSchemaFormat) -> Self {
        ResponseFormat::JsonSchema { json_schema }
    }

    /// Render as the loosely-typed value request structs usually carry.
    ///
    /// Key order inside the result follows `serde_json`'s map; serialise the
    /// envelope directly when order matters.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct JsonSchemaFormat {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: SchemaDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}
