use protoschema_core::SchemaDocument;
use serde::{Deserialize, Serialize};

/// A `tools[]` entry of a chat-completions request.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ToolSpec {
    pub r#type: ToolType,
    pub function: ToolFunctionSpec,
}

impl ToolSpec {
    pub fn function(function: ToolFunctionSpec) -> Self {
        Self {
            r#type: ToolType::Function,
            function,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ToolFunctionSpec {
    pub name: String,
    pub description: String,
    /// Kept as a [`SchemaDocument`] so properties serialise in field order.
    pub parameters: SchemaDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    Function,
}
