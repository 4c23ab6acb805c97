use protoschema_core::error::ProtoSchemaError;

/// Errors raised while wrapping a schema into an OpenAI envelope.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("OpenAI format error: {0}")]
    Format(String),
}

impl From<OpenAiError> for ProtoSchemaError {
    fn from(value: OpenAiError) -> Self {
        ProtoSchemaError::Adapter(Box::new(value))
    }
}
