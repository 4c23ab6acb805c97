use protoschema_core::{
    descriptor::MessageDescriptor,
    error::{ProtoSchemaError, Result},
    DescriptorPool, SchemaGenerator,
};

use crate::{
    api_v1::{JsonSchemaFormat, ResponseFormat, ToolFunctionSpec, ToolSpec},
    error::OpenAiError,
};

/// OpenAI limits function and schema names to this many characters.
const MAX_NAME_LEN: usize = 64;

/// Wraps message schemas into the envelopes OpenAI expects.
///
/// The adapter owns a [`SchemaGenerator`] bound to one pool with
/// compatibility mode forced on. Names are resolved through the pool; the
/// tool / schema name is the message’s unqualified name.
///
/// ```rust
/// use protoschema_core::descriptor::{FieldDescriptor, MessageDescriptor, ScalarKind};
/// use protoschema_core::DescriptorPool;
/// use protoschema_openai::OpenAiAdapter;
///
/// let pool = DescriptorPool::builder()
///     .add_message(
///         MessageDescriptor::new("weather.GetForecast")
///             .with_field(FieldDescriptor::scalar("city", 1, ScalarKind::String)),
///     )
///     .build()?;
///
/// let tool = OpenAiAdapter::new(&pool).tool("weather.GetForecast", "Forecast for a city")?;
/// assert_eq!(tool.function.name, "GetForecast");
/// assert_eq!(tool.function.strict, Some(true));
/// # Ok::<(), protoschema_core::ProtoSchemaError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OpenAiAdapter<'p> {
    generator: SchemaGenerator<'p>,
}

impl<'p> OpenAiAdapter<'p> {
    pub fn new(pool: &'p DescriptorPool) -> Self {
        Self {
            generator: SchemaGenerator::new(pool).with_compatibility_mode(true),
        }
    }

    /// Function-calling tool whose `parameters` describe `full_name`.
    ///
    /// # Errors
    ///
    /// * [`ProtoSchemaError::UnknownMessage`] – the message is not in the pool.
    /// * [`ProtoSchemaError::Adapter`] – the message name is not a valid
    ///   OpenAI function name.
    pub fn tool(&self, full_name: &str, description: impl Into<String>) -> Result<ToolSpec> {
        let message = self.resolve(full_name)?;
        let name = checked_name(message)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(tool = name, full_name = message.full_name(), "building tool spec");

        Ok(ToolSpec::function(ToolFunctionSpec {
            name: name.to_owned(),
            description: description.into(),
            parameters: self.generator.generate_schema(message),
            strict: Some(true),
        }))
    }

    /// Structured-output `response_format` for `full_name`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::tool`].
    pub fn response_format(&self, full_name: &str) -> Result<ResponseFormat> {
        let message = self.resolve(full_name)?;
        let name = checked_name(message)?;

        Ok(ResponseFormat::json_schema(JsonSchemaFormat {
            name: name.to_owned(),
            description: None,
            schema: self.generator.generate_schema(message),
            strict: Some(true),
        }))
    }

    fn resolve(&self, full_name: &str) -> Result<&'p MessageDescriptor> {
        self.generator
            .pool()
            .message(full_name)
            .ok_or_else(|| ProtoSchemaError::UnknownMessage(full_name.to_owned()))
    }
}

fn checked_name(message: &MessageDescriptor) -> std::result::Result<&str, OpenAiError> {
    let name = message.name();
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(name)
    } else {
        Err(OpenAiError::Format(format!(
            "`{name}` is not a valid function name (a-z, A-Z, 0-9, `_`, `-`, max {MAX_NAME_LEN})"
        )))
    }
}
