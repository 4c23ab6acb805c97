use std::env;

use crate::{
    error::{ProtoSchemaError, Result},
    generator::SchemaGenerator,
    pool::DescriptorPool,
};

/// Environment variable consulted by [`SchemaGeneratorBuilder::new_from_env`].
pub const COMPATIBILITY_MODE_ENV: &str = "PROTOSCHEMA_COMPATIBILITY_MODE";

/// Builder for [`SchemaGenerator`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use protoschema_core::config::SchemaGeneratorBuilder;
/// use protoschema_core::pool::DescriptorPool;
///
/// let pool = DescriptorPool::default();
/// let generator = SchemaGeneratorBuilder::new_from_env()
///     .build(&pool)
///     .expect("PROTOSCHEMA_COMPATIBILITY_MODE must be a boolean");
/// ```
///
/// An explicit [`Self::compatibility_mode`] call wins over the environment.
#[derive(Debug, Clone, Default)]
pub struct SchemaGeneratorBuilder {
    pub(crate) compatibility_mode: Option<bool>,
    pub(crate) env_value: Option<String>,
}

impl SchemaGeneratorBuilder {
    /// Create an *empty* builder; compatibility mode defaults to off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that picks up `PROTOSCHEMA_COMPATIBILITY_MODE`.
    ///
    /// # Panics
    ///
    /// Never panics. Unparseable values only surface during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self::from_env_value(env::var(COMPATIBILITY_MODE_ENV).ok())
    }

    pub(crate) fn from_env_value(env_value: Option<String>) -> Self {
        Self {
            compatibility_mode: None,
            env_value,
        }
    }

    /// Switch the OpenAI strict dialect on or off.
    pub fn compatibility_mode(mut self, enabled: bool) -> Self {
        self.compatibility_mode = Some(enabled);
        self
    }

    /// Finalise the builder and bind the generator to `pool`.
    ///
    /// # Errors
    ///
    /// * [`ProtoSchemaError::Invalid`] – the environment value is not a
    ///   recognised boolean.
    pub fn build(self, pool: &DescriptorPool) -> Result<SchemaGenerator<'_>> {
        let compatibility_mode = match (self.compatibility_mode, self.env_value) {
            (Some(explicit), _) => explicit,
            (None, Some(raw)) => parse_flag(&raw)?,
            (None, None) => false,
        };

        Ok(SchemaGenerator::new(pool).with_compatibility_mode(compatibility_mode))
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ProtoSchemaError::Invalid(format!(
            "`{COMPATIBILITY_MODE_ENV}` must be a boolean, got `{raw}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_plain_dialect() {
        let pool = DescriptorPool::default();
        let generator = SchemaGeneratorBuilder::new().build(&pool).unwrap();
        assert!(!generator.compatibility_mode());
    }

    #[test]
    fn env_value_is_parsed() {
        let pool = DescriptorPool::default();
        for (raw, expected) in [("true", true), (" ON ", true), ("1", true), ("no", false)] {
            let generator = SchemaGeneratorBuilder::from_env_value(Some(raw.into()))
                .build(&pool)
                .unwrap();
            assert_eq!(generator.compatibility_mode(), expected, "value {raw:?}");
        }
    }

    #[test]
    fn explicit_setting_overrides_env() {
        let pool = DescriptorPool::default();
        let generator = SchemaGeneratorBuilder::from_env_value(Some("garbage".into()))
            .compatibility_mode(true)
            .build(&pool)
            .unwrap();
        assert!(generator.compatibility_mode());
    }

    #[test]
    fn new_from_env_reads_variable() {
        let pool = DescriptorPool::default();

        env::set_var(COMPATIBILITY_MODE_ENV, "true");
        let enabled = SchemaGeneratorBuilder::new_from_env().build(&pool);
        env::set_var(COMPATIBILITY_MODE_ENV, "off");
        let disabled = SchemaGeneratorBuilder::new_from_env().build(&pool);
        env::remove_var(COMPATIBILITY_MODE_ENV);
        let unset = SchemaGeneratorBuilder::new_from_env().build(&pool);

        assert!(enabled.unwrap().compatibility_mode());
        assert!(!disabled.unwrap().compatibility_mode());
        assert!(!unset.unwrap().compatibility_mode());
    }

    #[test]
    fn garbage_env_value_is_invalid() {
        let pool = DescriptorPool::default();
        let err = SchemaGeneratorBuilder::from_env_value(Some("maybe".into()))
            .build(&pool)
            .unwrap_err();
        assert!(matches!(err, ProtoSchemaError::Invalid(_)));
    }
}
