//! Syntactic schema validation
//!
//! Validation runs before fingerprinting or any storage access; a rejected
//! schema never leaves a trace in the registry.

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Schema format accepted by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaFormat {
    /// AVRO schemas (the default, matching Kafka-style pipelines)
    #[default]
    Avro,
    /// JSON Schema definitions
    JsonSchema,
}

/// Validates candidate schema text for a single format
///
/// Deterministic and side-effect-free: the same input always yields the same
/// verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    format: SchemaFormat,
}

impl Validator {
    /// Create a validator for the given format
    pub fn new(format: SchemaFormat) -> Self {
        Self { format }
    }

    /// The format this validator accepts
    pub fn format(&self) -> SchemaFormat {
        self.format
    }

    /// Check that `schema_text` is a syntactically well-formed schema
    pub fn validate(&self, schema_text: &str) -> Result<()> {
        match self.format {
            SchemaFormat::Avro => {
                apache_avro::Schema::parse_str(schema_text)
                    .map_err(|e| RegistryError::InvalidSchema(format!("invalid AVRO schema: {e}")))?;
            }
            SchemaFormat::JsonSchema => {
                let value: serde_json::Value = serde_json::from_str(schema_text)
                    .map_err(|e| RegistryError::InvalidSchema(format!("not valid JSON: {e}")))?;
                jsonschema::JSONSchema::compile(&value).map_err(|e| {
                    RegistryError::InvalidSchema(format!("invalid JSON Schema: {e}"))
                })?;
            }
        }
        Ok(())
    }
}
