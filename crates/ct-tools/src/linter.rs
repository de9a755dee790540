//! YAML lint and schema validators

use ct_core::JsonSchema;
use std::path::Path;

use crate::error::Result;
use crate::exec::ProcessExecutor;

/// YAML syntax and style checking
pub trait YamlLintValidator {
    /// Lint `file`, with an optional yamllint configuration
    fn validate(&self, file: &Path, config: Option<&Path>) -> Result<()>;
}

/// Schema validation of chart descriptors
pub trait SchemaValidator {
    /// Validate `file` against `schema`
    fn validate(&self, file: &Path, schema: &Path) -> Result<()>;
}

/// [`YamlLintValidator`] backed by the `yamllint` binary
#[derive(Debug, Clone, Default)]
pub struct Yamllint {
    exec: ProcessExecutor,
}

impl Yamllint {
    pub fn new() -> Self {
        Self::default()
    }
}

impl YamlLintValidator for Yamllint {
    fn validate(&self, file: &Path, config: Option<&Path>) -> Result<()> {
        tracing::info!("Linting '{}'...", file.display());
        let mut args = Vec::new();
        if let Some(config) = config {
            args.push("--config-file".to_string());
            args.push(config.display().to_string());
        }
        args.push(file.display().to_string());
        self.exec.run_process("yamllint", args)
    }
}

/// [`SchemaValidator`] choosing the engine from the schema file
///
/// `*.json` schemas are JSON Schema and validated natively; anything else is
/// a yamale schema and handed to the `yamale` binary.
#[derive(Debug, Clone, Default)]
pub struct ChartSchemaValidator {
    exec: ProcessExecutor,
}

impl ChartSchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaValidator for ChartSchemaValidator {
    fn validate(&self, file: &Path, schema: &Path) -> Result<()> {
        tracing::info!(
            "Validating '{}' against schema '{}'...",
            file.display(),
            schema.display()
        );

        if is_json_schema(schema) {
            JsonSchema::from_file(schema)?.validate_file(file)?;
            return Ok(());
        }

        self.exec.run_process(
            "yamale",
            [
                "--schema".to_string(),
                schema.display().to_string(),
                file.display().to_string(),
            ],
        )
    }
}

fn is_json_schema(schema: &Path) -> bool {
    schema.extension().is_some_and(|ext| ext == "json")
}
