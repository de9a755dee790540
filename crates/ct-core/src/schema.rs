//! Native JSON Schema validation for YAML documents
//!
//! Used for chart schemas written as JSON Schema (`*.json`). Schemas in
//! yamale format are handed to the external `yamale` tool instead.

use serde_json::Value as JsonValue;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Compiled JSON Schema
pub struct JsonSchema {
    compiled: jsonschema::Validator,
}

impl JsonSchema {
    /// Compile a schema from a JSON value
    pub fn new(schema: &JsonValue) -> Result<Self> {
        let compiled = jsonschema::validator_for(schema).map_err(|e| CoreError::InvalidSchema {
            message: e.to_string(),
        })?;
        Ok(Self { compiled })
    }

    /// Load and compile a schema file (JSON or YAML syntax)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let schema: JsonValue = if path.as_ref().extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Self::new(&schema)
    }

    /// Validate a document, returning one message per violation
    pub fn violations(&self, document: &JsonValue) -> Vec<String> {
        self.compiled
            .iter_errors(document)
            .map(|e| {
                let path = e.instance_path.to_string();
                let path = if path.is_empty() { "(root)".to_string() } else { path };
                format!("{}: {}", path, e.to_string().replace('"', "'"))
            })
            .collect()
    }

    /// Validate a YAML file against the schema
    pub fn validate_file<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let content = std::fs::read_to_string(file.as_ref())?;
        let document: JsonValue = serde_yaml::from_str(&content)?;

        let violations = self.violations(&document);
        if violations.is_empty() {
            return Ok(());
        }

        Err(CoreError::SchemaViolation {
            file: file.as_ref().display().to_string(),
            details: violations
                .iter()
                .map(|v| format!("  - {}", v))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn chart_schema() -> JsonValue {
        json!({
            "type": "object",
            "required": ["name", "version"],
            "properties": {
                "name": { "type": "string" },
                "version": { "type": "string" },
                "maintainers": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["name"]
                    }
                }
            }
        })
    }

    #[test]
    fn test_valid_document() {
        let schema = JsonSchema::new(&chart_schema()).unwrap();
        let doc = json!({"name": "nginx", "version": "1.0.0"});
        assert!(schema.violations(&doc).is_empty());
    }

    #[test]
    fn test_violations_carry_paths() {
        let schema = JsonSchema::new(&chart_schema()).unwrap();
        let doc = json!({"name": "nginx", "maintainers": [{"email": "a@b.c"}]});
        let violations = schema.violations(&doc);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.starts_with("(root)")));
        assert!(violations.iter().any(|v| v.starts_with("/maintainers/0")));
    }

    #[test]
    fn test_invalid_schema() {
        let err = JsonSchema::new(&json!({"type": 12})).err().unwrap();
        assert!(matches!(err, CoreError::InvalidSchema { .. }));
    }

    #[test]
    fn test_validate_file() {
        let temp = TempDir::new().unwrap();
        let schema_path = temp.path().join("chart_schema.json");
        std::fs::write(&schema_path, chart_schema().to_string()).unwrap();
        let good = temp.path().join("good.yaml");
        std::fs::write(&good, "name: nginx\nversion: 1.0.0\n").unwrap();
        let bad = temp.path().join("bad.yaml");
        std::fs::write(&bad, "name: nginx\n").unwrap();

        let schema = JsonSchema::from_file(&schema_path).unwrap();
        assert!(schema.validate_file(&good).is_ok());

        let err = schema.validate_file(&bad).unwrap_err();
        match err {
            CoreError::SchemaViolation { file, details } => {
                assert!(file.ends_with("bad.yaml"));
                assert!(details.contains("version"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
