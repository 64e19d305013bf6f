//! Named signatures loaded from YAML, JSON, or shorthand.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::parser::{parse_expectations, render_expectations, Expectation, ExpectationError};
use super::schema::validate_signature_schema;

/// Errors that can occur when loading signatures.
#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Failed to read signature file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Signature does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid expectation: {0}")]
    ExpectationError(#[from] ExpectationError),
}

/// A named, ordered list of argument expectations.
///
/// ```yaml
/// name: "greet"
/// expects:
///   - string
///   - "number|boolean"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    /// Function name, used when rendering the signature
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Raw expectation strings, one per position
    pub expects: Vec<String>,

    #[serde(skip)]
    compiled: Vec<Expectation>,
}

impl Signature {
    /// Build a signature from expectation strings.
    pub fn new<I, S>(name: impl Into<String>, expects: I) -> Result<Self, SignatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            expects: expects.into_iter().map(Into::into).collect(),
            compiled: Vec::new(),
        }
        .compile()
    }

    /// Build a signature from a comma-separated shorthand such as
    /// `"string|number, object, *"`.
    pub fn from_shorthand(
        name: impl Into<String>,
        shorthand: &str,
    ) -> Result<Self, SignatureError> {
        let expects: Vec<&str> = if shorthand.trim().is_empty() {
            Vec::new()
        } else {
            shorthand.split(',').map(str::trim).collect()
        };
        Self::new(name, expects)
    }

    /// Parse a signature from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SignatureError> {
        let document: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_document(document)
    }

    /// Parse a signature from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SignatureError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Parse a signature from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SignatureError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a signature from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SignatureError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn from_document(document: serde_json::Value) -> Result<Self, SignatureError> {
        validate_signature_schema(&document).map_err(SignatureError::SchemaError)?;
        let signature: Signature = serde_json::from_value(document)?;
        signature.compile()
    }

    fn compile(mut self) -> Result<Self, SignatureError> {
        if self.name.trim().is_empty() {
            return Err(SignatureError::MissingField("name".to_string()));
        }
        self.compiled = parse_expectations(&self.expects)?;
        tracing::debug!(signature = %self.render(), "Signature compiled");
        Ok(self)
    }

    /// Parsed expectations, one per position.
    pub fn expectations(&self) -> &[Expectation] {
        &self.compiled
    }

    pub fn arity(&self) -> usize {
        self.compiled.len()
    }

    /// Render as `name(e1, e2, ...)`.
    pub fn render(&self) -> String {
        format!("{}({})", self.name, render_expectations(&self.compiled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectation::TypeTag;

    const VALID_SIGNATURE: &str = r#"
name: "greet"
description: "Greets a person a number of times"
expects:
  - string
  - "number|boolean"
"#;

    #[test]
    fn test_parse_valid_yaml() {
        let signature = Signature::from_yaml(VALID_SIGNATURE).unwrap();
        assert_eq!(signature.name, "greet");
        assert_eq!(signature.arity(), 2);
        assert_eq!(
            signature.expectations()[1].tags(),
            &[TypeTag::Number, TypeTag::Boolean]
        );
        assert_eq!(signature.render(), "greet(string, number|boolean)");
    }

    #[test]
    fn test_parse_valid_json() {
        let signature =
            Signature::from_json(r#"{"name": "add", "expects": ["number", "number"]}"#).unwrap();
        assert_eq!(signature.render(), "add(number, number)");
        assert!(signature.description.is_none());
    }

    #[test]
    fn test_malformed_tag_rejected_at_load() {
        let yaml = r#"
name: "broken"
expects:
  - "string|integer"
"#;
        let result = Signature::from_yaml(yaml);
        assert!(matches!(
            result,
            Err(SignatureError::ExpectationError(ExpectationError::Malformed { ref token }))
                if token == "integer"
        ));
    }

    #[test]
    fn test_schema_violation() {
        let yaml = r#"
name: "broken"
expects: "string"
"#;
        assert!(matches!(
            Signature::from_yaml(yaml),
            Err(SignatureError::SchemaError(_))
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Signature::from_yaml("name: [unclosed"),
            Err(SignatureError::YamlError(_))
        ));
    }

    #[test]
    fn test_shorthand() {
        let signature = Signature::from_shorthand("f", "string|number, object, *").unwrap();
        assert_eq!(signature.expects, vec!["string|number", "object", "*"]);
        assert!(signature.expectations()[2].is_wildcard());

        assert!(matches!(
            Signature::from_shorthand("f", "  "),
            Err(SignatureError::ExpectationError(ExpectationError::Missing))
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            Signature::new("", ["string"]),
            Err(SignatureError::MissingField(_))
        ));
    }
}
