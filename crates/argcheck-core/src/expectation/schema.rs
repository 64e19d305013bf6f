//! JSON Schema validation for signature documents.
//!
//! Signature files are checked against `schema/signature.schema.json` before
//! they are deserialized, so structural problems are reported with the
//! offending path.

use std::sync::OnceLock;

const SIGNATURE_SCHEMA_JSON: &str = include_str!("../../schema/signature.schema.json");

static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

fn get_validator() -> Result<&'static jsonschema::Validator, String> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(SIGNATURE_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result.as_ref().map_err(Clone::clone)
}

/// Validate a signature document against the schema.
///
/// Returns every violation as `"{error} at {path}"`.
pub fn validate_signature_schema(document: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signature_passes() {
        let value = serde_json::json!({
            "name": "greet",
            "description": "Greets someone",
            "expects": ["string", "number|boolean"]
        });
        assert!(validate_signature_schema(&value).is_ok());
    }

    #[test]
    fn test_missing_expects_fails() {
        let value = serde_json::json!({ "name": "greet" });
        let errors = validate_signature_schema(&value).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_empty_expects_fails() {
        let value = serde_json::json!({ "name": "greet", "expects": [] });
        assert!(validate_signature_schema(&value).is_err());
    }

    #[test]
    fn test_non_string_expectation_fails() {
        let value = serde_json::json!({ "name": "greet", "expects": ["string", 5] });
        let errors = validate_signature_schema(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("/expects/1")));
    }

    #[test]
    fn test_additional_properties_fail() {
        let value = serde_json::json!({
            "name": "greet",
            "expects": ["string"],
            "returns": "string"
        });
        assert!(validate_signature_schema(&value).is_err());
    }
}
