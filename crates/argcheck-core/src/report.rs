//! Structured validation results.
//!
//! Reporting mode collects every positional mismatch into a
//! [`ValidationReport`] instead of failing on the first one.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::expectation::TypeTag;
use crate::value::{Value, ValueKind};

/// Key of a report entry, rendered as `"argument {n}"` (1-based).
///
/// Orders numerically, so `argument 10` follows `argument 9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArgumentLabel(pub usize);

impl fmt::Display for ArgumentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "argument {}", self.0)
    }
}

impl Serialize for ArgumentLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One recorded mismatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentFailure {
    pub passed_data: Value,
    pub passed_data_type: ValueKind,
    pub expects: Vec<TypeTag>,
    pub message: String,
}

impl ArgumentFailure {
    fn to_value(&self) -> Value {
        Value::object([
            ("passedData", self.passed_data.clone()),
            ("passedDataType", Value::from(self.passed_data_type.as_str())),
            (
                "expects",
                Value::Array(self.expects.iter().map(|t| Value::from(t.as_str())).collect()),
            ),
            ("message", Value::from(self.message.as_str())),
        ])
    }
}

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: BTreeMap<ArgumentLabel, ArgumentFailure>,
    pub passed: bool,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    /// A passing report with no errors.
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
            passed: true,
        }
    }

    /// Record a mismatch at a 1-based position and mark the report failed.
    pub fn record(&mut self, position: usize, failure: ArgumentFailure) {
        self.passed = false;
        self.errors.insert(ArgumentLabel(position), failure);
    }

    /// Failure recorded for a 1-based position.
    pub fn failure(&self, position: usize) -> Option<&ArgumentFailure> {
        self.errors.get(&ArgumentLabel(position))
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Messages of all failures in position order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.values().map(|f| f.message.as_str()).collect()
    }

    /// Convert into a runtime value, as handed to dynamic callbacks.
    pub fn to_value(&self) -> Value {
        let errors = self
            .errors
            .iter()
            .map(|(label, failure)| (label.to_string(), failure.to_value()))
            .collect();

        Value::object([
            ("errors", Value::Object(errors)),
            ("passed", Value::Bool(self.passed)),
        ])
    }
}
