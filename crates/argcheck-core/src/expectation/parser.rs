//! Expectation string parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::value::ValueKind;

/// Separator between alternatives in one expectation string.
pub const ALTERNATION_SEPARATOR: char = '|';

/// Errors from parsing expectation strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpectationError {
    #[error("Expectations are required.")]
    Missing,

    #[error("A malformed string of expectation was detected - `{token}`.")]
    Malformed { token: String },
}

/// One accepted type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "function")]
    Function,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "*")]
    Any,
}

impl TypeTag {
    pub const ALL: [TypeTag; 6] = [
        TypeTag::Object,
        TypeTag::Function,
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Any,
    ];

    /// Look up a tag by its exact spelling.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == token)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Object => "object",
            TypeTag::Function => "function",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Any => "*",
        }
    }

    /// Whether a value of `kind` satisfies this tag.
    pub fn accepts(&self, kind: ValueKind) -> bool {
        match self {
            TypeTag::Any => true,
            TypeTag::Object => kind == ValueKind::Object,
            TypeTag::Function => kind == ValueKind::Function,
            TypeTag::String => kind == ValueKind::String,
            TypeTag::Number => kind == ValueKind::Number,
            TypeTag::Boolean => kind == ValueKind::Boolean,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed expectation for one argument position: the raw string and its
/// alternation set, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expectation {
    raw: String,
    tags: Vec<TypeTag>,
}

impl Expectation {
    /// Parse an expectation string such as `"string|number"`.
    ///
    /// Tags are matched exactly; an empty alternative is malformed.
    pub fn parse(raw: &str) -> Result<Self, ExpectationError> {
        let tags = raw
            .split(ALTERNATION_SEPARATOR)
            .map(|token| {
                TypeTag::parse(token).ok_or_else(|| ExpectationError::Malformed {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            tags,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tags(&self) -> &[TypeTag] {
        &self.tags
    }

    pub fn is_wildcard(&self) -> bool {
        self.tags.contains(&TypeTag::Any)
    }

    /// Whether a value of `kind` satisfies any alternative.
    pub fn accepts(&self, kind: ValueKind) -> bool {
        self.tags.iter().any(|tag| tag.accepts(kind))
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse an ordered expectation list. The list must not be empty.
pub fn parse_expectations<S: AsRef<str>>(
    expectations: &[S],
) -> Result<Vec<Expectation>, ExpectationError> {
    if expectations.is_empty() {
        return Err(ExpectationError::Missing);
    }

    expectations
        .iter()
        .map(|e| Expectation::parse(e.as_ref()))
        .collect()
}

/// Render expectations as a comma-separated list, e.g. `string, number|boolean`.
pub fn render_expectations(expectations: &[Expectation]) -> String {
    expectations
        .iter()
        .map(Expectation::raw)
        .collect::<Vec<_>>()
        .join(", ")
}
