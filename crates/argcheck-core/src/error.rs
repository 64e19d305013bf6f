//! The `ArgumentException` error type.
//!
//! Every failure the validator raises is an `ArgumentException`. The
//! [`ErrorKind`] tells the categories apart; the message stays the
//! human-readable text and the documentation pointer travels alongside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of an [`ArgumentException`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Function arguments were not supplied or are not an argument collection.
    MissingArguments,

    /// Expectations are missing, empty, of the wrong shape, or malformed.
    InvalidExpectations,

    /// The argument collection is empty.
    NoArguments,

    /// Argument count differs from expectation count.
    ArityMismatch,

    /// An argument's kind is outside its alternation set (strict mode).
    ArgumentType,

    /// The supplied callback cannot be invoked.
    InvalidCallback,

    /// Constructed directly by a caller.
    General,
}

impl ErrorKind {
    /// Documentation anchor for this category, if it has one.
    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            ErrorKind::MissingArguments
            | ErrorKind::NoArguments
            | ErrorKind::ArityMismatch
            | ErrorKind::ArgumentType => Some("function-arguments"),
            ErrorKind::InvalidExpectations => Some("expectations"),
            ErrorKind::InvalidCallback => Some("callback-function"),
            ErrorKind::General => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingArguments => "MissingArguments",
            ErrorKind::InvalidExpectations => "InvalidExpectations",
            ErrorKind::NoArguments => "NoArguments",
            ErrorKind::ArityMismatch => "ArityMismatch",
            ErrorKind::ArgumentType => "ArgumentType",
            ErrorKind::InvalidCallback => "InvalidCallback",
            ErrorKind::General => "General",
        };
        f.write_str(name)
    }
}

/// Error raised when arguments or expectations fail validation.
///
/// Renders as `ArgumentException: {message}`, followed by the documentation
/// pointer when one is attached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {message}{}", Self::NAME, help_suffix(.help_url))]
pub struct ArgumentException {
    kind: ErrorKind,
    message: String,
    help_url: Option<String>,
}

impl ArgumentException {
    /// Name discriminator carried by every exception.
    pub const NAME: &'static str = "ArgumentException";

    /// Create a general exception with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::General, message)
    }

    /// Create an exception of a specific category.
    pub fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            help_url: None,
        }
    }

    /// Attach a documentation pointer rooted at `docs_url`.
    ///
    /// Categories without an anchor are left untouched.
    pub fn documented(mut self, docs_url: &str) -> Self {
        if let Some(anchor) = self.kind.anchor() {
            self.help_url = Some(format!("{}#{}", docs_url.trim_end_matches('#'), anchor));
        }
        self
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The bare message, without the documentation pointer.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn help_url(&self) -> Option<&str> {
        self.help_url.as_deref()
    }
}

fn help_suffix(help_url: &Option<String>) -> String {
    match help_url {
        Some(url) => format!("\n\nFor more info, go to {}", url),
        None => String::new(),
    }
}
