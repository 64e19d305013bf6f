//! # argcheck-core
//!
//! Runtime function-argument validation.
//!
//! Given the actual arguments of a call and one expectation string per
//! position, this crate checks:
//! - that the argument count matches the expectation count
//! - that each argument's runtime kind is one of the tags its expectation names
//!
//! Expectation strings use the tags `object`, `function`, `string`, `number`,
//! `boolean` and the wildcard `*`, joined with `|` for alternatives.
//!
//! ## Modes
//!
//! 1. **Strict**: the first mismatch is returned as an [`ArgumentException`]
//! 2. **Reporting**: every position is checked and a [`ValidationReport`] is
//!    delivered to a callback; the call returns whether everything passed
//!
//! ## Example
//!
//! ```rust
//! use argcheck_core::{args, expect, expect_with};
//!
//! assert!(expect(&args!["a", 5], &["string", "number"]).unwrap());
//!
//! let err = expect(&args!["a", "b"], &["string", "number"]).unwrap_err();
//! assert_eq!(err.message(), "Argument number 2 must be number, string was passed.");
//!
//! let passed = expect_with(&args!["a", "b"], &["string", "number"], |report| {
//!     assert_eq!(report.error_count(), 1);
//! })
//! .unwrap();
//! assert!(!passed);
//! ```

pub mod arguments;
pub mod config;
pub mod error;
pub mod expectation;
pub mod report;
pub mod validator;
pub mod value;

// Re-export main types at crate root
pub use arguments::Arguments;
pub use config::{ConfigError, ReportIndexing, ValidatorConfig, DEFAULT_DOCS_URL};
pub use error::{ArgumentException, ErrorKind};
pub use expectation::{Expectation, ExpectationError, Signature, SignatureError, TypeTag};
pub use report::{ArgumentFailure, ArgumentLabel, ValidationReport};
pub use validator::Validator;
pub use value::{Function, Value, ValueKind};

/// Validate `args` against `expectations` in strict mode.
///
/// This is the main entry point. Returns `Ok(true)` when every position
/// matches; any problem, including the first positional mismatch, is
/// returned as an [`ArgumentException`].
pub fn expect<E: AsRef<str>>(
    args: &Arguments,
    expectations: &[E],
) -> Result<bool, ArgumentException> {
    Validator::new().expect(args, expectations)
}

/// Validate in reporting mode, delivering the report to `callback`.
///
/// # Arguments
///
/// * `args` - The actual call arguments
/// * `expectations` - One expectation string per position
/// * `callback` - Invoked once with the report after every position is checked
///
/// # Returns
///
/// `Ok(report.passed)`, or an error for problems that stop validation before
/// positional matching (missing expectations, arity, empty arguments).
pub fn expect_with<E, F>(
    args: &Arguments,
    expectations: &[E],
    callback: F,
) -> Result<bool, ArgumentException>
where
    E: AsRef<str>,
    F: FnOnce(&ValidationReport),
{
    Validator::new().expect_with(args, expectations, callback)
}
