//! The argument matcher.
//!
//! Validation runs in fixed phases: input checks, expectation parsing, arity
//! checks, positional matching, then the optional callback. Strict mode stops
//! at the first positional mismatch; reporting mode checks every position and
//! hands back a [`ValidationReport`].

use tracing::{debug, trace};

use crate::arguments::Arguments;
use crate::config::{ReportIndexing, ValidatorConfig};
use crate::error::{ArgumentException, ErrorKind};
use crate::expectation::{
    parse_expectations, render_expectations, Expectation, ExpectationError, Signature,
};
use crate::report::{ArgumentFailure, ValidationReport};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Strict,
    Reporting,
}

/// Validates actual arguments against expectation lists.
///
/// A validator holds only its configuration; every call builds a fresh
/// report, so one instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Strict validation: `Ok(true)` when every position matches, otherwise
    /// the first failure as an error.
    pub fn expect<E: AsRef<str>>(
        &self,
        args: &Arguments,
        expectations: &[E],
    ) -> Result<bool, ArgumentException> {
        let expectations = self.parse(expectations)?;
        self.run(args, &expectations, Mode::Strict)
            .map(|report| report.passed)
    }

    /// Reporting validation: every position is checked, `callback` receives
    /// the report exactly once, and the result is `report.passed`.
    ///
    /// Input, expectation and arity problems are still returned as errors and
    /// the callback is not invoked for them.
    pub fn expect_with<E, F>(
        &self,
        args: &Arguments,
        expectations: &[E],
        callback: F,
    ) -> Result<bool, ArgumentException>
    where
        E: AsRef<str>,
        F: FnOnce(&ValidationReport),
    {
        let report = self.check(args, expectations)?;
        callback(&report);
        Ok(report.passed)
    }

    /// Reporting validation returning the aggregated report.
    pub fn check<E: AsRef<str>>(
        &self,
        args: &Arguments,
        expectations: &[E],
    ) -> Result<ValidationReport, ArgumentException> {
        let expectations = self.parse(expectations)?;
        self.run(args, &expectations, Mode::Reporting)
    }

    /// Strict validation against a compiled signature.
    pub fn expect_signature(
        &self,
        args: &Arguments,
        signature: &Signature,
    ) -> Result<bool, ArgumentException> {
        self.run(args, signature.expectations(), Mode::Strict)
            .map(|report| report.passed)
    }

    /// Reporting validation against a compiled signature.
    pub fn check_signature(
        &self,
        args: &Arguments,
        signature: &Signature,
    ) -> Result<ValidationReport, ArgumentException> {
        self.run(args, signature.expectations(), Mode::Reporting)
    }

    /// Validate loosely typed inputs.
    ///
    /// `args` must be an arguments-shaped object and `expectations` an array
    /// of strings. A falsy `callback` selects strict mode; any other value
    /// selects reporting mode and must be a function, which is then called
    /// with the report as its single argument.
    pub fn expect_dynamic(
        &self,
        args: &Value,
        expectations: &Value,
        callback: &Value,
    ) -> Result<bool, ArgumentException> {
        if !args.is_truthy() {
            return Err(self.raise(
                ErrorKind::MissingArguments,
                "Function arguments are required.",
            ));
        }

        let wrong_shape = || {
            self.raise(
                ErrorKind::MissingArguments,
                "Function arguments must be an instance of a function's arguments.",
            )
        };
        let length = Arguments::arguments_length(args).ok_or_else(wrong_shape)?;

        let expectations = self.parse_dynamic(expectations)?;

        // Counts are settled before any entry is read, so `length` never
        // exceeds the expectation count once materialized.
        self.check_arity(length, &expectations)?;
        let arguments = Arguments::from_arguments_object(args).ok_or_else(wrong_shape)?;

        let callback = callback.is_truthy().then_some(callback);
        let mode = if callback.is_some() {
            Mode::Reporting
        } else {
            Mode::Strict
        };

        let report = self.run(&arguments, &expectations, mode)?;

        if let Some(callback) = callback {
            let Value::Function(function) = callback else {
                return Err(self.raise(
                    ErrorKind::InvalidCallback,
                    format!(
                        "Callback function must be a function, {} was passed.",
                        callback.kind()
                    ),
                ));
            };
            debug!(passed = report.passed, "Invoking result callback");
            function.call(&[report.to_value()]);
        }

        Ok(report.passed)
    }

    fn parse<E: AsRef<str>>(
        &self,
        expectations: &[E],
    ) -> Result<Vec<Expectation>, ArgumentException> {
        parse_expectations(expectations).map_err(|e| self.invalid_expectations(e))
    }

    fn parse_dynamic(&self, expectations: &Value) -> Result<Vec<Expectation>, ArgumentException> {
        let items = match expectations {
            v if !v.is_truthy() => {
                return Err(self.invalid_expectations(ExpectationError::Missing))
            }
            Value::Array(items) if items.is_empty() => {
                return Err(self.invalid_expectations(ExpectationError::Missing))
            }
            Value::Array(items) => items,
            other => {
                return Err(self.raise(
                    ErrorKind::InvalidExpectations,
                    format!(
                        "Expectations must be an array of string expectations, {} was passed.",
                        other.kind()
                    ),
                ))
            }
        };

        items
            .iter()
            .map(|item| match item {
                Value::String(raw) => {
                    Expectation::parse(raw).map_err(|e| self.invalid_expectations(e))
                }
                other => Err(self.raise(
                    ErrorKind::InvalidExpectations,
                    format!(
                        "Expectations must only contain valid string expectations, \
                         {} was detected - `{}`.",
                        other.kind(),
                        other
                    ),
                )),
            })
            .collect()
    }

    fn run(
        &self,
        args: &Arguments,
        expectations: &[Expectation],
        mode: Mode,
    ) -> Result<ValidationReport, ArgumentException> {
        self.check_arity(args.len(), expectations)?;

        debug!(mode = ?mode, arity = args.len(), "Matching arguments");

        let mut report = ValidationReport::new();
        let mut index = 0;

        while index < args.len() {
            let expectation = &expectations[index];
            let value = args.get(index).cloned().unwrap_or_default();
            let kind = value.kind();

            if expectation.accepts(kind) {
                trace!(
                    position = index + 1,
                    expected = %expectation,
                    actual = %kind,
                    "Argument matched"
                );
                index += 1;
                continue;
            }

            let message = format!(
                "Argument number {} must be {}, {} was passed.",
                index + 1,
                expectation,
                kind
            );
            debug!(
                position = index + 1,
                expected = %expectation,
                actual = %kind,
                "Argument mismatch"
            );

            if mode == Mode::Strict {
                return Err(self.raise(ErrorKind::ArgumentType, message));
            }

            let reported = match self.config.indexing {
                ReportIndexing::Consistent => index,
                ReportIndexing::Legacy => index + 1,
            };
            let passed_data = args.get(reported).cloned().unwrap_or_default();

            report.record(
                index + 1,
                ArgumentFailure {
                    passed_data_type: passed_data.kind(),
                    passed_data,
                    expects: expectation.tags().to_vec(),
                    message,
                },
            );

            index = reported + 1;
        }

        debug!(passed = report.passed, errors = report.error_count(), "Matching finished");
        Ok(report)
    }

    fn check_arity(
        &self,
        length: usize,
        expectations: &[Expectation],
    ) -> Result<(), ArgumentException> {
        if length == 0 {
            return Err(self.raise(
                ErrorKind::NoArguments,
                format!(
                    "There were no arguments passed. Function expects arguments to be: ({}).",
                    render_expectations(expectations)
                ),
            ));
        }

        if length != expectations.len() {
            return Err(self.raise(
                ErrorKind::ArityMismatch,
                "The number of function arguments does not match the number of expected arguments.",
            ));
        }

        Ok(())
    }

    fn invalid_expectations(&self, error: ExpectationError) -> ArgumentException {
        self.raise(ErrorKind::InvalidExpectations, error.to_string())
    }

    fn raise(&self, kind: ErrorKind, message: impl Into<String>) -> ArgumentException {
        ArgumentException::with_kind(kind, message).documented(&self.config.docs_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::expectation::TypeTag;
    use crate::value::{Function, ValueKind};
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    fn arguments_object(values: Vec<Value>) -> Value {
        Arguments::new(values).to_value()
    }

    fn strings(items: &[&str]) -> Value {
        Value::Array(items.iter().map(|s| Value::from(*s)).collect())
    }

    #[test]
    fn test_all_positions_match() {
        let validator = Validator::new();
        assert!(validator.expect(&args!["a", 5], &["string", "number"]).unwrap());
    }

    #[test]
    fn test_strict_mismatch_message() {
        let err = Validator::new()
            .expect(&args!["a", "b"], &["string", "number"])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ArgumentType);
        assert_eq!(
            err.message(),
            "Argument number 2 must be number, string was passed."
        );
        assert_eq!(
            err.help_url(),
            Some("https://docs.rs/argcheck-core#function-arguments")
        );
    }

    #[test]
    fn test_strict_reports_first_failure_only() {
        let err = Validator::new()
            .expect(&args![1, "b", true], &["string", "number", "boolean"])
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Argument number 1 must be string, number was passed."
        );
    }

    #[test]
    fn test_alternation_match() {
        assert!(Validator::new().expect(&args![5], &["string|number"]).unwrap());
    }

    #[test]
    fn test_raw_expectation_in_message() {
        let err = Validator::new()
            .expect(&args![true], &["string|number"])
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Argument number 1 must be string|number, boolean was passed."
        );
    }

    #[test]
    fn test_no_arguments() {
        let err = Validator::new()
            .expect(&Arguments::default(), &["string", "number|boolean"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoArguments);
        assert_eq!(
            err.message(),
            "There were no arguments passed. \
             Function expects arguments to be: (string, number|boolean)."
        );
    }

    #[test]
    fn test_arity_mismatch_in_both_modes() {
        let validator = Validator::new();
        let strict = validator.expect(&args!["a"], &["string", "number"]).unwrap_err();
        assert_eq!(strict.kind(), ErrorKind::ArityMismatch);

        let mut called = false;
        let reporting = validator
            .expect_with(&args!["a", 1, 2], &["string", "number"], |_| called = true)
            .unwrap_err();
        assert_eq!(reporting.kind(), ErrorKind::ArityMismatch);
        assert!(!called);
    }

    #[test]
    fn test_malformed_expectation_checked_before_arguments() {
        // Zero arguments would otherwise raise NoArguments.
        let err = Validator::new()
            .expect(&Arguments::default(), &["string", "integer"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExpectations);
        assert_eq!(
            err.message(),
            "A malformed string of expectation was detected - `integer`."
        );
    }

    #[test]
    fn test_empty_expectations() {
        let empty: [&str; 0] = [];
        let err = Validator::new().expect(&args!["a"], &empty).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExpectations);
        assert_eq!(err.message(), "Expectations are required.");
    }

    #[test]
    fn test_wildcard_accepts_everything() {
        let values = vec![
            Value::Undefined,
            Value::Null,
            Value::Symbol(Some("s".into())),
            Value::BigInt(7),
            Value::Function(Function::new(|_| Value::Undefined)),
        ];
        let expectations = vec!["*"; values.len()];
        assert!(Validator::new()
            .expect(&Arguments::new(values), &expectations)
            .unwrap());
    }

    #[test]
    fn test_null_and_arrays_are_objects() {
        assert!(Validator::new()
            .expect(&args![Value::Null, Value::Array(vec![])], &["object", "object"])
            .unwrap());
    }

    #[test]
    fn test_reporting_mode_passing() {
        let mut seen = Vec::new();
        let passed = Validator::new()
            .expect_with(&args!["a", 5], &["string", "number"], |report| {
                seen.push(report.clone())
            })
            .unwrap();

        assert!(passed);
        assert_eq!(seen.len(), 1);
        assert!(seen[0].passed);
        assert!(seen[0].errors.is_empty());
    }

    #[test]
    fn test_reporting_mode_collects_all_failures() {
        let mut calls = 0;
        let mut captured = None;
        let passed = Validator::new()
            .expect_with(
                &args![1, "b", true],
                &["string", "number", "boolean"],
                |report| {
                    calls += 1;
                    captured = Some(report.clone());
                },
            )
            .unwrap();

        assert!(!passed);
        assert_eq!(calls, 1);
        let report = captured.unwrap();
        assert!(!report.passed);
        assert_eq!(report.error_count(), 2);

        let first = report.failure(1).unwrap();
        assert_eq!(first.passed_data, Value::from(1));
        assert_eq!(first.passed_data_type, ValueKind::Number);
        assert_eq!(first.expects, vec![TypeTag::String]);
        assert_eq!(
            first.message,
            "Argument number 1 must be string, number was passed."
        );

        let second = report.failure(2).unwrap();
        assert_eq!(second.passed_data, Value::from("b"));
        assert_eq!(second.passed_data_type, ValueKind::String);
    }

    #[test]
    fn test_legacy_indexing_reproduces_shifted_entries() {
        let validator = Validator::with_config(
            ValidatorConfig::default().with_indexing(ReportIndexing::Legacy),
        );
        let report = validator
            .check(&args![1, "b", true], &["string", "number", "string"])
            .unwrap();

        // Position 1 fails and its entry carries argument 2; position 2 is skipped.
        let first = report.failure(1).unwrap();
        assert_eq!(first.passed_data, Value::from("b"));
        assert_eq!(first.passed_data_type, ValueKind::String);
        assert_eq!(
            first.message,
            "Argument number 1 must be string, number was passed."
        );
        assert!(report.failure(2).is_none());

        // Last position: the shifted read falls off the end.
        let third = report.failure(3).unwrap();
        assert_eq!(third.passed_data, Value::Undefined);
        assert_eq!(third.passed_data_type, ValueKind::Undefined);
        assert_eq!(report.error_count(), 2);
    }

    #[test]
    fn test_signature_validation() {
        let signature = Signature::from_shorthand("greet", "string, number|boolean").unwrap();
        let validator = Validator::new();

        assert!(validator.expect_signature(&args!["bob", false], &signature).unwrap());
        let report = validator.check_signature(&args!["bob", "x"], &signature).unwrap();
        assert!(!report.passed);
        assert_eq!(
            report.failure(2).unwrap().message,
            "Argument number 2 must be number|boolean, string was passed."
        );
    }

    #[test]
    fn test_custom_docs_url() {
        let config = ValidatorConfig::default().with_docs_url("https://example.com/args");
        let validator = Validator::with_config(config);
        let err = validator.expect(&args!["a"], &["number"]).unwrap_err();
        assert_eq!(err.help_url(), Some("https://example.com/args#function-arguments"));
        assert!(err
            .to_string()
            .ends_with("For more info, go to https://example.com/args#function-arguments"));
    }

    // Dynamic boundary

    #[test]
    fn test_dynamic_examples() {
        let validator = Validator::new();

        let ok = arguments_object(vec![Value::from("a"), Value::from(5)]);
        assert!(validator
            .expect_dynamic(&ok, &strings(&["string", "number"]), &Value::Undefined)
            .unwrap());

        let bad = arguments_object(vec![Value::from("a"), Value::from("b")]);
        let err = validator
            .expect_dynamic(&bad, &strings(&["string", "number"]), &Value::Undefined)
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Argument number 2 must be number, string was passed."
        );

        let alt = arguments_object(vec![Value::from(5)]);
        assert!(validator
            .expect_dynamic(&alt, &strings(&["string|number"]), &Value::Undefined)
            .unwrap());

        let empty = Value::object([("length", Value::from(0))]);
        let err = validator
            .expect_dynamic(&empty, &strings(&["string"]), &Value::Undefined)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoArguments);
    }

    #[test]
    fn test_dynamic_missing_and_malformed_arguments() {
        let validator = Validator::new();
        let expectations = strings(&["string"]);

        let err = validator
            .expect_dynamic(&Value::Undefined, &expectations, &Value::Undefined)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArguments);
        assert_eq!(err.message(), "Function arguments are required.");

        let err = validator
            .expect_dynamic(&strings(&["a"]), &expectations, &Value::Undefined)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArguments);
        assert_eq!(
            err.message(),
            "Function arguments must be an instance of a function's arguments."
        );
    }

    #[test]
    fn test_dynamic_huge_length_is_arity_mismatch() {
        let args = Value::object([("0", Value::from("a")), ("length", Value::from(4e9))]);
        let err = Validator::new()
            .expect_dynamic(&args, &strings(&["string"]), &Value::Undefined)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArityMismatch);

        let report_sink = Value::Function(Function::new(|_| Value::Undefined));
        let err = Validator::new()
            .expect_dynamic(&args, &strings(&["string"]), &report_sink)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArityMismatch);
    }

    #[test]
    fn test_dynamic_length_checked_after_expectations() {
        let args = Value::object([("length", Value::from(4e9))]);
        let err = Validator::new()
            .expect_dynamic(&args, &strings(&["integer"]), &Value::Undefined)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExpectations);
    }

    #[test]
    fn test_dynamic_expectation_shapes() {
        let validator = Validator::new();
        let args = arguments_object(vec![Value::from("a")]);

        let err = validator
            .expect_dynamic(&args, &Value::Undefined, &Value::Undefined)
            .unwrap_err();
        assert_eq!(err.message(), "Expectations are required.");

        let err = validator
            .expect_dynamic(&args, &Value::Array(vec![]), &Value::Undefined)
            .unwrap_err();
        assert_eq!(err.message(), "Expectations are required.");

        let err = validator
            .expect_dynamic(&args, &Value::from("string"), &Value::Undefined)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExpectations);
        assert_eq!(
            err.message(),
            "Expectations must be an array of string expectations, string was passed."
        );

        let err = validator
            .expect_dynamic(
                &args,
                &Value::Array(vec![Value::from(5)]),
                &Value::Undefined,
            )
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Expectations must only contain valid string expectations, number was detected - `5`."
        );
        assert_eq!(err.help_url(), Some("https://docs.rs/argcheck-core#expectations"));
    }

    #[test]
    fn test_dynamic_callback_receives_report() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let callback = Value::Function(Function::named("onResult", move |args| {
            sink.lock().unwrap().push(args[0].clone());
            Value::Undefined
        }));

        let args = arguments_object(vec![Value::from("a"), Value::from("b")]);
        let passed = Validator::new()
            .expect_dynamic(&args, &strings(&["string", "number"]), &callback)
            .unwrap();

        assert!(!passed);
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let report = &received[0];
        assert_eq!(report.get("passed"), Some(&Value::Bool(false)));
        let entry = report
            .get("errors")
            .and_then(|errors| errors.get("argument 2"))
            .unwrap();
        assert_eq!(entry.get("passedData"), Some(&Value::from("b")));
        assert_eq!(entry.get("passedDataType"), Some(&Value::from("string")));
    }

    #[test]
    fn test_dynamic_invalid_callback() {
        let args = arguments_object(vec![Value::from("a")]);
        let err = Validator::new()
            .expect_dynamic(&args, &strings(&["string"]), &Value::from("not a function"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCallback);
        assert_eq!(
            err.message(),
            "Callback function must be a function, string was passed."
        );
    }

    #[test]
    fn test_dynamic_falsy_callback_is_strict() {
        let args = arguments_object(vec![Value::from(1)]);
        let err = Validator::new()
            .expect_dynamic(&args, &strings(&["string"]), &Value::from(false))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentType);
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Undefined),
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
            any::<i64>().prop_map(|n| Value::BigInt(n as i128)),
            Just(Value::Symbol(None)),
            Just(Value::Array(vec![])),
            Just(Value::Function(Function::new(|_| Value::Undefined))),
        ]
    }

    fn arb_expectation() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(TypeTag::ALL.to_vec()), 1..4).prop_map(
            |tags| {
                tags.iter()
                    .map(TypeTag::as_str)
                    .collect::<Vec<_>>()
                    .join("|")
            },
        )
    }

    proptest! {
        #[test]
        fn strict_and_reporting_agree(
            values in prop::collection::vec(arb_value(), 1..6),
            seed in prop::collection::vec(arb_expectation(), 6),
        ) {
            let expectations = &seed[..values.len()];
            let args = Arguments::new(values);
            let validator = Validator::new();

            let report = validator.check(&args, expectations).unwrap();
            match validator.expect(&args, expectations) {
                Ok(passed) => {
                    prop_assert!(passed);
                    prop_assert!(report.passed);
                    prop_assert!(report.errors.is_empty());
                }
                Err(err) => {
                    prop_assert_eq!(err.kind(), ErrorKind::ArgumentType);
                    prop_assert!(!report.passed);
                    let first = report.errors.values().next().unwrap();
                    prop_assert_eq!(err.message(), first.message.as_str());
                }
            }
        }

        #[test]
        fn wildcard_positions_never_fail(values in prop::collection::vec(arb_value(), 1..6)) {
            let expectations: Vec<&str> = values.iter().map(|_| "string|*").collect();
            let args = Arguments::new(values);
            prop_assert!(Validator::new().expect(&args, &expectations).unwrap());
        }

        #[test]
        fn arity_mismatch_always_errors(
            values in prop::collection::vec(arb_value(), 1..6),
            extra in 1usize..3,
        ) {
            let expectations = vec!["*"; values.len() + extra];
            let args = Arguments::new(values);
            let err = Validator::new().check(&args, &expectations).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::ArityMismatch);
        }
    }
}
