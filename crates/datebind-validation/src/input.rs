#![forbid(unsafe_code)]

//! The input validation contract and its default implementation.

use std::fmt;

use datebind_core::{ParseOutcome, parse_from_input};
use time::Date;

use crate::validators::{
    All, DateRange, ERROR_CODE_DATE, Pattern, Required, ValidationError, ValidationResult,
    Validator,
};

/// Outcome of the last validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ValidationStatus {
    /// Nothing has been validated yet.
    #[default]
    None,
    /// The last input passed.
    Success,
    /// The last input failed.
    Error,
}

/// Identifies the bound value, e.g. `"order.ship_date"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueExpression(String);

impl ValueExpression {
    /// Create an expression from its textual form.
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// The textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValueExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ValueExpression {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}

impl From<String> for ValueExpression {
    fn from(expression: String) -> Self {
        Self(expression)
    }
}

/// A committed edit as seen by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputChange<'a> {
    /// The raw text that was committed.
    pub text: &'a str,
    /// Whether the text parsed to a date.
    pub accepted: bool,
}

impl<'a> InputChange<'a> {
    /// A commit whose text parsed.
    #[must_use]
    pub fn accepted(text: &'a str) -> Self {
        Self {
            text,
            accepted: true,
        }
    }

    /// A commit whose text was rejected by the parser.
    #[must_use]
    pub fn rejected(text: &'a str) -> Self {
        Self {
            text,
            accepted: false,
        }
    }
}

/// What a date edit needs from an attached validation.
///
/// The date edit never inspects the outcome beyond [`status`](Self::status),
/// which it uses for styling.
pub trait InputValidation {
    /// Register the expression identifying the bound value.
    fn initialize_input_expression(&mut self, expression: &ValueExpression);

    /// Register a pattern together with the freshest display value.
    fn initialize_input_pattern(&mut self, pattern: &str, value: Option<&str>);

    /// Register the input with its current display value.
    fn initialize_input(&mut self, value: Option<&str>);

    /// Called after every commit, whether or not the text parsed.
    fn notify_input_changed(&mut self, change: InputChange<'_>);

    /// Current status.
    fn status(&self) -> ValidationStatus;

    /// Message for the current error, if any.
    fn message(&self) -> Option<String> {
        None
    }
}

/// Default [`InputValidation`].
///
/// A rejected parse fails with [`ERROR_CODE_DATE`]. Accepted text is
/// checked against, in order: `required`, the registered pattern, the
/// date range, then any extra validators. Blank accepted text (a cleared
/// nullable date) only has to satisfy `required`.
#[derive(Debug, Default)]
pub struct Validation {
    expression: Option<ValueExpression>,
    pattern: Option<Pattern>,
    required: bool,
    range: DateRange,
    extra: All<str>,
    registered_value: Option<String>,
    status: ValidationStatus,
    error: Option<ValidationError>,
}

impl Validation {
    /// Create a validation with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require non-blank input (builder).
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Enforce inclusive date bounds (builder).
    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Add a text validator run after the built-in rules (builder).
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator<str> + 'static) -> Self {
        self.extra.push(validator);
        self
    }

    /// The registered expression, if any.
    #[must_use]
    pub fn expression(&self) -> Option<&ValueExpression> {
        self.expression.as_ref()
    }

    /// The registered pattern, as supplied.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Pattern::source)
    }

    /// The value the input registered with.
    #[must_use]
    pub fn registered_value(&self) -> Option<&str> {
        self.registered_value.as_deref()
    }

    /// The current error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Validate text without recording the outcome.
    #[must_use]
    pub fn check(&self, change: InputChange<'_>) -> ValidationResult {
        if !change.accepted {
            return ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_DATE, "{value} is not a valid date")
                    .with_param("value", change.text),
            );
        }
        let mut result = if self.required {
            Required.validate(change.text)
        } else {
            ValidationResult::Valid
        };
        if change.text.trim().is_empty() {
            return result;
        }
        if let Some(pattern) = &self.pattern {
            result = result.and(pattern.validate(change.text));
        }
        if let ParseOutcome::Accepted(Some(date)) = parse_from_input::<Option<Date>>(change.text) {
            result = result.and(self.range.validate(&date));
        }
        result.and(self.extra.validate(change.text))
    }

    fn record(&mut self, result: ValidationResult) {
        match result {
            ValidationResult::Valid => {
                self.status = ValidationStatus::Success;
                self.error = None;
            }
            ValidationResult::Invalid(error) => {
                datebind_core::debug!(code = error.code, "validation failed");
                self.status = ValidationStatus::Error;
                self.error = Some(error);
            }
        }
    }
}

impl InputValidation for Validation {
    fn initialize_input_expression(&mut self, expression: &ValueExpression) {
        self.expression = Some(expression.clone());
    }

    fn initialize_input_pattern(&mut self, pattern: &str, value: Option<&str>) {
        self.pattern = if pattern.is_empty() {
            None
        } else {
            Some(Pattern::parse(pattern))
        };
        // A new pattern applies to the value it arrived with.
        if let Some(text) = value {
            let result = self.check(InputChange::accepted(text));
            self.record(result);
        }
    }

    fn initialize_input(&mut self, value: Option<&str>) {
        self.registered_value = value.map(str::to_string);
    }

    fn notify_input_changed(&mut self, change: InputChange<'_>) {
        let result = self.check(change);
        self.record(result);
    }

    fn status(&self) -> ValidationStatus {
        self.status
    }

    fn message(&self) -> Option<String> {
        self.error.as_ref().map(ValidationError::format_message)
    }
}
