#![forbid(unsafe_code)]

//! Core validation types and built-in validators.

use std::collections::HashMap;
use std::fmt;

use datebind_core::format_bound;
use time::Date;

// ---------------------------------------------------------------------------
// Error Codes (for i18n lookup)
// ---------------------------------------------------------------------------

/// Error code for required field validation.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for pattern validation.
pub const ERROR_CODE_PATTERN: &str = "pattern";
/// Error code for input that is not a date in the canonical format.
pub const ERROR_CODE_DATE: &str = "date";
/// Error code for a date outside its allowed range.
pub const ERROR_CODE_RANGE: &str = "range";

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation error with a stable code, a message template, and the
/// parameters interpolated into it.
///
/// ```rust
/// use datebind_validation::ValidationError;
///
/// let error = ValidationError::new("range", "Must be on or after {min}")
///     .with_param("min", "2024-01-01");
/// assert_eq!(error.format_message(), "Must be on or after 2024-01-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code for programmatic handling and i18n.
    pub code: &'static str,
    /// Message template; `{key}` placeholders are filled from `params`.
    pub message: String,
    /// Interpolation parameters.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    /// Create an error with the given code and message template.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add an interpolation parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// The message with every `{key}` replaced by its parameter.
    #[must_use]
    pub fn format_message(&self) -> String {
        self.params
            .iter()
            .fold(self.message.clone(), |message, (key, value)| {
                message.replace(&format!("{{{key}}}"), value)
            })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The result of a validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The value is valid.
    #[default]
    Valid,
    /// The value is invalid.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The error, if invalid.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Keep the first failure; otherwise take `other`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Valid => other,
            Self::Invalid(_) => self,
        }
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// Validates values of type `T`.
pub trait Validator<T: ?Sized> {
    /// Validate the given value.
    fn validate(&self, value: &T) -> ValidationResult;
}

// ---------------------------------------------------------------------------
// Built-in Validators
// ---------------------------------------------------------------------------

/// Rejects empty and whitespace-only text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.trim().is_empty() {
            ValidationResult::Invalid(ValidationError::new(
                ERROR_CODE_REQUIRED,
                "This field is required",
            ))
        } else {
            ValidationResult::Valid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    None,
    Start,
    Both,
}

/// Matches text against a pattern parameter.
///
/// There is no regular expression engine: `^` and `$` anchors are honored
/// and the remainder is compared literally. `"^2024-"` accepts any date in
/// 2024, `"^2024-06-15$"` accepts exactly one date, and an unanchored
/// pattern only has to occur somewhere in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    literal: String,
    anchor: Anchor,
    source: String,
}

impl Pattern {
    /// Build from a pattern parameter.
    ///
    /// This is not a regular expression. Only a leading `^` and a trailing
    /// `$` are special; every other character, including `\`, `.`, `[`,
    /// `{` and `*`, is matched literally. An HTML pattern such as
    /// `^\d{4}-06-\d{2}$` therefore only matches that exact text.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let (body, anchor) = match pattern.strip_prefix('^') {
            Some(rest) => match rest.strip_suffix('$') {
                Some(inner) => (inner, Anchor::Both),
                None => (rest, Anchor::Start),
            },
            None => (pattern, Anchor::None),
        };
        Self {
            literal: body.to_string(),
            anchor,
            source: pattern.to_string(),
        }
    }

    /// The pattern as it was supplied.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    fn matches(&self, value: &str) -> bool {
        match self.anchor {
            Anchor::None => value.contains(&self.literal),
            Anchor::Start => value.starts_with(&self.literal),
            Anchor::Both => value == self.literal,
        }
    }
}

impl Validator<str> for Pattern {
    fn validate(&self, value: &str) -> ValidationResult {
        if self.matches(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_PATTERN, "Does not match {pattern}")
                    .with_param("pattern", &self.source),
            )
        }
    }
}

/// Inclusive date bounds. An absent bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest accepted date.
    pub min: Option<Date>,
    /// Latest accepted date.
    pub max: Option<Date>,
}

impl DateRange {
    /// Create a range from optional bounds.
    #[must_use]
    pub fn new(min: Option<Date>, max: Option<Date>) -> Self {
        Self { min, max }
    }
}

impl Validator<Date> for DateRange {
    fn validate(&self, value: &Date) -> ValidationResult {
        let too_early = self.min.is_some_and(|min| *value < min);
        let too_late = self.max.is_some_and(|max| *value > max);
        if !too_early && !too_late {
            return ValidationResult::Valid;
        }
        let message = match (self.min, self.max) {
            (Some(_), Some(_)) => "Must be between {min} and {max}",
            (Some(_), None) => "Must be on or after {min}",
            _ => "Must be on or before {max}",
        };
        let mut error = ValidationError::new(ERROR_CODE_RANGE, message);
        if let Some(min) = format_bound(self.min) {
            error = error.with_param("min", min);
        }
        if let Some(max) = format_bound(self.max) {
            error = error.with_param("max", max);
        }
        ValidationResult::Invalid(error)
    }
}

// ---------------------------------------------------------------------------
// Composition Validators
// ---------------------------------------------------------------------------

/// Both validators must pass; the first failure wins.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    /// First validator.
    pub first: A,
    /// Second validator.
    pub second: B,
}

impl<A, B> And<A, B> {
    /// Create a new `And` validator.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<T: ?Sized, A, B> Validator<T> for And<A, B>
where
    A: Validator<T>,
    B: Validator<T>,
{
    fn validate(&self, value: &T) -> ValidationResult {
        self.first.validate(value).and(self.second.validate(value))
    }
}

/// Every boxed validator must pass, checked in order.
pub struct All<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T: ?Sized> Default for All<T> {
    fn default() -> Self {
        Self {
            validators: Vec::new(),
        }
    }
}

impl<T: ?Sized> All<T> {
    /// Create from a list of validators.
    #[must_use]
    pub fn new(validators: Vec<Box<dyn Validator<T>>>) -> Self {
        Self { validators }
    }

    /// Append a validator.
    pub fn push(&mut self, validator: impl Validator<T> + 'static) {
        self.validators.push(Box::new(validator));
    }

    /// Number of validators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns `true` when there are no validators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T: ?Sized> Validator<T> for All<T> {
    fn validate(&self, value: &T) -> ValidationResult {
        self.validators
            .iter()
            .map(|validator| validator.validate(value))
            .find(|result| !result.is_valid())
            .unwrap_or_default()
    }
}

impl<T: ?Sized> fmt::Debug for All<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field(
                "validators",
                &format!("[{} validators]", self.validators.len()),
            )
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    // -- ValidationError tests --

    #[test]
    fn validation_error_format_multiple_params() {
        let err = ValidationError::new("test", "Between {min} and {max}")
            .with_param("min", 1)
            .with_param("max", 10);
        assert_eq!(err.format_message(), "Between 1 and 10");
        assert_eq!(err.to_string(), "Between 1 and 10");
    }

    #[test]
    fn validation_error_without_params_is_verbatim() {
        let err = ValidationError::new("test", "Literal {braces}");
        assert_eq!(err.format_message(), "Literal {braces}");
    }

    // -- ValidationResult tests --

    #[test]
    fn validation_result_and_keeps_first_error() {
        let first = ValidationResult::Invalid(ValidationError::new("a", "first"));
        let second = ValidationResult::Invalid(ValidationError::new("b", "second"));
        assert_eq!(first.clone().and(second.clone()), first);
        assert_eq!(ValidationResult::Valid.and(second.clone()), second);
        assert!(ValidationResult::default().is_valid());
    }

    // -- Required --

    #[test]
    fn required_rejects_blank() {
        assert!(!Required.validate("").is_valid());
        assert!(!Required.validate("   ").is_valid());
        assert!(Required.validate("2024-06-15").is_valid());
        assert_eq!(
            Required.validate("").error().map(|e| e.code),
            Some(ERROR_CODE_REQUIRED)
        );
    }

    // -- Pattern --

    #[test]
    fn unanchored_pattern_is_a_substring_match() {
        let pattern = Pattern::parse("-06-");
        assert!(pattern.validate("2024-06-15").is_valid());
        assert!(!pattern.validate("2024-07-15").is_valid());
    }

    #[test]
    fn start_anchor_is_a_prefix_match() {
        let pattern = Pattern::parse("^2024-");
        assert!(pattern.validate("2024-06-15").is_valid());
        assert!(!pattern.validate("2023-12-31").is_valid());
    }

    #[test]
    fn regex_syntax_is_matched_literally() {
        let pattern = Pattern::parse(r"^\d{4}-06-\d{2}$");
        assert!(!pattern.validate("2024-06-15").is_valid());
        assert!(pattern.validate(r"\d{4}-06-\d{2}").is_valid());
        assert!(!Pattern::parse("2024.06").validate("2024-06-15").is_valid());
    }

    #[test]
    fn both_anchors_require_equality() {
        let pattern = Pattern::parse("^2024-06-15$");
        assert!(pattern.validate("2024-06-15").is_valid());
        assert!(!pattern.validate("2024-06-15 ").is_valid());
    }

    #[test]
    fn pattern_error_names_the_pattern() {
        let result = Pattern::parse("^2024-").validate("1999-01-01");
        let err = result.error().cloned();
        assert_eq!(err.as_ref().map(|e| e.code), Some(ERROR_CODE_PATTERN));
        assert_eq!(
            err.map(|e| e.format_message()).as_deref(),
            Some("Does not match ^2024-")
        );
    }

    // -- DateRange --

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange::new(Some(date!(2024 - 01 - 01)), Some(date!(2024 - 12 - 31)));
        assert!(range.validate(&date!(2024 - 01 - 01)).is_valid());
        assert!(range.validate(&date!(2024 - 12 - 31)).is_valid());
        assert!(!range.validate(&date!(2023 - 12 - 31)).is_valid());
        assert!(!range.validate(&date!(2025 - 01 - 01)).is_valid());
    }

    #[test]
    fn date_range_messages_use_canonical_dates() {
        let range = DateRange::new(Some(date!(2024 - 01 - 01)), None);
        let message = range
            .validate(&date!(2023 - 06 - 01))
            .error()
            .map(ValidationError::format_message);
        assert_eq!(message.as_deref(), Some("Must be on or after 2024-01-01"));

        let range = DateRange::new(None, Some(date!(2024 - 01 - 01)));
        let message = range
            .validate(&date!(2024 - 06 - 01))
            .error()
            .map(ValidationError::format_message);
        assert_eq!(message.as_deref(), Some("Must be on or before 2024-01-01"));
    }

    #[test]
    fn open_range_accepts_everything() {
        assert!(DateRange::default().validate(&date!(1 - 01 - 01)).is_valid());
    }

    // -- Composition --

    #[test]
    fn and_requires_both() {
        let validator = And::new(Required, Pattern::parse("^2024-"));
        assert!(validator.validate("2024-06-15").is_valid());
        assert_eq!(
            validator.validate("").error().map(|e| e.code),
            Some(ERROR_CODE_REQUIRED)
        );
        assert_eq!(
            validator.validate("2023-06-15").error().map(|e| e.code),
            Some(ERROR_CODE_PATTERN)
        );
    }

    #[test]
    fn all_reports_first_failure_in_order() {
        let mut all = All::<str>::default();
        assert!(all.is_empty());
        assert!(all.validate("anything").is_valid());

        all.push(Pattern::parse("^2024-"));
        all.push(Required);
        assert_eq!(all.len(), 2);
        assert_eq!(
            all.validate("").error().map(|e| e.code),
            Some(ERROR_CODE_PATTERN)
        );
        assert!(all.validate("2024-06-15").is_valid());
    }

    #[test]
    fn all_debug_hides_contents() {
        let all = All::<str>::new(vec![Box::new(Required)]);
        assert_eq!(format!("{all:?}"), "All { validators: \"[1 validators]\" }");
    }
}
