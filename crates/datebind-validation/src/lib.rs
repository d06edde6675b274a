#![forbid(unsafe_code)]

//! Validation for datebind inputs.
//!
//! - [`Validator`] and the built-in validators check a value and report a
//!   [`ValidationResult`] with an i18n-friendly [`ValidationError`].
//! - [`InputValidation`] is the contract a date edit talks to: it registers
//!   the bound-value expression and pattern, and reports every commit.
//! - [`Validation`] is the default implementation of that contract.
//!
//! # Example
//!
//! ```rust
//! use datebind_validation::{InputChange, InputValidation, Validation, ValidationStatus};
//!
//! let mut validation = Validation::new();
//! validation.notify_input_changed(InputChange::rejected("2024-13-40"));
//! assert_eq!(validation.status(), ValidationStatus::Error);
//!
//! validation.notify_input_changed(InputChange::accepted("2024-06-15"));
//! assert_eq!(validation.status(), ValidationStatus::Success);
//! ```

mod input;
mod validators;

pub use input::{InputChange, InputValidation, Validation, ValidationStatus, ValueExpression};
pub use validators::{
    // Composition
    All,
    And,
    // Built-in validators
    DateRange,
    // Error codes
    ERROR_CODE_DATE,
    ERROR_CODE_PATTERN,
    ERROR_CODE_RANGE,
    ERROR_CODE_REQUIRED,
    Pattern,
    Required,
    // Core types
    ValidationError,
    ValidationResult,
    Validator,
};
