#![forbid(unsafe_code)]

//! Datebind public facade crate.
//!
//! Re-exports the date edit component, its value pipeline, and the
//! validation contract, plus a prelude for day-to-day usage.
//!
//! ```
//! use datebind::prelude::*;
//! use time::macros::date;
//!
//! let mut edit = DateEdit::new(date!(2024 - 01 - 01)).with_validation(Validation::new());
//!
//! let _ = edit.handle_event(&Event::FocusIn);
//! let _ = edit.handle_event(&Event::change("2024-06-15"));
//! let cmd = edit.handle_event(&Event::FocusOut);
//!
//! assert_eq!(cmd.changed_value(), Some(&date!(2024 - 06 - 15)));
//! assert_eq!(edit.validation_status(), ValidationStatus::Success);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use datebind_core::{
    DateEditError, DateValue, DateVariant, Event, INTERNAL_DATE_FORMAT, ParseOutcome, format_any,
    format_bound, format_for_display, parse_from_input,
};

#[cfg(feature = "tracing-json")]
pub use datebind_core::error::LoggingError;
#[cfg(feature = "tracing-json")]
pub use datebind_core::logging::install_json_subscriber;

// --- Validation re-exports -------------------------------------------------

pub use datebind_validation::{
    DateRange, InputChange, InputValidation, Pattern, Required, Validation, ValidationError,
    ValidationResult, ValidationStatus, Validator, ValueExpression,
};

// --- Widget re-exports -----------------------------------------------------

pub use datebind_widgets::{
    BootstrapClasses, ClassProvider, Cmd, DateEdit, InputAttributes, InputFlags, Parameters,
    Size,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for datebind hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value outside the supported date variants was formatted.
    Value(DateEditError),
    /// The global log subscriber could not be installed.
    #[cfg(feature = "tracing-json")]
    Logging(LoggingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(err) => write!(f, "{err}"),
            #[cfg(feature = "tracing-json")]
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Value(err) => Some(err),
            #[cfg(feature = "tracing-json")]
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<DateEditError> for Error {
    fn from(err: DateEditError) -> Self {
        Self::Value(err)
    }
}

#[cfg(feature = "tracing-json")]
impl From<LoggingError> for Error {
    fn from(err: LoggingError) -> Self {
        Self::Logging(err)
    }
}

/// Standard result type for datebind APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cmd, DateEdit, DateValue, Error, Event, InputValidation, Parameters, Result, Size,
        Validation, ValidationStatus,
    };

    pub use crate::{core, validation, widgets};
}

pub use datebind_core as core;
pub use datebind_validation as validation;
pub use datebind_widgets as widgets;
