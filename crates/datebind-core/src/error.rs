#![forbid(unsafe_code)]

//! Error types.

use std::fmt;

/// Errors raised by the date value pipeline.
///
/// User input that does not parse is not an error; it is
/// [`ParseOutcome::Rejected`](crate::date::ParseOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateEditError {
    /// A value outside the supported date variants reached the formatter.
    ///
    /// This is a wiring bug in the host, not a user-input problem.
    UnsupportedValueType {
        /// Rust type name of the offending value.
        type_name: &'static str,
    },
}

impl fmt::Display for DateEditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedValueType { type_name } => {
                write!(f, "unsupported date value type {type_name}")
            }
        }
    }
}

impl std::error::Error for DateEditError {}

/// Failure to install the global log subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingError {
    message: String,
}

#[cfg(feature = "tracing-json")]
impl LoggingError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(feature = "tracing-json")]
impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to install log subscriber: {}", self.message)
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingError {}
