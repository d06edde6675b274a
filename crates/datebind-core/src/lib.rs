#![forbid(unsafe_code)]

//! Core: canonical date variants, the canonical-format parser/formatter,
//! surface events, and logging.

pub mod date;
pub mod error;
pub mod event;
pub mod logging;

pub use date::{
    DateValue, DateVariant, INTERNAL_DATE_FORMAT, ParseOutcome, format_any, format_bound,
    format_for_display, parse_from_input,
};
pub use error::DateEditError;
pub use event::Event;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
