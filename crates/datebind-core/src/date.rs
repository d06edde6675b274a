#![forbid(unsafe_code)]

//! Canonical date values.
//!
//! A bound value is one of two variants: a calendar [`Date`] or an
//! [`OffsetDateTime`]. Both render and parse through one fixed,
//! locale-independent format, `YYYY-MM-DD`.
//!
//! # Example
//!
//! ```rust
//! use datebind_core::date::{ParseOutcome, format_for_display, parse_from_input};
//! use time::macros::date;
//!
//! let parsed: ParseOutcome<time::Date> = parse_from_input("2024-06-15");
//! assert_eq!(parsed, ParseOutcome::Accepted(date!(2024 - 06 - 15)));
//! assert_eq!(format_for_display(&date!(2024 - 06 - 15)).as_deref(), Some("2024-06-15"));
//!
//! assert!(!parse_from_input::<time::Date>("2024-13-40").is_accepted());
//! ```

use std::any::{Any, type_name};

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::DateEditError;

/// Canonical format string handed to native pickers.
///
/// Matches what [`DateVariant::format_canonical`] produces.
pub const INTERNAL_DATE_FORMAT: &str = "yyyy-MM-dd";

/// The supported date variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateVariant {
    /// A calendar date.
    Date(Date),
    /// A date-time with a UTC offset.
    DateTime(OffsetDateTime),
}

impl DateVariant {
    /// The calendar date this variant displays.
    ///
    /// Offset values yield the date in their own offset.
    #[must_use]
    pub fn date(&self) -> Date {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(datetime) => datetime.date(),
        }
    }

    /// Render in the canonical `YYYY-MM-DD` form.
    #[must_use]
    pub fn format_canonical(&self) -> String {
        format_date(self.date())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for time::Date {}
    impl Sealed for time::OffsetDateTime {}
    impl<T: Sealed> Sealed for Option<T> {}
}

/// A value a date edit can be bound to.
///
/// Implemented for [`Date`], [`OffsetDateTime`], and `Option` of either.
/// The `Option` forms are nullable: `None` has no display text, and an
/// empty input parses to `None`.
pub trait DateValue: sealed::Sealed + Clone + PartialEq + std::fmt::Debug + 'static {
    /// The variant to display, or `None` for an empty nullable value.
    fn variant(&self) -> Option<DateVariant>;

    /// Parse canonical input. `None` means the input was rejected.
    fn parse_canonical(raw: &str) -> Option<Self>;
}

impl DateValue for Date {
    fn variant(&self) -> Option<DateVariant> {
        Some(DateVariant::Date(*self))
    }

    fn parse_canonical(raw: &str) -> Option<Self> {
        parse_date(raw)
    }
}

impl DateValue for OffsetDateTime {
    fn variant(&self) -> Option<DateVariant> {
        Some(DateVariant::DateTime(*self))
    }

    fn parse_canonical(raw: &str) -> Option<Self> {
        parse_date(raw).map(|date| date.midnight().assume_utc())
    }
}

impl<T: DateValue> DateValue for Option<T> {
    fn variant(&self) -> Option<DateVariant> {
        self.as_ref().and_then(DateValue::variant)
    }

    fn parse_canonical(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return Some(None);
        }
        T::parse_canonical(raw).map(Some)
    }
}

/// Result of parsing raw input. Rejection is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<V> {
    /// The input parsed to a value.
    Accepted(V),
    /// The input did not match the canonical format.
    Rejected,
}

impl<V> ParseOutcome<V> {
    /// Returns `true` for `Accepted`.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The accepted value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected => None,
        }
    }

    /// Consume into the accepted value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected => None,
        }
    }
}

impl<V> From<Option<V>> for ParseOutcome<V> {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Rejected, Self::Accepted)
    }
}

/// Display text for a bound value. `None` for an empty nullable value.
#[must_use]
pub fn format_for_display<V: DateValue>(value: &V) -> Option<String> {
    value.variant().map(|variant| variant.format_canonical())
}

/// Display text for an optional bound such as `Min` or `Max`.
#[must_use]
pub fn format_bound(bound: Option<Date>) -> Option<String> {
    bound.map(format_date)
}

/// Display text for a value whose type is only known at runtime.
///
/// # Errors
///
/// Returns [`DateEditError::UnsupportedValueType`] for anything other than
/// the two date variants or `Option` of them.
pub fn format_any<T: Any>(value: &T) -> Result<Option<String>, DateEditError> {
    let any = value as &dyn Any;
    if let Some(date) = any.downcast_ref::<Date>() {
        return Ok(format_for_display(date));
    }
    if let Some(datetime) = any.downcast_ref::<OffsetDateTime>() {
        return Ok(format_for_display(datetime));
    }
    if let Some(date) = any.downcast_ref::<Option<Date>>() {
        return Ok(format_for_display(date));
    }
    if let Some(datetime) = any.downcast_ref::<Option<OffsetDateTime>>() {
        return Ok(format_for_display(datetime));
    }
    Err(DateEditError::UnsupportedValueType {
        type_name: type_name::<T>(),
    })
}

/// Parse raw input into a bound value.
#[must_use]
pub fn parse_from_input<V: DateValue>(raw: &str) -> ParseOutcome<V> {
    V::parse_canonical(raw).into()
}

fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    // `[year]` also takes a leading sign; canonical years are bare digits.
    if !raw.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

fn format_date(date: Date) -> String {
    let year = date.year();
    let month = u8::from(date.month());
    let day = date.day();
    if year < 0 {
        format!("-{:04}-{month:02}-{day:02}", -year)
    } else {
        format!("{year:04}-{month:02}-{day:02}")
    }
}
