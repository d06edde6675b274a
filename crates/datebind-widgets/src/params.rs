#![forbid(unsafe_code)]

//! Batched parameter updates from the host.

use datebind_validation::ValueExpression;
use time::Date;

use crate::classes::Size;

/// One batch of parameter updates. `None` fields were not supplied.
///
/// `min` and `max` are doubly optional so a bound can be cleared with
/// `Some(None)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters<V> {
    /// New bound value.
    pub date: Option<V>,
    /// Expression identifying the bound value, for validation.
    pub date_expression: Option<ValueExpression>,
    /// Validation pattern.
    pub pattern: Option<String>,
    /// Earliest date offered by the surface.
    pub min: Option<Option<Date>>,
    /// Latest date offered by the surface.
    pub max: Option<Option<Date>>,
    /// Disabled flag.
    pub disabled: Option<bool>,
    /// Read-only flag.
    pub read_only: Option<bool>,
    /// Control size.
    pub size: Option<Size>,
    /// Extra CSS class.
    pub class: Option<String>,
    /// Element id; replaces the generated one.
    pub element_id: Option<String>,
}

impl<V> Default for Parameters<V> {
    fn default() -> Self {
        Self {
            date: None,
            date_expression: None,
            pattern: None,
            min: None,
            max: None,
            disabled: None,
            read_only: None,
            size: None,
            class: None,
            element_id: None,
        }
    }
}

impl<V> Parameters<V> {
    /// An empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the bound value.
    #[must_use]
    pub fn date(mut self, value: V) -> Self {
        self.date = Some(value);
        self
    }

    /// Supply the value expression.
    #[must_use]
    pub fn date_expression(mut self, expression: impl Into<ValueExpression>) -> Self {
        self.date_expression = Some(expression.into());
        self
    }

    /// Supply the validation pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Supply the lower bound; `None` clears it.
    #[must_use]
    pub fn min(mut self, min: Option<Date>) -> Self {
        self.min = Some(min);
        self
    }

    /// Supply the upper bound; `None` clears it.
    #[must_use]
    pub fn max(mut self, max: Option<Date>) -> Self {
        self.max = Some(max);
        self
    }

    /// Supply the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Supply the read-only flag.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    /// Supply the size.
    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Supply the extra CSS class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Supply the element id.
    #[must_use]
    pub fn element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }
}
