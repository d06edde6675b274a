#![forbid(unsafe_code)]

//! Date edit widget.
//!
//! Binds a typed date to a text-like surface. Raw edits are parsed in the
//! canonical `YYYY-MM-DD` format and committed to the bound value, except
//! while the control has focus: then the last edit is held and committed
//! once focus is released.
//!
//! # Example
//!
//! ```rust
//! use datebind_core::Event;
//! use datebind_widgets::{Cmd, DateEdit};
//! use time::macros::date;
//!
//! let mut edit = DateEdit::new(date!(2024 - 01 - 01));
//!
//! let _ = edit.handle_event(&Event::FocusIn);
//! assert!(edit.handle_event(&Event::change("2024-06-15")).is_none());
//! assert_eq!(edit.value(), &date!(2024 - 01 - 01));
//!
//! let effects = edit.handle_event(&Event::FocusOut).into_vec();
//! assert_eq!(effects, vec![Cmd::DateChanged(date!(2024 - 06 - 15)), Cmd::FocusOut]);
//! ```
//!
//! # Invariants
//!
//! 1. While focused, raw changes never emit `DateChanged` and never touch
//!    the bound value; only the last one is kept.
//! 2. Losing focus commits the kept edit at most once, before `FocusOut`.
//! 3. Gaining focus (either channel) discards any kept edit.
//! 4. A rejected parse leaves the bound value unchanged and emits nothing.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use datebind_core::{
    DateValue, Event, INTERNAL_DATE_FORMAT, ParseOutcome, format_bound, format_for_display,
    parse_from_input,
};
use datebind_validation::{InputChange, InputValidation, ValidationStatus, ValueExpression};
use time::Date;

use crate::classes::{BootstrapClasses, ClassBuilder, ClassProvider, Size};
use crate::cmd::Cmd;
use crate::focus::FocusState;
use crate::params::Parameters;

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_element_id() -> String {
    let id = NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed);
    format!("dateedit-{id}")
}

bitflags! {
    /// Interaction flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct InputFlags: u8 {
        /// The control does not accept interaction.
        const DISABLED = 1 << 0;
        /// The value can be viewed but not changed through the picker.
        const READ_ONLY = 1 << 1;
    }
}

/// Attributes for the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAttributes {
    /// Element id.
    pub id: String,
    /// Input type, always `"date"`.
    pub input_type: &'static str,
    /// Text to show.
    pub value: Option<String>,
    /// Canonical lower bound.
    pub min: Option<String>,
    /// Canonical upper bound.
    pub max: Option<String>,
    /// Validation pattern.
    pub pattern: Option<String>,
    /// Disabled flag.
    pub disabled: bool,
    /// Read-only flag.
    pub read_only: bool,
    /// CSS classes.
    pub class: String,
}

/// A date input bound to a value of type `V`.
pub struct DateEdit<V: DateValue> {
    value: V,
    focus: FocusState,
    min: Option<Date>,
    max: Option<Date>,
    flags: InputFlags,
    size: Size,
    pattern: Option<String>,
    element_id: String,
    class: Option<String>,
    validation: Option<Box<dyn InputValidation>>,
    expression: Option<ValueExpression>,
    class_provider: Box<dyn ClassProvider>,
}

impl<V: DateValue> DateEdit<V> {
    /// Create an unfocused date edit bound to `value`.
    pub fn new(value: V) -> Self {
        Self {
            value,
            focus: FocusState::Unfocused,
            min: None,
            max: None,
            flags: InputFlags::empty(),
            size: Size::None,
            pattern: None,
            element_id: next_element_id(),
            class: None,
            validation: None,
            expression: None,
            class_provider: Box::new(BootstrapClasses),
        }
    }

    // --- Builder methods ---

    /// Set the earliest offered date (builder).
    pub fn with_min(mut self, min: Date) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the latest offered date (builder).
    pub fn with_max(mut self, max: Date) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the control size (builder).
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the disabled flag (builder).
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.flags.set(InputFlags::DISABLED, disabled);
        self
    }

    /// Set the read-only flag (builder).
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.flags.set(InputFlags::READ_ONLY, read_only);
        self
    }

    /// Replace the generated element id (builder).
    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self
    }

    /// Add a CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the validation pattern (builder).
    ///
    /// The pattern reaches validation through [`set_parameters`](Self::set_parameters).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Attach a validation (builder).
    pub fn with_validation(mut self, validation: impl InputValidation + 'static) -> Self {
        self.validation = Some(Box::new(validation));
        self
    }

    /// Use a different class provider (builder).
    pub fn with_class_provider(mut self, provider: impl ClassProvider + 'static) -> Self {
        self.class_provider = Box::new(provider);
        self
    }

    // --- Value access ---

    /// The bound value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Replace the bound value from the host side. Emits nothing.
    pub fn set_value(&mut self, value: V) {
        self.value = value;
    }

    /// Whether the control holds input focus.
    pub fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    /// The uncommitted edit held while focused.
    pub fn pending_edit(&self) -> Option<&str> {
        self.focus.pending()
    }

    /// Text for the surface: the held edit while focused, otherwise the
    /// formatted bound value.
    pub fn display_text(&self) -> Option<String> {
        match self.focus.pending() {
            Some(raw) => Some(raw.to_string()),
            None => format_for_display(&self.value),
        }
    }

    /// Earliest offered date.
    pub fn min(&self) -> Option<Date> {
        self.min
    }

    /// Latest offered date.
    pub fn max(&self) -> Option<Date> {
        self.max
    }

    /// Element id.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Interaction flags.
    pub fn flags(&self) -> InputFlags {
        self.flags
    }

    /// Control size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Validation pattern.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// The attached validation.
    pub fn validation(&self) -> Option<&dyn InputValidation> {
        self.validation.as_deref()
    }

    /// Status of the attached validation; `None` without one.
    pub fn validation_status(&self) -> ValidationStatus {
        self.validation
            .as_ref()
            .map_or(ValidationStatus::None, |validation| validation.status())
    }

    // --- Parameters ---

    /// Apply a batch of parameter updates, then wire validation.
    ///
    /// With a validation attached, a supplied expression is registered
    /// once, and a supplied pattern is registered with the incoming date
    /// when the same batch carries one, else with the current value.
    /// Emits nothing.
    pub fn set_parameters(&mut self, params: Parameters<V>) {
        let Parameters {
            date,
            date_expression,
            pattern,
            min,
            max,
            disabled,
            read_only,
            size,
            class,
            element_id,
        } = params;

        let incoming_text = date.as_ref().map(format_for_display);

        if let Some(date) = date {
            self.value = date;
        }
        if let Some(min) = min {
            self.min = min;
        }
        if let Some(max) = max {
            self.max = max;
        }
        if let Some(disabled) = disabled {
            self.flags.set(InputFlags::DISABLED, disabled);
        }
        if let Some(read_only) = read_only {
            self.flags.set(InputFlags::READ_ONLY, read_only);
        }
        if let Some(size) = size {
            self.size = size;
        }
        if let Some(class) = class {
            self.class = Some(class);
        }
        if let Some(element_id) = element_id {
            self.element_id = element_id;
        }
        if let Some(pattern) = &pattern {
            self.pattern = Some(pattern.clone());
        }

        let Some(validation) = self.validation.as_mut() else {
            return;
        };
        if let Some(expression) = date_expression
            && self.expression.as_ref() != Some(&expression)
        {
            validation.initialize_input_expression(&expression);
            self.expression = Some(expression);
        }
        if let Some(pattern) = &pattern {
            let value = incoming_text.unwrap_or_else(|| format_for_display(&self.value));
            validation.initialize_input_pattern(pattern, value.as_deref());
        }
        validation.initialize_input(format_for_display(&self.value).as_deref());
    }

    // --- Event handling ---

    /// Dispatch a surface event.
    pub fn handle_event(&mut self, event: &Event) -> Cmd<V> {
        match event {
            Event::Change(raw) => self.handle_raw_change(raw.clone()),
            Event::FocusIn => self.on_focus_gained(),
            Event::Focus => self.on_focus(),
            Event::FocusOut => self.on_focus_lost(),
            Event::Click => self.on_click(),
        }
    }

    /// A raw change from the surface. Held while focused, committed
    /// otherwise.
    pub fn handle_raw_change(&mut self, raw: impl Into<String>) -> Cmd<V> {
        match self.focus.buffer(raw.into()) {
            None => {
                datebind_core::trace!(element_id = %self.element_id, "edit buffered");
                Cmd::None
            }
            Some(raw) => self.commit(&raw),
        }
    }

    /// Parse `raw` and, if it is accepted, update the bound value.
    ///
    /// Returns `DateChanged` exactly once for an accepted edit, even when
    /// the value is unchanged. A rejected edit is dropped silently; an
    /// attached validation still hears about it.
    pub fn commit(&mut self, raw: &str) -> Cmd<V> {
        let _span =
            datebind_core::debug_span!("date_edit_commit", element_id = %self.element_id)
                .entered();

        let outcome = parse_from_input::<V>(raw);
        let accepted = outcome.is_accepted();
        let cmd = match outcome {
            ParseOutcome::Accepted(value) => {
                datebind_core::debug!(value = ?value, "commit accepted");
                self.value = value.clone();
                Cmd::DateChanged(value)
            }
            ParseOutcome::Rejected => {
                datebind_core::debug!(raw, "commit rejected");
                Cmd::None
            }
        };
        if let Some(validation) = self.validation.as_mut() {
            validation.notify_input_changed(InputChange {
                text: raw,
                accepted,
            });
        }
        cmd
    }

    /// Focus gained: start a fresh edit buffer.
    pub fn on_focus_gained(&mut self) -> Cmd<V> {
        self.focus.gain();
        datebind_core::debug!(element_id = %self.element_id, "focus gained");
        Cmd::FocusIn
    }

    /// Secondary focus channel. Same effect as
    /// [`on_focus_gained`](Self::on_focus_gained), different notification.
    pub fn on_focus(&mut self) -> Cmd<V> {
        self.focus.gain();
        datebind_core::debug!(element_id = %self.element_id, "focus obtained");
        Cmd::Focus
    }

    /// Focus lost: commit the held edit, then notify.
    pub fn on_focus_lost(&mut self) -> Cmd<V> {
        let pending = self.focus.lose();
        datebind_core::debug!(
            element_id = %self.element_id,
            flushed = pending.is_some(),
            "focus lost"
        );
        let changed = match pending {
            Some(raw) => self.commit(&raw),
            None => Cmd::None,
        };
        changed.then(Cmd::FocusOut)
    }

    /// Primary activation: open the native picker unless disabled or
    /// read-only.
    pub fn on_click(&mut self) -> Cmd<V> {
        if self
            .flags
            .intersects(InputFlags::DISABLED | InputFlags::READ_ONLY)
        {
            datebind_core::trace!(element_id = %self.element_id, "picker suppressed");
            return Cmd::None;
        }
        Cmd::ActivateDatePicker {
            element_id: self.element_id.clone(),
            format: INTERNAL_DATE_FORMAT,
        }
    }

    // --- Rendering surface ---

    /// CSS classes for the surface.
    pub fn classes(&self) -> String {
        let provider = self.class_provider.as_ref();
        let status = self.validation_status();
        let mut builder = ClassBuilder::new();
        builder
            .append(provider.date_edit())
            .append_if(provider.date_edit_size(self.size), self.size != Size::None)
            .append_if(
                provider.date_edit_validation(status),
                status != ValidationStatus::None,
            );
        if let Some(class) = &self.class {
            builder.append(class);
        }
        builder.build()
    }

    /// Everything the surface needs to render the input.
    pub fn attributes(&self) -> InputAttributes {
        InputAttributes {
            id: self.element_id.clone(),
            input_type: "date",
            value: self.display_text(),
            min: format_bound(self.min),
            max: format_bound(self.max),
            pattern: self.pattern.clone(),
            disabled: self.flags.contains(InputFlags::DISABLED),
            read_only: self.flags.contains(InputFlags::READ_ONLY),
            class: self.classes(),
        }
    }
}

impl<V: DateValue> fmt::Debug for DateEdit<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateEdit")
            .field("value", &self.value)
            .field("focus", &self.focus)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("flags", &self.flags)
            .field("size", &self.size)
            .field("element_id", &self.element_id)
            .field("validation_status", &self.validation_status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datebind_validation::Validation;
    use std::cell::RefCell;
    use std::rc::Rc;
    use time::macros::date;

    /// Records every call it receives.
    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl InputValidation for Recorder {
        fn initialize_input_expression(&mut self, expression: &ValueExpression) {
            self.calls.borrow_mut().push(format!("expression {expression}"));
        }

        fn initialize_input_pattern(&mut self, pattern: &str, value: Option<&str>) {
            self.calls
                .borrow_mut()
                .push(format!("pattern {pattern} {}", value.unwrap_or("<none>")));
        }

        fn initialize_input(&mut self, value: Option<&str>) {
            self.calls
                .borrow_mut()
                .push(format!("input {}", value.unwrap_or("<none>")));
        }

        fn notify_input_changed(&mut self, change: InputChange<'_>) {
            self.calls
                .borrow_mut()
                .push(format!("changed {} {}", change.text, change.accepted));
        }

        fn status(&self) -> ValidationStatus {
            ValidationStatus::None
        }
    }

    fn edit() -> DateEdit<Date> {
        DateEdit::new(date!(2024 - 01 - 01)).with_element_id("ship-date")
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = DateEdit::new(date!(2024 - 01 - 01));
        let b = DateEdit::new(date!(2024 - 01 - 01));
        assert!(a.element_id().starts_with("dateedit-"));
        assert_ne!(a.element_id(), b.element_id());
    }

    #[test]
    fn display_text_prefers_pending_edit() {
        let mut edit = edit();
        assert_eq!(edit.display_text().as_deref(), Some("2024-01-01"));
        let _ = edit.on_focus_gained();
        assert_eq!(edit.display_text().as_deref(), Some("2024-01-01"));
        let _ = edit.handle_raw_change("2024-0");
        assert_eq!(edit.display_text().as_deref(), Some("2024-0"));
    }

    #[test]
    fn nullable_value_without_date_has_no_text() {
        let edit = DateEdit::<Option<Date>>::new(None);
        assert_eq!(edit.display_text(), None);
        assert_eq!(edit.attributes().value, None);
    }

    #[test]
    fn click_opens_picker_with_canonical_format() {
        let mut edit = edit();
        assert_eq!(
            edit.on_click(),
            Cmd::ActivateDatePicker {
                element_id: "ship-date".into(),
                format: INTERNAL_DATE_FORMAT,
            }
        );
    }

    #[test]
    fn click_is_suppressed_when_disabled_or_read_only() {
        assert!(edit().with_disabled(true).on_click().is_none());
        assert!(edit().with_read_only(true).on_click().is_none());
        assert!(!edit().with_disabled(false).on_click().is_none());
    }

    #[test]
    fn handle_event_dispatches() {
        let mut edit = edit();
        assert_eq!(edit.handle_event(&Event::Focus), Cmd::Focus);
        assert!(edit.is_focused());
        assert!(edit.handle_event(&Event::change("2024-02-02")).is_none());
        assert_eq!(
            edit.handle_event(&Event::FocusOut),
            Cmd::Batch(vec![Cmd::DateChanged(date!(2024 - 02 - 02)), Cmd::FocusOut])
        );
        assert!(!edit.handle_event(&Event::Click).is_none());
    }

    #[test]
    fn focus_lost_without_edit_only_notifies() {
        let mut edit = edit();
        let _ = edit.on_focus_gained();
        assert_eq!(edit.on_focus_lost(), Cmd::FocusOut);
    }

    #[test]
    fn commit_emits_even_when_value_is_unchanged() {
        let mut edit = edit();
        assert_eq!(
            edit.commit("2024-01-01"),
            Cmd::DateChanged(date!(2024 - 01 - 01))
        );
    }

    #[test]
    fn set_value_emits_nothing_and_updates_display() {
        let mut edit = edit();
        edit.set_value(date!(2025 - 05 - 05));
        assert_eq!(edit.display_text().as_deref(), Some("2025-05-05"));
    }

    #[test]
    fn classes_follow_size_and_validation() {
        let plain = edit();
        assert_eq!(plain.classes(), "form-control");

        let mut edit = edit()
            .with_size(Size::Small)
            .with_class("wide")
            .with_validation(Validation::new());
        assert_eq!(edit.classes(), "form-control form-control-sm wide");

        let _ = edit.commit("not a date");
        assert_eq!(edit.validation_status(), ValidationStatus::Error);
        assert_eq!(edit.classes(), "form-control form-control-sm is-invalid wide");

        let _ = edit.commit("2024-03-03");
        assert_eq!(edit.classes(), "form-control form-control-sm is-valid wide");
    }

    #[test]
    fn custom_class_provider() {
        struct Plain;

        impl ClassProvider for Plain {
            fn date_edit(&self) -> &str {
                "date"
            }

            fn date_edit_size(&self, _size: Size) -> &str {
                "sized"
            }

            fn date_edit_validation(&self, _status: ValidationStatus) -> &str {
                "checked"
            }
        }

        let edit = edit().with_class_provider(Plain).with_size(Size::Large);
        assert_eq!(edit.classes(), "date sized");
    }

    #[test]
    fn attributes_carry_bounds_and_flags() {
        let edit = edit()
            .with_min(date!(2024 - 01 - 01))
            .with_max(date!(2024 - 12 - 31))
            .with_pattern("^2024-")
            .with_read_only(true);
        assert_eq!(
            edit.attributes(),
            InputAttributes {
                id: "ship-date".into(),
                input_type: "date",
                value: Some("2024-01-01".into()),
                min: Some("2024-01-01".into()),
                max: Some("2024-12-31".into()),
                pattern: Some("^2024-".into()),
                disabled: false,
                read_only: true,
                class: "form-control".into(),
            }
        );
    }

    #[test]
    fn bounds_are_not_enforced_by_the_pipeline() {
        let mut edit = edit().with_max(date!(2024 - 12 - 31));
        assert_eq!(
            edit.commit("2030-01-01"),
            Cmd::DateChanged(date!(2030 - 01 - 01))
        );
    }

    #[test]
    fn parameters_apply_supplied_fields_only() {
        let mut edit = edit().with_min(date!(2020 - 01 - 01)).with_size(Size::Large);
        edit.set_parameters(
            Parameters::new()
                .date(date!(2024 - 06 - 15))
                .max(Some(date!(2024 - 12 - 31)))
                .disabled(true)
                .element_id("renamed"),
        );
        assert_eq!(edit.value(), &date!(2024 - 06 - 15));
        assert_eq!(edit.min(), Some(date!(2020 - 01 - 01)));
        assert_eq!(edit.max(), Some(date!(2024 - 12 - 31)));
        assert_eq!(edit.size(), Size::Large);
        assert!(edit.flags().contains(InputFlags::DISABLED));
        assert_eq!(edit.element_id(), "renamed");

        edit.set_parameters(Parameters::new().min(None));
        assert_eq!(edit.min(), None);
    }

    #[test]
    fn parameters_without_validation_skip_wiring() {
        let mut edit = edit();
        edit.set_parameters(Parameters::new().pattern("^2024-").date_expression("order.date"));
        assert_eq!(edit.pattern(), Some("^2024-"));
        assert!(edit.validation().is_none());
    }

    #[test]
    fn pattern_is_registered_with_incoming_date() {
        let recorder = Recorder::default();
        let mut edit = edit().with_validation(recorder.clone());
        edit.set_parameters(
            Parameters::new()
                .date(date!(2024 - 06 - 15))
                .pattern("^2024-"),
        );
        assert_eq!(
            recorder.calls(),
            vec!["pattern ^2024- 2024-06-15", "input 2024-06-15"]
        );
    }

    #[test]
    fn pattern_without_incoming_date_uses_current_value() {
        let recorder = Recorder::default();
        let mut edit = edit().with_validation(recorder.clone());
        edit.set_parameters(Parameters::new().pattern("^2024-"));
        assert_eq!(
            recorder.calls(),
            vec!["pattern ^2024- 2024-01-01", "input 2024-01-01"]
        );
    }

    #[test]
    fn expression_is_registered_once() {
        let recorder = Recorder::default();
        let mut edit = edit().with_validation(recorder.clone());
        edit.set_parameters(Parameters::new().date_expression("order.date"));
        edit.set_parameters(Parameters::new().date_expression("order.date"));
        edit.set_parameters(Parameters::new());
        assert_eq!(
            recorder.calls(),
            vec![
                "expression order.date",
                "input 2024-01-01",
                "input 2024-01-01",
                "input 2024-01-01",
            ]
        );
    }

    #[test]
    fn validation_hears_every_commit() {
        let recorder = Recorder::default();
        let mut edit = edit().with_validation(recorder.clone());
        let _ = edit.commit("2024-13-40");
        let _ = edit.commit("2024-06-15");
        assert_eq!(
            recorder.calls(),
            vec!["changed 2024-13-40 false", "changed 2024-06-15 true"]
        );
    }

    #[test]
    fn validation_is_not_told_about_buffered_edits() {
        let recorder = Recorder::default();
        let mut edit = edit().with_validation(recorder.clone());
        let _ = edit.on_focus_gained();
        let _ = edit.handle_raw_change("2024-06-15");
        assert!(recorder.calls().is_empty());
        let _ = edit.on_focus_lost();
        assert_eq!(recorder.calls(), vec!["changed 2024-06-15 true"]);
    }

    #[test]
    fn debug_omits_collaborators() {
        let rendered = format!("{:?}", edit());
        assert!(rendered.starts_with("DateEdit {"));
        assert!(rendered.contains("ship-date"));
    }
}
