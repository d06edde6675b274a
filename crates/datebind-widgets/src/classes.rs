#![forbid(unsafe_code)]

//! CSS class assembly for the rendering surface.

use datebind_validation::ValidationStatus;

/// Control size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Size {
    /// Surface default; contributes no class.
    #[default]
    None,
    /// Small control.
    Small,
    /// Large control.
    Large,
}

/// Maps widget state to class names for a particular CSS framework.
pub trait ClassProvider {
    /// Base class of a date edit.
    fn date_edit(&self) -> &str;

    /// Class for a size other than [`Size::None`].
    fn date_edit_size(&self, size: Size) -> &str;

    /// Class for a validation status other than [`ValidationStatus::None`].
    fn date_edit_validation(&self, status: ValidationStatus) -> &str;
}

/// Bootstrap class names.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapClasses;

impl ClassProvider for BootstrapClasses {
    fn date_edit(&self) -> &str {
        "form-control"
    }

    fn date_edit_size(&self, size: Size) -> &str {
        match size {
            Size::None => "",
            Size::Small => "form-control-sm",
            Size::Large => "form-control-lg",
        }
    }

    fn date_edit_validation(&self, status: ValidationStatus) -> &str {
        match status {
            ValidationStatus::None => "",
            ValidationStatus::Success => "is-valid",
            ValidationStatus::Error => "is-invalid",
        }
    }
}

/// Space-separated class list. Empty names are skipped.
#[derive(Debug, Clone, Default)]
pub struct ClassBuilder {
    classes: Vec<String>,
}

impl ClassBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a class.
    pub fn append(&mut self, class: impl AsRef<str>) -> &mut Self {
        let class = class.as_ref().trim();
        if !class.is_empty() {
            self.classes.push(class.to_string());
        }
        self
    }

    /// Append a class when `condition` holds.
    pub fn append_if(&mut self, class: impl AsRef<str>, condition: bool) -> &mut Self {
        if condition {
            self.append(class);
        }
        self
    }

    /// The joined class list.
    #[must_use]
    pub fn build(&self) -> String {
        self.classes.join(" ")
    }
}
