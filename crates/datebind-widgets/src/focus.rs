#![forbid(unsafe_code)]

//! Focus tracking with an edit buffer.
//!
//! Native pickers and manual typing both report intermediate changes while
//! the user is mid-edit. Committing each one rewrites the surface under the
//! cursor, so edits are held until focus is released.
//!
//! ```text
//! Unfocused --gain--> Focused { pending: None }
//! Focused { .. } --buffer(raw)--> Focused { pending: Some(raw) }   last write wins
//! Focused { .. } --gain--> Focused { pending: None }               discards the buffer
//! Focused { pending } --lose--> Unfocused                          hands `pending` back
//! ```

/// Focus state of a date edit. The pending edit only exists while focused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FocusState {
    /// No input focus.
    #[default]
    Unfocused,
    /// Focused, holding the last uncommitted edit, if any.
    Focused {
        /// Last raw edit since focus was gained.
        pending: Option<String>,
    },
}

impl FocusState {
    /// Enter the focused state with an empty buffer.
    pub fn gain(&mut self) {
        *self = Self::Focused { pending: None };
    }

    /// Leave the focused state and return the buffered edit.
    ///
    /// The state is already `Unfocused` when the caller receives the edit,
    /// so committing it cannot re-buffer.
    pub fn lose(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Focused { pending } => pending,
            Self::Unfocused => None,
        }
    }

    /// Buffer `raw` if focused. Returns it back when not focused.
    pub fn buffer(&mut self, raw: String) -> Option<String> {
        match self {
            Self::Focused { pending } => {
                *pending = Some(raw);
                None
            }
            Self::Unfocused => Some(raw),
        }
    }

    /// Returns `true` while focused.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        matches!(self, Self::Focused { .. })
    }

    /// The buffered edit, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        match self {
            Self::Focused { pending } => pending.as_deref(),
            Self::Unfocused => None,
        }
    }
}
