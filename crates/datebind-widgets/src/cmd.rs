#![forbid(unsafe_code)]

//! Effects handed to the host.
//!
//! Entry points on a date edit return a [`Cmd`] instead of calling back
//! into the application. The host runs the effects in order; nothing in
//! the widget waits for them, so completion order relative to the next
//! surface event does not matter.

/// An effect for the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd<V> {
    /// Nothing to do.
    None,
    /// Several effects, in order.
    Batch(Vec<Cmd<V>>),
    /// The bound value changed; write it back to the application.
    DateChanged(V),
    /// Forward the focus-gained notification.
    FocusIn,
    /// Forward the focus-lost notification.
    FocusOut,
    /// Forward the secondary focus notification.
    Focus,
    /// Open the native picker for an element.
    ActivateDatePicker {
        /// Id of the input element.
        element_id: String,
        /// Date format the picker should use.
        format: &'static str,
    },
}

impl<V> Default for Cmd<V> {
    fn default() -> Self {
        Self::None
    }
}

impl<V> Cmd<V> {
    /// Combine effects, dropping `None` and flattening nested batches.
    #[must_use]
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(cmds.len());
        for cmd in cmds {
            cmd.flatten_into(&mut flat);
        }
        match flat.len() {
            0 => Self::None,
            1 => flat.pop().unwrap_or_default(),
            _ => Self::Batch(flat),
        }
    }

    /// Run `next` after `self`.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self::batch(vec![self, next])
    }

    /// Returns `true` for `Cmd::None`.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The effects in execution order, without `None` or nesting.
    #[must_use]
    pub fn into_vec(self) -> Vec<Self> {
        let mut flat = Vec::new();
        self.flatten_into(&mut flat);
        flat
    }

    /// The value carried by the first `DateChanged`, if any.
    #[must_use]
    pub fn changed_value(&self) -> Option<&V> {
        match self {
            Self::DateChanged(value) => Some(value),
            Self::Batch(cmds) => cmds.iter().find_map(Self::changed_value),
            _ => None,
        }
    }

    fn flatten_into(self, out: &mut Vec<Self>) {
        match self {
            Self::None => {}
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}
