#![forbid(unsafe_code)]

//! Inbound surface events.
//!
//! The rendering surface reports raw edits, focus transitions, and the
//! primary activation gesture. `Focus` is a second focus-obtained channel
//! kept apart from `FocusIn` because hosts observe them separately.

#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Event delivered to a date edit by its surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The surface text changed to the given raw string.
    Change(String),
    /// The control gained input focus.
    FocusIn,
    /// The control lost input focus.
    FocusOut,
    /// The control obtained focus through the secondary focus channel.
    Focus,
    /// Primary activation (click or Enter).
    Click,
}

impl Event {
    /// Convenience constructor for [`Event::Change`].
    #[must_use]
    pub fn change(raw: impl Into<String>) -> Self {
        Self::Change(raw.into())
    }

    /// Convert a Crossterm event into a surface [`Event`].
    ///
    /// Terminal focus reports map to focus transitions, bracketed paste to
    /// a raw change, and a left click or Enter press to `Click`.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event_internal(event)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_crossterm_event_internal(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::FocusGained => Some(Event::FocusIn),
        cte::Event::FocusLost => Some(Event::FocusOut),
        cte::Event::Paste(text) => Some(Event::Change(text)),
        cte::Event::Mouse(mouse) => match mouse.kind {
            cte::MouseEventKind::Down(cte::MouseButton::Left) => Some(Event::Click),
            _ => None,
        },
        cte::Event::Key(key)
            if key.code == cte::KeyCode::Enter && key.kind == cte::KeyEventKind::Press =>
        {
            Some(Event::Click)
        }
        _ => None,
    }
}
