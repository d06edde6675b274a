#![forbid(unsafe_code)]

//! Widgets for datebind.
//!
//! [`DateEdit`] is the date input component; [`Cmd`] carries the effects it
//! asks the host to perform.

pub mod classes;
pub mod cmd;
pub mod date_edit;
pub mod focus;
pub mod params;

pub use classes::{BootstrapClasses, ClassBuilder, ClassProvider, Size};
pub use cmd::Cmd;
pub use date_edit::{DateEdit, InputAttributes, InputFlags};
pub use focus::FocusState;
pub use params::Parameters;
