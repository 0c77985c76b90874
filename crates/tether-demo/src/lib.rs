#![forbid(unsafe_code)]

//! A settings screen built on Tether.
//!
//! The screen has a slider with a percentage text field beside it, an on/off
//! switch, a name field, and a root view whose background tracks the switch.
//! [`Controller`] wires five bindings between these controls and a
//! [`ViewModel`]; [`UserAction`] simulates input against them.

pub mod controller;
pub mod model;
pub mod script;
pub mod view_model;

pub use controller::{Controller, ScreenBindings, ScreenState, Widgets};
pub use model::DataModel;
pub use script::{ActionParseError, UserAction};
pub use view_model::{ViewModel, format_percent, parse_percent};
