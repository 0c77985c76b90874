#![forbid(unsafe_code)]

//! Headless controls for Tether.
//!
//! Each control keeps its state behind interior mutability and exposes its
//! native events as [`ChangeSignal`](tether_core::ChangeSignal)s. Two kinds
//! of mutation are distinguished:
//!
//! - `set_*` methods change state programmatically and never fire a signal.
//!   Bindings write through these.
//! - `user_*` methods simulate user input: they change state and fire the
//!   control's signal, which is what drives target→model transfers.
//!
//! [`PropertyFactory`] turns a control into a bindable property.

pub mod color;
pub mod factory;
pub mod slider;
pub mod text;
pub mod toggle;
pub mod view;

pub use color::Color;
pub use factory::{ColorProperty, PropertyFactory};
pub use slider::Slider;
pub use text::{Label, TextControl, TextField, TextView};
pub use toggle::{Button, Switch};
pub use view::View;
