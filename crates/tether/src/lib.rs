#![forbid(unsafe_code)]

//! Tether public facade.
//!
//! Re-exports the binding engine and, with the default `widgets` feature,
//! the headless controls. Most applications only need the prelude:
//!
//! ```
//! use std::rc::Rc;
//! use tether::prelude::*;
//!
//! let ctx = DataBindingContext::new();
//! let switch = Rc::new(Switch::new(false));
//! let state = Rc::new(std::cell::Cell::new(true));
//!
//! ctx.bind(
//!     PropertyFactory::bool(&switch),
//!     GenericProperty::new(&state, |s| s.get(), |s, v| s.set(v)),
//! );
//! assert!(switch.is_on());
//!
//! switch.user_toggle();
//! assert!(!state.get());
//! ```

pub use tether_core as engine;
#[cfg(feature = "widgets")]
pub use tether_widgets as widgets;

pub use tether_core::{
    BindingId, ChangeSignal, DataBinding, DataBindingContext, DataBindingContextOwner,
    GenericDataBinding, GenericProperty, ObservableValue, ReadOnlyProperty, Subscription,
    UpdateValueStrategy,
};

/// Common imports for binding controls to view models.
pub mod prelude {
    pub use tether_core::{
        BindingId, BoolProperty, ChangeSignal, DataBindingContext, DataBindingContextOwner,
        GenericProperty, ObservableValue, ReadOnlyProperty, TextProperty, UpdateValueStrategy,
        ValueProperty,
    };

    #[cfg(feature = "widgets")]
    pub use tether_widgets::{
        Button, Color, ColorProperty, Label, PropertyFactory, Slider, Switch, TextControl,
        TextField, TextView, View,
    };
}
