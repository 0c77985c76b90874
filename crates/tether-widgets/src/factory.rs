#![forbid(unsafe_code)]

//! Ready-made bindable properties for the built-in controls.
//!
//! Every property reaches its control through a weak handle, so binding a
//! control never keeps it alive. Properties of controls with a native
//! change event carry that event's [`ChangeSignal`]; the rest
//! (`background_color`, `enabled`, label text) are target-only and are
//! meant for [`UpdateValueStrategy::ModelToTarget`] bindings.
//!
//! [`ChangeSignal`]: tether_core::ChangeSignal
//! [`UpdateValueStrategy::ModelToTarget`]: tether_core::UpdateValueStrategy::ModelToTarget
//!
//! ```
//! use std::rc::Rc;
//! use tether_core::ObservableValue;
//! use tether_widgets::{PropertyFactory, Slider};
//!
//! let slider = Rc::new(Slider::new(0.2));
//! let value = PropertyFactory::value(&slider);
//! value.set(0.8);
//! assert_eq!(slider.value(), 0.8);
//! assert_eq!(value.label(), "slider.value");
//! ```

use std::rc::Rc;

use tether_core::{BoolProperty, GenericProperty, TextProperty, ValueProperty};

use crate::color::Color;
use crate::slider::Slider;
use crate::text::TextControl;
use crate::toggle::{Button, Switch};
use crate::view::View;

/// A property carrying a color.
pub type ColorProperty = GenericProperty<Color>;

/// Constructors for control properties.
pub struct PropertyFactory;

impl PropertyFactory {
    /// The text of a [`Label`](crate::Label), [`TextField`](crate::TextField)
    /// or [`TextView`](crate::TextView).
    pub fn text<W: TextControl + 'static>(control: &Rc<W>) -> TextProperty {
        let property = GenericProperty::new(control, W::text, W::set_text)
            .with_label(format!("{}.text", W::KIND));
        match control.text_signal() {
            Some(signal) => property.with_signal(signal.clone()),
            None => property,
        }
    }

    /// The on state of a [`Switch`].
    pub fn bool(switch: &Rc<Switch>) -> BoolProperty {
        GenericProperty::new(switch, Switch::is_on, Switch::set_on)
            .with_signal(switch.value_changed().clone())
            .with_label("switch.on")
    }

    /// The position of a [`Slider`].
    pub fn value(slider: &Rc<Slider>) -> ValueProperty {
        GenericProperty::new(slider, Slider::value, |s, v| {
            s.set_value(v);
        })
        .with_signal(slider.value_changed().clone())
        .with_label("slider.value")
    }

    /// The background color of a [`View`]. Target-only.
    pub fn background_color(view: &Rc<View>) -> ColorProperty {
        GenericProperty::new(view, View::background_color, View::set_background_color)
            .with_label("view.background_color")
    }

    /// Whether a [`Button`] accepts input. Target-only.
    pub fn enabled(button: &Rc<Button>) -> BoolProperty {
        GenericProperty::new(button, Button::is_enabled, Button::set_enabled)
            .with_label("button.enabled")
    }

    /// The selected state of a [`Button`].
    pub fn selected(button: &Rc<Button>) -> BoolProperty {
        GenericProperty::new(button, Button::is_selected, Button::set_selected)
            .with_signal(button.value_changed().clone())
            .with_label("button.selected")
    }
}
