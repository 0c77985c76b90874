#![forbid(unsafe_code)]

//! The settings screen controller: owns the controls, the view model and
//! the binding context that ties them together.

use std::fmt;
use std::rc::{Rc, Weak};

use tether_core::{
    BindingId, DataBindingContext, DataBindingContextOwner, GenericProperty, ReadOnlyProperty,
    UpdateValueStrategy,
};
use tether_widgets::{Color, PropertyFactory, Slider, Switch, TextControl, TextField, View};

use crate::view_model::ViewModel;

/// The controls of the settings screen.
#[derive(Debug)]
pub struct Widgets {
    /// Value slider over `[0, 1]`.
    pub slider: Rc<Slider>,
    /// Percentage text next to the slider.
    pub slider_value: Rc<TextField>,
    /// On/off switch for the model's `state`.
    pub state: Rc<Switch>,
    /// Editable name.
    pub name: Rc<TextField>,
    /// Root view; its background follows the switch.
    pub view: Rc<View>,
}

impl Widgets {
    fn new() -> Self {
        Self {
            slider: Rc::new(Slider::new(0.0)),
            slider_value: Rc::new(TextField::new()),
            state: Rc::new(Switch::new(false)),
            name: Rc::new(TextField::new()),
            view: Rc::new(View::new()),
        }
    }
}

/// Handles of the screen's bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBindings {
    pub value: BindingId,
    pub value_text: BindingId,
    pub state: BindingId,
    pub name: BindingId,
    pub background: BindingId,
}

/// What the screen currently displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState {
    pub slider: f32,
    pub slider_value: String,
    pub state: bool,
    pub name: String,
    pub background: Color,
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slider={:.2} text={:?} switch={} name={:?} background={}",
            self.slider,
            self.slider_value,
            if self.state { "on" } else { "off" },
            self.name,
            self.background
        )
    }
}

/// Owns the screen's controls, its view model and the context binding
/// them. Built behind an `Rc` so the view model can reach it weakly.
pub struct Controller {
    context: DataBindingContext,
    view_model: Rc<ViewModel>,
    widgets: Widgets,
    bindings: ScreenBindings,
}

impl Controller {
    /// Build the screen and wire its bindings. Every control shows the
    /// view model's state on return.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let owner: Weak<dyn DataBindingContextOwner> = this.clone();
            let view_model = Rc::new(ViewModel::new(owner));
            let widgets = Widgets::new();
            let context = DataBindingContext::with_label("settings");
            let bindings = bind_screen(&context, &view_model, &widgets);
            Self {
                context,
                view_model,
                widgets,
                bindings,
            }
        })
    }

    #[must_use]
    pub fn view_model(&self) -> &Rc<ViewModel> {
        &self.view_model
    }

    #[must_use]
    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }

    #[must_use]
    pub fn bindings(&self) -> ScreenBindings {
        self.bindings
    }

    #[must_use]
    pub fn snapshot(&self) -> ScreenState {
        ScreenState {
            slider: self.widgets.slider.value(),
            slider_value: self.widgets.slider_value.text(),
            state: self.widgets.state.is_on(),
            name: self.widgets.name.text(),
            background: self.widgets.view.background_color(),
        }
    }
}

impl DataBindingContextOwner for Controller {
    fn data_binding_context(&self) -> &DataBindingContext {
        &self.context
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("context", &self.context)
            .field("view_model", &self.view_model)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

fn bind_screen(ctx: &DataBindingContext, vm: &Rc<ViewModel>, w: &Widgets) -> ScreenBindings {
    let value = ctx.bind(
        PropertyFactory::value(&w.slider),
        GenericProperty::new(vm, ViewModel::value, ViewModel::set_value).with_label("value"),
    );
    let value_text = ctx.bind(
        PropertyFactory::text(&w.slider_value),
        GenericProperty::new(vm, ViewModel::value_as_string, ViewModel::set_value_as_string)
            .with_label("value_as_string"),
    );
    let state = ctx.bind(
        PropertyFactory::bool(&w.state),
        GenericProperty::new(vm, ViewModel::state, ViewModel::set_state).with_label("state"),
    );
    let name = ctx.bind(
        PropertyFactory::text(&w.name),
        GenericProperty::new(vm, ViewModel::name, ViewModel::set_name).with_label("name"),
    );
    let background = ctx.bind_value(
        PropertyFactory::background_color(&w.view),
        ReadOnlyProperty::new(vm, ViewModel::background_color).with_label("background_color"),
        UpdateValueStrategy::ModelToTarget,
    );
    tracing::info!(context = ctx.label(), bindings = ctx.len(), "screen bound");

    ScreenBindings {
        value,
        value_text,
        state,
        name,
        background,
    }
}
