#![forbid(unsafe_code)]

//! Two-state controls: [`Switch`] and [`Button`].

use std::cell::Cell;

use tether_core::ChangeSignal;

/// An on/off switch.
#[derive(Debug)]
pub struct Switch {
    on: Cell<bool>,
    enabled: Cell<bool>,
    value_changed: ChangeSignal,
}

impl Switch {
    /// An enabled switch in state `on`.
    #[must_use]
    pub fn new(on: bool) -> Self {
        Self {
            on: Cell::new(on),
            enabled: Cell::new(true),
            value_changed: ChangeSignal::new("value_changed"),
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    /// Set the state without firing `value_changed`.
    pub fn set_on(&self, on: bool) {
        self.on.set(on);
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    #[must_use]
    pub fn value_changed(&self) -> &ChangeSignal {
        &self.value_changed
    }

    /// Simulate a tap. Disabled switches ignore it.
    pub fn user_toggle(&self) {
        self.user_set(!self.on.get());
    }

    /// Simulate the user moving the switch to `on`.
    ///
    /// Fires only when the state actually changes.
    pub fn user_set(&self, on: bool) {
        if !self.enabled.get() {
            tracing::debug!(control = "switch", "input on disabled switch ignored");
            return;
        }
        if self.on.replace(on) != on {
            self.value_changed.emit();
        }
    }
}

impl Default for Switch {
    fn default() -> Self {
        Self::new(false)
    }
}

/// A push button with an optional selected state.
#[derive(Debug)]
pub struct Button {
    title: String,
    enabled: Cell<bool>,
    selected: Cell<bool>,
    value_changed: ChangeSignal,
}

impl Button {
    /// An enabled, unselected button labelled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            enabled: Cell::new(true),
            selected: Cell::new(false),
            value_changed: ChangeSignal::new("value_changed"),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected.get()
    }

    /// Set the selected state without firing `value_changed`.
    pub fn set_selected(&self, selected: bool) {
        self.selected.set(selected);
    }

    /// Fired when the user changes the selected state.
    #[must_use]
    pub fn value_changed(&self) -> &ChangeSignal {
        &self.value_changed
    }

    /// Simulate the user changing the selected state. Disabled buttons
    /// ignore it.
    pub fn user_select(&self, selected: bool) {
        if !self.enabled.get() {
            tracing::debug!(
                control = "button",
                title = %self.title,
                "input on disabled button ignored"
            );
            return;
        }
        if self.selected.replace(selected) != selected {
            self.value_changed.emit();
        }
    }
}
