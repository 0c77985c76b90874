#![forbid(unsafe_code)]

//! Presentation logic for the settings screen.
//!
//! The view model wraps a [`DataModel`] and adds two derived values: a
//! percentage text projection of `value` and a background color that
//! follows `state`. Every mutating setter asks its owner to refresh all
//! targets, so derived values stay consistent with whatever was edited.

use std::cell::RefCell;
use std::rc::Weak;

use tether_core::DataBindingContextOwner;
use tether_widgets::Color;

use crate::model::DataModel;

/// Format a fraction as a whole-number percentage.
#[must_use]
pub fn format_percent(value: f32) -> String {
    format!("{}", (value * 100.0).round() as i64)
}

/// Parse a percentage into a fraction. Unparseable input yields `0.0`.
#[must_use]
pub fn parse_percent(text: &str) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(percent) if percent.is_finite() => percent / 100.0,
        _ => {
            tracing::debug!(input = text, "percentage not a number; using 0");
            0.0
        }
    }
}

pub struct ViewModel {
    data: RefCell<DataModel>,
    owner: Option<Weak<dyn DataBindingContextOwner>>,
}

impl ViewModel {
    /// A view model that refreshes `owner`'s targets after each write.
    #[must_use]
    pub fn new(owner: Weak<dyn DataBindingContextOwner>) -> Self {
        Self {
            data: RefCell::new(DataModel::default()),
            owner: Some(owner),
        }
    }

    /// A view model with no owner to notify.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            data: RefCell::new(DataModel::default()),
            owner: None,
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut DataModel) -> R) -> R {
        let result = {
            let mut data = self.data.borrow_mut();
            f(&mut *data)
        };
        if let Some(owner) = self.owner.as_ref().and_then(Weak::upgrade) {
            owner.update_targets(None);
        }
        result
    }

    /// Copy of the underlying data.
    #[must_use]
    pub fn data(&self) -> DataModel {
        self.data.borrow().clone()
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.data.borrow().name.clone()
    }

    pub fn set_name(&self, name: String) {
        self.update(|data| data.name = name);
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.data.borrow().value
    }

    pub fn set_value(&self, value: f32) {
        self.update(|data| data.value = value);
    }

    #[must_use]
    pub fn state(&self) -> bool {
        self.data.borrow().state
    }

    pub fn set_state(&self, state: bool) {
        self.update(|data| data.state = state);
    }

    /// `value` as a rounded percentage, e.g. `0.5` reads as `"50"`.
    #[must_use]
    pub fn value_as_string(&self) -> String {
        format_percent(self.value())
    }

    pub fn set_value_as_string(&self, text: String) {
        self.set_value(parse_percent(&text));
    }

    /// Green while `state` is on, yellow otherwise.
    #[must_use]
    pub fn background_color(&self) -> Color {
        if self.state() {
            Color::GREEN
        } else {
            Color::YELLOW
        }
    }
}

impl std::fmt::Debug for ViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewModel")
            .field("data", &self.data.borrow())
            .field("has_owner", &self.owner.is_some())
            .finish()
    }
}
