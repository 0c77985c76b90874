#![forbid(unsafe_code)]

//! A plain container view.

use std::cell::Cell;

use crate::color::Color;

/// A rectangular view with a background color.
#[derive(Debug, Default)]
pub struct View {
    background_color: Cell<Color>,
}

impl View {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn background_color(&self) -> Color {
        self.background_color.get()
    }

    pub fn set_background_color(&self, color: Color) {
        self.background_color.set(color);
    }
}
