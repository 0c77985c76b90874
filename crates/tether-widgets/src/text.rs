#![forbid(unsafe_code)]

//! Text-bearing controls: [`Label`], [`TextField`] and [`TextView`].
//!
//! All three expose their content through [`TextControl`], which is what
//! [`PropertyFactory::text`](crate::PropertyFactory::text) binds against.
//! Labels are display-only and carry no change signal; fields and views
//! fire theirs on every user edit.

use std::cell::RefCell;

use tether_core::ChangeSignal;

/// A control whose content is a single string.
pub trait TextControl {
    /// Control kind, used in property labels.
    const KIND: &'static str;

    /// Current content.
    fn text(&self) -> String;

    /// Replace the content without firing any signal.
    fn set_text(&self, text: String);

    /// Signal fired when the user edits the content.
    fn text_signal(&self) -> Option<&ChangeSignal> {
        None
    }
}

/// Static display text.
#[derive(Debug, Default)]
pub struct Label {
    text: RefCell<String>,
}

impl Label {
    /// A label showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(text.into()),
        }
    }
}

impl TextControl for Label {
    const KIND: &'static str = "label";

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: String) {
        *self.text.borrow_mut() = text;
    }
}

/// Single-line editable text.
#[derive(Debug)]
pub struct TextField {
    text: RefCell<String>,
    editing_changed: ChangeSignal,
}

impl TextField {
    /// An empty field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: RefCell::new(String::new()),
            editing_changed: ChangeSignal::new("editing_changed"),
        }
    }

    /// Signal fired on user edits.
    #[must_use]
    pub fn editing_changed(&self) -> &ChangeSignal {
        &self.editing_changed
    }

    /// Simulate the user replacing the whole content.
    pub fn user_input(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
        tracing::trace!(control = Self::KIND, "user edit");
        self.editing_changed.emit();
    }

    /// Simulate the user typing at the end of the content.
    pub fn user_type(&self, typed: &str) {
        self.text.borrow_mut().push_str(typed);
        tracing::trace!(control = Self::KIND, typed, "user typed");
        self.editing_changed.emit();
    }

    /// Simulate the user deleting the last character.
    pub fn user_backspace(&self) {
        let removed = self.text.borrow_mut().pop();
        if removed.is_some() {
            self.editing_changed.emit();
        }
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl TextControl for TextField {
    const KIND: &'static str = "text_field";

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: String) {
        *self.text.borrow_mut() = text;
    }

    fn text_signal(&self) -> Option<&ChangeSignal> {
        Some(&self.editing_changed)
    }
}

/// Multi-line editable text.
#[derive(Debug)]
pub struct TextView {
    text: RefCell<String>,
    text_changed: ChangeSignal,
}

impl TextView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: RefCell::new(String::new()),
            text_changed: ChangeSignal::new("text_changed"),
        }
    }

    #[must_use]
    pub fn text_changed(&self) -> &ChangeSignal {
        &self.text_changed
    }

    /// Simulate the user replacing the content.
    pub fn user_input(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
        tracing::trace!(control = Self::KIND, "user edit");
        self.text_changed.emit();
    }
}

impl Default for TextView {
    fn default() -> Self {
        Self::new()
    }
}

impl TextControl for TextView {
    const KIND: &'static str = "text_view";

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: String) {
        *self.text.borrow_mut() = text;
    }

    fn text_signal(&self) -> Option<&ChangeSignal> {
        Some(&self.text_changed)
    }
}
