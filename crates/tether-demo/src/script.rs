#![forbid(unsafe_code)]

//! Simulated user input for driving the settings screen.
//!
//! Actions have a compact textual form so a session can be given on the
//! command line:
//!
//! | Form          | Action                                   |
//! |---------------|------------------------------------------|
//! | `slide=0.3`   | drag the slider                          |
//! | `percent=73`  | type into the percentage field           |
//! | `toggle`      | flip the switch                          |
//! | `name=Ada`    | type into the name field                 |
//! | `refresh`     | force a model→target sweep               |

use std::fmt;
use std::str::FromStr;

use tether_core::DataBindingContextOwner;

use crate::controller::Controller;

/// One simulated user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Slide(f32),
    TypePercent(String),
    ToggleState,
    Rename(String),
    Refresh,
}

/// Failure to parse a [`UserAction`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("unknown action `{0}` (expected slide=, percent=, toggle, name= or refresh)")]
    Unknown(String),
    #[error("invalid slider position `{0}`")]
    BadPosition(String),
}

impl UserAction {
    /// The session the demo binary runs when given no arguments.
    #[must_use]
    pub fn default_script() -> Vec<Self> {
        vec![
            Self::Slide(0.25),
            Self::TypePercent("73".into()),
            Self::TypePercent("abc".into()),
            Self::ToggleState,
            Self::Rename("Ada".into()),
            Self::ToggleState,
        ]
    }

    /// Perform the interaction on `controller`'s controls.
    pub fn apply(&self, controller: &Controller) {
        let widgets = controller.widgets();
        match self {
            Self::Slide(position) => widgets.slider.user_slide(*position),
            Self::TypePercent(text) => widgets.slider_value.user_input(text.clone()),
            Self::ToggleState => widgets.state.user_toggle(),
            Self::Rename(name) => widgets.name.user_input(name.clone()),
            Self::Refresh => {
                controller.update_targets(None);
            }
        }
        tracing::debug!(action = %self, "action applied");
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slide(position) => write!(f, "slide={position}"),
            Self::TypePercent(text) => write!(f, "percent={text}"),
            Self::ToggleState => f.write_str("toggle"),
            Self::Rename(name) => write!(f, "name={name}"),
            Self::Refresh => f.write_str("refresh"),
        }
    }
}

impl FromStr for UserAction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some(("slide", position)) => position
                .trim()
                .parse()
                .map(Self::Slide)
                .map_err(|_| ActionParseError::BadPosition(position.to_string())),
            Some(("percent", text)) => Ok(Self::TypePercent(text.to_string())),
            Some(("name", name)) => Ok(Self::Rename(name.to_string())),
            None if s == "toggle" => Ok(Self::ToggleState),
            None if s == "refresh" => Ok(Self::Refresh),
            _ => Err(ActionParseError::Unknown(s.to_string())),
        }
    }
}
