#![forbid(unsafe_code)]

//! Plain business data behind the settings screen.

/// Business state edited by the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    pub name: String,
    /// Fraction in `[0, 1]`.
    pub value: f32,
    pub state: bool,
}

impl Default for DataModel {
    fn default() -> Self {
        Self {
            name: "my Name".to_string(),
            value: 0.5,
            state: true,
        }
    }
}
