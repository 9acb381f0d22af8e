//! Display state for the preview panel.

/// What the preview panel is currently showing.
///
/// Exactly one visual element is active at a time; transitions always
/// clear the alternate element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    /// Nothing shown yet.
    #[default]
    Empty,
    /// An image is shown (raw data held by the panel).
    Image,
    /// A centered text overlay is shown.
    Text(String),
}

impl DisplayState {
    /// Returns the overlay text, if a text state is active.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            DisplayState::Text(message) => Some(message),
            DisplayState::Empty | DisplayState::Image => None,
        }
    }
}
