//! Error modal behaviour.
//!
//! The modal consists of an overlay covering the page and a body with the
//! message and an "OK" button. Clicks on the overlay and on the button close
//! it; clicks anywhere else inside the body are swallowed.

/// Where a click inside the open modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    /// The dimmed backdrop around the modal
    Overlay,
    /// The modal body, including its title and message
    Body,
    /// The explicit "OK" control
    DismissButton,
}

impl ModalClick {
    /// Whether this click closes the modal.
    pub fn dismisses(self) -> bool {
        match self {
            Self::Overlay | Self::DismissButton => true,
            // The body stops propagation before the overlay sees the click.
            Self::Body => false,
        }
    }

    /// Parses the `data-dismiss` marker used in the rendered markup.
    pub fn from_marker(marker: &str) -> Self {
        match marker {
            "overlay" => Self::Overlay,
            "button" => Self::DismissButton,
            _ => Self::Body,
        }
    }
}
