//! Render targets the router writes to.
//!
//! The router never touches the DOM directly. The browser binding implements
//! these traits over `web-sys`; the CLI implements them over a terminal; tests
//! implement them over plain vectors.

use crate::error::ViewError;

/// Text elements that mirror server state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextSlot {
    ConsentId,
    /// Material index shown on the Likert slide.
    MaterialIndex,
    /// Material index shown on the press slide.
    MaterialIndexPress,
    GestureType,
}

impl TextSlot {
    pub fn label(self) -> &'static str {
        match self {
            Self::ConsentId => "consent-id",
            Self::MaterialIndex => "material-index",
            Self::MaterialIndexPress => "material-index-press",
            Self::GestureType => "gesture-type",
        }
    }
}

pub trait ViewSurface {
    /// Ready the targets before the first frame arrives (the press canvas
    /// takes its configured size here).
    ///
    /// # Errors
    ///
    /// Implementations fail when a target cannot be set up yet; routing still
    /// works and retries on demand.
    fn prepare(&mut self) -> Result<(), ViewError> {
        Ok(())
    }

    /// Replace the text content of one slot.
    ///
    /// # Errors
    ///
    /// Implementations fail when the target element is missing.
    fn set_text(&mut self, slot: TextSlot, text: &str) -> Result<(), ViewError>;

    /// Redraw the press indicator from scratch.
    ///
    /// # Errors
    ///
    /// Implementations fail when the canvas is unavailable.
    fn draw_press(&mut self, circle: f64, ring: f64) -> Result<(), ViewError>;
}

/// Slide-deck navigation capability.
pub trait Navigator {
    /// # Errors
    ///
    /// Implementations fail when the deck rejects the jump.
    fn goto_slide(&mut self, index: u32) -> Result<(), ViewError>;
}
