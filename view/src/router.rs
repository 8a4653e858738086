//! Inbound dispatch: one decoded message, at most one render effect.
//!
//! Routing is a pure function of the message tag plus the configured slide
//! numbers. No state is carried between frames; whatever arrives last wins.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use messages::Inbound;

use crate::config::SlideNumbers;
use crate::error::ViewError;
use crate::surface::{Navigator, TextSlot, ViewSurface};

/// What a routed message did to the view.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    PressDrawn { circle: f64, ring: f64 },
    TextSet { slot: TextSlot, text: String },
    SlideChanged { index: u32 },
    /// `materialIndex` for a slide that displays no material.
    Dropped { slide: u32 },
    /// Tag not handled by this view.
    Ignored,
}

/// Which material slot, if any, a `materialIndex` for `slide` belongs to.
pub fn material_slot(slides: SlideNumbers, slide: u32) -> Option<TextSlot> {
    if slide == slides.likert {
        Some(TextSlot::MaterialIndex)
    } else if slide == slides.press {
        Some(TextSlot::MaterialIndexPress)
    } else {
        None
    }
}

/// Apply one inbound message to the view.
///
/// # Errors
///
/// Propagates surface or navigator failures (missing element, canvas or deck).
pub fn route(
    message: &Inbound,
    slides: SlideNumbers,
    surface: &mut impl ViewSurface,
    navigator: &mut impl Navigator,
) -> Result<Effect, ViewError> {
    match message {
        Inbound::Press { circle, ring } => {
            surface.draw_press(*circle, *ring)?;
            Ok(Effect::PressDrawn { circle: *circle, ring: *ring })
        }
        Inbound::ConsentId { id } => set_text(surface, TextSlot::ConsentId, id.to_string()),
        Inbound::MaterialIndex { slide, value } => match material_slot(slides, *slide) {
            Some(slot) => set_text(surface, slot, value.to_string()),
            None => Ok(Effect::Dropped { slide: *slide }),
        },
        Inbound::GestureType { value } => set_text(surface, TextSlot::GestureType, value.to_string()),
        Inbound::Goto { slide } => {
            navigator.goto_slide(*slide)?;
            Ok(Effect::SlideChanged { index: *slide })
        }
        Inbound::Unknown => Ok(Effect::Ignored),
    }
}

fn set_text(surface: &mut impl ViewSurface, slot: TextSlot, text: String) -> Result<Effect, ViewError> {
    surface.set_text(slot, &text)?;
    Ok(Effect::TextSet { slot, text })
}
