//! One view bound to its render targets: text frame in, effect out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use messages::decode_inbound;

use crate::config::{SlideNumbers, ViewConfig};
use crate::error::ViewError;
use crate::router::{Effect, route};
use crate::surface::{Navigator, ViewSurface};

pub struct SurveyView<S, N> {
    slides: SlideNumbers,
    surface: S,
    navigator: N,
}

impl<S: ViewSurface, N: Navigator> SurveyView<S, N> {
    pub fn new(config: &ViewConfig, surface: S, navigator: N) -> Self {
        Self { slides: config.slides, surface, navigator }
    }

    /// Set up the render targets ahead of traffic. Failures are logged; the
    /// surface retries when a frame needs the target.
    pub fn prepare(&mut self) {
        if let Err(e) = self.surface.prepare() {
            log::warn!("render target not ready: {e}");
        }
    }

    /// Decode and route one raw text frame.
    ///
    /// # Errors
    ///
    /// [`ViewError::Decode`] for malformed frames, or whatever the render
    /// target reports.
    pub fn handle_text(&mut self, text: &str) -> Result<Effect, ViewError> {
        log::debug!("{text}");
        let message = decode_inbound(text)?;
        let effect = route(&message, self.slides, &mut self.surface, &mut self.navigator)?;
        if effect == Effect::Ignored {
            log::debug!("ignored frame: {text}");
        }
        Ok(effect)
    }

    /// [`SurveyView::handle_text`] for the socket loop: failures are logged
    /// and the frame is dropped.
    pub fn handle_text_logged(&mut self, text: &str) {
        if let Err(e) = self.handle_text(text) {
            log::warn!("dropped frame: {e}");
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
