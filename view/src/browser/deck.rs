//! Reveal.js deck binding.

use wasm_bindgen::prelude::*;

use super::dom::js_error;
use crate::error::ViewError;
use crate::surface::Navigator;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Reveal, js_name = slide, catch)]
    fn reveal_slide(indexh: u32) -> Result<(), JsValue>;
}

/// Navigates the page-global `Reveal` deck.
pub struct RevealNavigator;

impl Navigator for RevealNavigator {
    fn goto_slide(&mut self, index: u32) -> Result<(), ViewError> {
        reveal_slide(index).map_err(js_error)
    }
}
