//! JavaScript entry points.
//!
//! The hosting page loads the WASM module, calls `startView()` (or
//! `startViewWithConfig(json)`) once, and wires its controls to the exported
//! helpers:
//!
//! ```html
//! <button onclick="survey.sendBegin()">Begin</button>
//! <button onclick="survey.submitRadios(['pleasant', 'rough', 'warm'])">Next</button>
//! ```
//!
//! All state lives in one thread-local `App`; the page has at most one link.

mod deck;
mod dom;
mod socket;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Document;

use self::deck::RevealNavigator;
use self::dom::{DomRadios, DomSurface};
use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::outbound;
use crate::session::SurveyView;
use crate::transport::Outbox;

struct App {
    config: ViewConfig,
    outbox: Outbox,
    document: Document,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

impl From<ViewError> for JsValue {
    fn from(err: ViewError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("console logger already installed");
    }
}

fn with_app<T>(f: impl FnOnce(&App) -> Result<T, ViewError>) -> Result<T, ViewError> {
    APP.with(|app| match app.borrow().as_ref() {
        Some(app) => f(app),
        None => Err(ViewError::NotStarted),
    })
}

fn start_view(config: ViewConfig) -> Result<(), ViewError> {
    init_logging();
    if APP.with(|app| app.borrow().is_some()) {
        return Err(ViewError::AlreadyStarted);
    }

    let document = dom::document()?;
    let (outbox, outgoing) = Outbox::channel();
    let mut view = SurveyView::new(&config, DomSurface::new(document.clone(), &config), RevealNavigator);
    view.prepare();
    socket::connect(&config.endpoint, outbox.clone(), outgoing, view)?;
    log::info!("survey view connecting to {}", config.endpoint);

    APP.with(|app| *app.borrow_mut() = Some(App { config, outbox, document }));
    Ok(())
}

/// Connect with the stock configuration.
///
/// # Errors
///
/// Throws if the view is already started or the socket cannot be created.
#[wasm_bindgen(js_name = startView)]
pub fn start() -> Result<(), JsValue> {
    start_view(ViewConfig::default()).map_err(JsValue::from)
}

/// Connect with a (partial) JSON configuration.
///
/// # Errors
///
/// Throws on invalid configuration, or as [`start`].
#[wasm_bindgen(js_name = startViewWithConfig)]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    let config = ViewConfig::from_json(json).map_err(ViewError::from)?;
    start_view(config).map_err(JsValue::from)
}

/// Tear the link down. A later `startView()` opens a fresh one.
#[wasm_bindgen(js_name = stopView)]
pub fn stop() {
    if let Some(app) = APP.with(|app| app.borrow_mut().take()) {
        app.outbox.teardown();
        log::info!("survey view stopped");
    }
}

/// # Errors
///
/// Throws if the view is not started or the link is not open.
#[wasm_bindgen(js_name = sendBegin)]
pub fn send_begin() -> Result<(), JsValue> {
    with_app(|app| Ok(outbound::send_begin(&app.outbox)?)).map_err(JsValue::from)
}

/// # Errors
///
/// Throws if the view is not started or the link is not open.
#[wasm_bindgen(js_name = sendConsent)]
pub fn send_consent() -> Result<(), JsValue> {
    with_app(|app| Ok(outbound::send_consent(&app.outbox)?)).map_err(JsValue::from)
}

/// Submit several Likert groups; returns the number of frames sent.
///
/// # Errors
///
/// Throws if the view is not started or the link is not open.
#[wasm_bindgen(js_name = submitRadios)]
pub fn submit_radios(names: Vec<String>) -> Result<usize, JsValue> {
    with_app(|app| {
        let radios = DomRadios::new(app.document.clone());
        Ok(outbound::submit_radios(&app.outbox, &names, &radios)?)
    })
    .map_err(JsValue::from)
}

/// Submit a single Likert group.
///
/// # Errors
///
/// As [`submit_radios`].
#[wasm_bindgen(js_name = submitLikert)]
pub fn submit_likert(name: String) -> Result<usize, JsValue> {
    submit_radios(vec![name])
}

/// Hook for the deck's `slidechanged` event; returns whether a frame was sent.
///
/// # Errors
///
/// Throws if the view is not started or the link is not open.
#[wasm_bindgen(js_name = slideChanged)]
pub fn slide_changed(indexh: u32) -> Result<bool, JsValue> {
    with_app(|app| Ok(outbound::report_slide_change(&app.outbox, &app.config, indexh)?)).map_err(JsValue::from)
}
