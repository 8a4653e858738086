//! View configuration: endpoint, slide constants, DOM ids and press style.
//!
//! Every field has a default matching the stock survey page, and the whole
//! struct deserializes with `#[serde(default)]` so a host page only supplies
//! what it changes:
//!
//! ```json
//! { "endpoint": "ws://10.0.0.5:8080", "slides": { "press": 4 } }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080";
pub const DEFAULT_LIKERT_SLIDE: u32 = 2;
pub const DEFAULT_PRESS_SLIDE: u32 = 3;
pub const DEFAULT_CANVAS_SIZE: f64 = 400.0;
pub const DEFAULT_PRESS_FILL: &str = "#D989BC";
pub const DEFAULT_RING_WIDTH: f64 = 5.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Slide numbers that scope `materialIndex` updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SlideNumbers {
    pub likert: u32,
    pub press: u32,
}

impl Default for SlideNumbers {
    fn default() -> Self {
        Self { likert: DEFAULT_LIKERT_SLIDE, press: DEFAULT_PRESS_SLIDE }
    }
}

/// Ids of the DOM targets the router writes to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub consent_id: String,
    pub material_index: String,
    pub material_index_press: String,
    pub gesture_type: String,
    pub press_canvas: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            consent_id: "consent-id".to_owned(),
            material_index: "materialIndex".to_owned(),
            material_index_press: "materialIndexPress".to_owned(),
            gesture_type: "gestureType".to_owned(),
            press_canvas: "pressCanvas".to_owned(),
        }
    }
}

/// Geometry and colours of the press indicator.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PressStyle {
    /// Side length of the square canvas in pixels.
    pub size: f64,
    /// Fill colour of the inner circle (any CSS colour).
    pub fill: String,
    /// Stroke width of the target ring in pixels.
    pub ring_width: f64,
}

impl Default for PressStyle {
    fn default() -> Self {
        Self { size: DEFAULT_CANVAS_SIZE, fill: DEFAULT_PRESS_FILL.to_owned(), ring_width: DEFAULT_RING_WIDTH }
    }
}

impl PressStyle {
    /// Canvas midpoint; circle and ring are both centred here.
    pub fn center(&self) -> (f64, f64) {
        (self.size / 2.0, self.size / 2.0)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// WebSocket URL of the session server.
    pub endpoint: String,
    pub slides: SlideNumbers,
    pub elements: ElementIds,
    pub press: PressStyle,
    /// Send `slidechange` frames when the deck moves.
    pub report_slide_changes: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            slides: SlideNumbers::default(),
            elements: ElementIds::default(),
            press: PressStyle::default(),
            report_slide_changes: false,
        }
    }
}

impl ViewConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON and
    /// [`ConfigError::Invalid`] when [`ViewConfig::validate`] fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("ws://") || self.endpoint.starts_with("wss://")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint must be a ws:// or wss:// URL, got '{}'",
                self.endpoint
            )));
        }
        if self.slides.likert == self.slides.press {
            return Err(ConfigError::Invalid(format!(
                "likert and press slides must differ (both {})",
                self.slides.likert
            )));
        }
        if !(self.press.size.is_finite() && self.press.size > 0.0) {
            return Err(ConfigError::Invalid(format!("press.size must be positive, got {}", self.press.size)));
        }
        if !(self.press.ring_width.is_finite() && self.press.ring_width >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "press.ring_width must not be negative, got {}",
                self.press.ring_width
            )));
        }
        Ok(())
    }
}
