//! Wire model and JSON text codec for the survey view protocol.
//!
//! Every frame on the socket is one flat JSON object with a `type`
//! discriminator plus type-specific fields. Inbound frames (server to view)
//! decode into [`Inbound`]; outbound frames (view to server) encode from
//! [`Outbound`]. Tags the view does not know decode to [`Inbound::Unknown`]
//! instead of failing, so a newer server never breaks an older page.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned by [`decode_inbound`] and [`encode_outbound`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not JSON, has no `type`, or a known type is missing fields.
    #[error("failed to decode frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scalar payload rendered as element text.
///
/// The server is free to send strings, numbers, booleans or `null` for
/// display fields. Display output matches what a browser puts in
/// `textContent` for the same JSON value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    /// Renders as empty text.
    Null,
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => match number.as_f64() {
                Some(value) if number.is_f64() => f.write_str(&browser_number(value)),
                _ => write!(f, "{number}"),
            },
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<u32> for TextValue {
    fn from(number: u32) -> Self {
        Self::Number(number.into())
    }
}

/// `Number.prototype.toString()` for finite floats: integral values drop the
/// fraction, and exponents appear outside `[1e-6, 1e21)` with an explicit sign.
fn browser_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{value:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Slide numbers arrive as JSON numbers; integral floats such as `2.0` name
/// the same slide as `2`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn slide_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(index) = number.as_u64() {
        return u32::try_from(index).map_err(serde::de::Error::custom);
    }
    let value = number.as_f64().unwrap_or(f64::NAN);
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        return Ok(value as u32);
    }
    Err(serde::de::Error::custom(format!("invalid slide number {number}")))
}

/// A message pushed by the session server.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Inbound {
    /// Redraw the press indicator with the given radii.
    #[serde(rename = "press")]
    Press { circle: f64, ring: f64 },
    /// Participant identifier shown on the consent slide.
    #[serde(rename = "consentID")]
    ConsentId { id: TextValue },
    /// Material under test, scoped to the slide that displays it.
    #[serde(rename = "materialIndex")]
    MaterialIndex {
        #[serde(deserialize_with = "slide_index")]
        slide: u32,
        value: TextValue,
    },
    /// Gesture the participant is asked to perform.
    #[serde(rename = "gestureType")]
    GestureType { value: TextValue },
    /// Jump the deck to a slide.
    #[serde(rename = "goto")]
    Goto {
        #[serde(deserialize_with = "slide_index")]
        slide: u32,
    },
    /// Any tag this view does not handle.
    #[serde(other)]
    Unknown,
}

impl Inbound {
    /// Wire tag for logging; `Unknown` reports `"unknown"`.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Press { .. } => "press",
            Self::ConsentId { .. } => "consentID",
            Self::MaterialIndex { .. } => "materialIndex",
            Self::GestureType { .. } => "gestureType",
            Self::Goto { .. } => "goto",
            Self::Unknown => "unknown",
        }
    }
}

/// A message sent by the view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Outbound {
    /// Handshake sent once the socket opens.
    #[serde(rename = "connected")]
    Connected,
    #[serde(rename = "begin")]
    Begin,
    #[serde(rename = "consent")]
    Consent,
    /// One answered Likert group.
    #[serde(rename = "likert")]
    Likert { name: String, value: i64 },
    /// Horizontal index of the slide the deck just moved to.
    #[serde(rename = "slidechange")]
    SlideChange { value: u32 },
}

/// Decode one inbound text frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for text that is not a JSON object with a
/// string `type`, or for a known type whose payload fields are missing or
/// mistyped. Unknown types are not an error.
pub fn decode_inbound(text: &str) -> Result<Inbound, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode one outbound message as a JSON text frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_outbound(message: &Outbound) -> Result<String, CodecError> {
    Ok(serde_json::to_string(message)?)
}
