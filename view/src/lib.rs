//! Browser view layer for the material survey.
//!
//! The session server owns the survey: it decides which slide is showing,
//! which material is under test and how big the press circle is. This crate
//! only mirrors that state into the page and relays the participant's input
//! back over one WebSocket.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Endpoint, slide numbers, DOM ids and press style |
//! | [`router`] | Inbound message to render [`router::Effect`] |
//! | [`press`] | Press-circle paint operations |
//! | [`outbound`] | Helpers behind the page's buttons and radio groups |
//! | [`transport`] | Guarded [`transport::Outbox`] and the socket I/O loop |
//! | [`session`] | [`session::SurveyView`]: raw frame in, effect out |
//! | [`surface`] | Render-target traits implemented per platform |
//! | `browser` | `wasm-bindgen` exports over `web-sys` and `gloo-net` (feature `browser`) |

pub mod config;
pub mod error;
pub mod outbound;
pub mod press;
pub mod router;
pub mod session;
pub mod surface;
pub mod transport;

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(test)]
#[path = "fakes_test.rs"]
mod fakes;

pub use error::ViewError;
