//! Crate-level error type.

use crate::config::ConfigError;
use crate::transport::{SendError, TransportError};

/// Anything that can go wrong between a socket frame and a DOM mutation.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Decode(#[from] messages::CodecError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Send(#[from] SendError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// No element with this id exists in the hosting page.
    #[error("missing DOM element '{0}'")]
    MissingElement(String),
    /// The element exists but has the wrong type or no 2D context.
    #[error("element '{0}' is not a usable canvas")]
    NoCanvas(String),
    /// A browser API call threw.
    #[error("browser call failed: {0}")]
    Js(String),
    /// A non-browser render target (terminal, file) failed to write.
    #[error("render target failed: {0}")]
    Render(String),
    #[error("survey view is already started")]
    AlreadyStarted,
    #[error("survey view is not started")]
    NotStarted,
}
