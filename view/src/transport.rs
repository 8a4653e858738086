//! Socket link: the guarded send half and the I/O loop.
//!
//! [`Outbox`] is what UI helpers hold. It only accepts messages once the
//! handshake has gone out; before that, sends fail with
//! [`SendError::NotOpen`] and nothing is queued. [`drive`] owns the socket
//! halves, writes the `connected` handshake first, then runs a send loop and
//! a receive loop until either side ends.
//!
//! `drive` is generic over any `Sink`/`Stream` of text frames so the browser
//! binding can plug in `gloo-net` and tests can plug in in-memory channels.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use futures::{Sink, SinkExt, Stream, StreamExt};
use messages::{Outbound, encode_outbound};

/// Link lifecycle. `Closed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    Connecting,
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("socket is not open yet")]
    NotOpen,
    #[error("socket is closed")]
    Closed,
    #[error("message could not be encoded")]
    Encode,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to open socket: {0}")]
    Open(String),
    #[error("handshake failed: {0}")]
    Handshake(String),
}

/// Send handle shared by every outbound helper.
#[derive(Clone, Debug)]
pub struct Outbox {
    state: Rc<Cell<LinkState>>,
    tx: UnboundedSender<String>,
}

impl Outbox {
    /// New outbox in `Connecting` state plus the receiver [`drive`] drains.
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = unbounded();
        let outbox = Self { state: Rc::new(Cell::new(LinkState::Connecting)), tx };
        (outbox, rx)
    }

    pub fn state(&self) -> LinkState {
        self.state.get()
    }

    /// Queue one message for the socket.
    ///
    /// # Errors
    ///
    /// [`SendError::NotOpen`] before the handshake, [`SendError::Closed`]
    /// after the link or the outbound channel has shut down, and
    /// [`SendError::Encode`] if serialization fails.
    pub fn send(&self, message: &Outbound) -> Result<(), SendError> {
        match self.state.get() {
            LinkState::Connecting => Err(SendError::NotOpen),
            LinkState::Closed => Err(SendError::Closed),
            LinkState::Open => {
                let text = encode_outbound(message).map_err(|e| {
                    log::warn!("cannot encode {}: {e}", message_kind(message));
                    SendError::Encode
                })?;
                self.tx.unbounded_send(text).map_err(|_| SendError::Closed)
            }
        }
    }

    /// Close the link for good; the I/O loop exits once it sees the channel end.
    pub fn teardown(&self) {
        self.state.set(LinkState::Closed);
        self.tx.close_channel();
    }

    fn mark_open(&self) {
        if self.state.get() == LinkState::Connecting {
            self.state.set(LinkState::Open);
        }
    }

    fn mark_closed(&self) {
        self.state.set(LinkState::Closed);
    }
}

fn message_kind(message: &Outbound) -> &'static str {
    match message {
        Outbound::Connected => "connected",
        Outbound::Begin => "begin",
        Outbound::Consent => "consent",
        Outbound::Likert { .. } => "likert",
        Outbound::SlideChange { .. } => "slidechange",
    }
}

/// Run one connection to completion.
///
/// If the outbox was torn down before the socket opened, nothing is written
/// and the call returns at once. Otherwise writes the `connected` handshake,
/// opens the outbox, then forwards queued
/// messages to `writer` while feeding every text frame from `reader` to
/// `on_text`. Returns when the socket ends, the socket errors, or the outbox
/// is torn down. The outbox is `Closed` afterwards in every case.
///
/// # Errors
///
/// Returns [`TransportError::Handshake`] if the handshake cannot be written.
/// Failures after the handshake end the loop and are logged, not returned.
pub async fn drive<W, R, E, F>(
    mut writer: W,
    mut reader: R,
    outbox: Outbox,
    mut outgoing: UnboundedReceiver<String>,
    mut on_text: F,
) -> Result<(), TransportError>
where
    W: Sink<String> + Unpin,
    W::Error: fmt::Display,
    R: Stream<Item = Result<String, E>> + Unpin,
    E: fmt::Display,
    F: FnMut(&str),
{
    if outbox.state() == LinkState::Closed {
        log::info!("survey link stopped before it opened");
        return Ok(());
    }

    let handshake = match encode_outbound(&Outbound::Connected) {
        Ok(text) => text,
        Err(e) => {
            outbox.mark_closed();
            return Err(TransportError::Handshake(e.to_string()));
        }
    };
    if let Err(e) = writer.send(handshake).await {
        outbox.mark_closed();
        return Err(TransportError::Handshake(e.to_string()));
    }
    outbox.mark_open();
    log::info!("survey link open");

    let send_loop = async {
        while let Some(text) = outgoing.next().await {
            if let Err(e) = writer.send(text).await {
                log::warn!("socket send failed: {e}");
                break;
            }
        }
    };

    let recv_loop = async {
        while let Some(frame) = reader.next().await {
            match frame {
                Ok(text) => on_text(&text),
                Err(e) => {
                    log::warn!("socket receive failed: {e}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_loop), Box::pin(recv_loop)).await;
    outbox.mark_closed();
    log::info!("survey link closed");
    Ok(())
}
