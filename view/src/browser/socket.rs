//! `gloo-net` WebSocket plumbing for [`crate::transport::drive`].

use futures::channel::mpsc::UnboundedReceiver;
use futures::future::ready;
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::futures::WebSocket;
use gloo_net::websocket::{Message, WebSocketError};

use super::deck::RevealNavigator;
use super::dom::DomSurface;
use crate::error::ViewError;
use crate::session::SurveyView;
use crate::transport::{Outbox, TransportError, drive};

/// Open the socket and spawn its I/O loop on the browser event loop.
///
/// # Errors
///
/// Returns [`TransportError::Open`] if the browser refuses the URL.
pub(crate) fn connect(
    endpoint: &str,
    outbox: Outbox,
    outgoing: UnboundedReceiver<String>,
    mut view: SurveyView<DomSurface, RevealNavigator>,
) -> Result<(), ViewError> {
    let ws = WebSocket::open(endpoint).map_err(|e| TransportError::Open(e.to_string()))?;
    let (write, read) = ws.split();

    let writer = write.with(|text: String| ready(Ok::<Message, WebSocketError>(Message::Text(text))));
    let reader = read.filter_map(|frame| {
        ready(match frame {
            Ok(Message::Text(text)) => Some(Ok(text)),
            Ok(Message::Bytes(bytes)) => {
                log::debug!("ignoring {} byte binary frame", bytes.len());
                None
            }
            Err(e) => Some(Err(e)),
        })
    });

    let endpoint = endpoint.to_owned();
    wasm_bindgen_futures::spawn_local(async move {
        let result = drive(Box::pin(writer), Box::pin(reader), outbox, outgoing, |text: &str| {
            view.handle_text_logged(text);
        })
        .await;
        if let Err(e) = result {
            log::warn!("survey link to {endpoint} failed: {e}");
        }
    });
    Ok(())
}
