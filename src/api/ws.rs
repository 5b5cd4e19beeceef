//! Live anomaly feed relay.
//!
//! Each browser connection gets its own upstream socket to the detector's
//! `/ws/anomalies` endpoint. Text frames are forwarded verbatim in arrival
//! order. The upstream socket lives exactly as long as the browser
//! connection: either side closing tears the other down. There is no
//! reconnection and no buffering while disconnected.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;
use tracing::{debug, warn};

use super::state::AppState;

pub async fn anomaly_feed(State(state): State<AppState>, upgrade: WebSocketUpgrade) -> Response {
    upgrade.on_upgrade(move |socket| relay(socket, state))
}

async fn relay(mut browser: WebSocket, state: AppState) {
    let mut upstream = match state.clients.anomalies.subscribe().await {
        Ok(socket) => socket,
        Err(e) => {
            warn!(error = %e, "anomaly feed unavailable, closing browser socket");
            let _ = browser.send(Message::Close(None)).await;
            return;
        }
    };
    debug!("anomaly feed relay established");

    loop {
        tokio::select! {
            frame = upstream.next() => match frame {
                Some(Ok(UpstreamMessage::Text(text))) => {
                    if browser.send(Message::Text(text.as_str().into())).await.is_err() {
                        break;
                    }
                }
                Some(Ok(UpstreamMessage::Ping(payload))) => {
                    if upstream.send(UpstreamMessage::Pong(payload)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(UpstreamMessage::Close(frame))) => {
                    debug!(?frame, "anomaly feed closed by detector");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "anomaly feed stream error");
                    break;
                }
                None => break,
            },
            inbound = browser.recv() => match inbound {
                // Browser frames (keepalives) are drained and ignored.
                Some(Ok(Message::Close(_))) | None => {
                    debug!("browser left anomaly feed");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
        }
    }

    // Dropping `upstream` releases the detector connection.
    let _ = browser.send(Message::Close(None)).await;
}
