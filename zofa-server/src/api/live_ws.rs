//! Live WebSocket endpoint
//!
//! GET /api/live/ws
//!
//! - Server → Client: LiveMessage (orderUpdate, resync)
//! - Client → Server: LiveCommand (newOrder, relayed to every other client)

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use shared::live::{LiveCommand, LiveMessage};
use tokio::sync::broadcast;
use tokio::time::Duration;
use uuid::Uuid;

use crate::live::{LiveEvent, StockBroadcaster};
use crate::state::AppState;

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// GET /api/live/ws
pub async fn handle_live_ws(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| live_ws_session(socket, state.live))
}

async fn live_ws_session(socket: WebSocket, live: StockBroadcaster) {
    let session_id = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let mut hub_rx = live.subscribe();

    tracing::info!(session_id = %session_id, subscribers = live.subscriber_count(), "Live WS connected");

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = hub_rx.recv() => {
                match event {
                    Ok(event) => {
                        if let Some(msg) = convert_event(event, session_id)
                            && send_message(&mut sink, &msg).await.is_err()
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(session_id = %session_id, lagged = n, "Live subscriber lagged, asking client to resync");
                        hub_rx = live.subscribe();
                        if send_message(&mut sink, &LiveMessage::Resync).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<LiveCommand>(&text) {
                            Ok(LiveCommand::NewOrder(payload)) => {
                                let receivers = live.relay_order(session_id, payload);
                                tracing::debug!(session_id = %session_id, receivers, "Order relayed");
                            }
                            Err(e) => {
                                tracing::debug!(session_id = %session_id, error = %e, "Ignoring unknown live command");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    tracing::info!(session_id = %session_id, "Live WS disconnected");
}

/// Hub event → wire message for one session; a session's own relays are skipped.
fn convert_event(event: LiveEvent, session_id: Uuid) -> Option<LiveMessage> {
    match event {
        LiveEvent::StockChanged(change) => Some(LiveMessage::stock_changed(&change)),
        LiveEvent::OrderRelayed { origin, .. } if origin == session_id => None,
        LiveEvent::OrderRelayed { payload, .. } => Some(LiveMessage::OrderUpdate(payload)),
    }
}

async fn send_message<S>(sink: &mut S, msg: &LiveMessage) -> Result<(), ()>
where
    S: futures::Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}
