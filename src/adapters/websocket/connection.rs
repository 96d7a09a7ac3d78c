//! WebSocket upgrade handler and connection lifecycle.
//!
//! Handles the HTTP → WebSocket upgrade and drives the connection:
//! 1. Resolve the session identity once, from the `token` query parameter
//! 2. Upgrade to WebSocket
//! 3. Process join/leave/message frames until disconnect
//! 4. Clean up every subscription the connection held
//!
//! Identity is fixed at upgrade time. A client that logs in or out
//! reconnects with a new token; frames on an existing connection never
//! change its session user.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::handlers::identity::ResolveIdentityHandler;
use crate::application::handlers::message::{SendMessageCommand, SendMessageHandler};
use crate::domain::foundation::{ConnectionId, DomainError, ErrorCode, RoomId, UserId};
use crate::domain::user::User;
use crate::ports::{ChannelRouter, RoomRepository};

use super::messages::{ClientFrame, ServerFrame};

/// Outbound queue depth per connection. A client that cannot drain this
/// many frames is dropped rather than backpressuring the fanout.
const OUTBOUND_QUEUE_DEPTH: usize = 64;

/// State required for WebSocket handling, extracted from the application
/// state.
#[derive(Clone)]
pub struct WebSocketState {
    pub identity: Arc<ResolveIdentityHandler>,
    pub send_message: Arc<SendMessageHandler>,
    pub rooms: Arc<dyn RoomRepository>,
    pub router: Arc<dyn ChannelRouter>,
}

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// Optional session token; absent or invalid means anonymous.
    pub token: Option<String>,
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws?token=...`
///
/// A bad token never rejects the upgrade; it downgrades the connection to
/// anonymous, mirroring the read paths.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<WebSocketState>,
) -> Response {
    let session_user = state.identity.resolve(query.token.as_deref()).await;
    ws.on_upgrade(move |socket| handle_socket(socket, session_user, state))
}

/// Drive an established WebSocket connection to completion.
async fn handle_socket(socket: WebSocket, session_user: Option<User>, state: WebSocketState) {
    let connection_id = ConnectionId::new();
    let (sink, mut stream) = socket.split();

    tracing::debug!(
        connection_id = %connection_id,
        authenticated = session_user.is_some(),
        "websocket connection established"
    );

    // All outbound frames funnel through one queue so room fanout and
    // per-connection errors share a single writer.
    let (out_tx, out_rx) = mpsc::channel::<ServerFrame>(OUTBOUND_QUEUE_DEPTH);
    let mut send_task = tokio::spawn(write_frames(sink, out_rx));

    // One forwarder task per joined room, keyed for leave/disconnect.
    let mut forwarders: HashMap<RoomId, JoinHandle<()>> = HashMap::new();

    while let Some(result) = stream.next().await {
        let frame = match result {
            Ok(WsMessage::Text(text)) => match serde_json::from_str::<ClientFrame>(&text) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, error = %e, "unparseable frame");
                    let _ = out_tx
                        .send(ServerFrame::error(
                            ErrorCode::InvalidFormat.to_string(),
                            "Malformed frame",
                        ))
                        .await;
                    continue;
                }
            },
            Ok(WsMessage::Close(_)) => break,
            // Protocol pings/pongs are answered by axum; binary is ignored.
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "receive error");
                break;
            }
        };

        match frame {
            ClientFrame::Join { room_id } => {
                handle_join(&state, connection_id, room_id, &out_tx, &mut forwarders).await;
            }
            ClientFrame::Leave { room_id } => {
                if let Some(task) = forwarders.remove(&room_id) {
                    task.abort();
                }
                state.router.leave(connection_id, room_id).await;
            }
            ClientFrame::Message {
                room_id,
                username,
                color,
                text,
                image_ref,
                author_id,
            } => {
                if let Err(err) = handle_message(
                    &state,
                    session_user.as_ref(),
                    room_id,
                    username,
                    color,
                    text,
                    image_ref,
                    author_id,
                )
                .await
                {
                    let _ = out_tx
                        .send(ServerFrame::error(err.code.to_string(), err.message))
                        .await;
                }
            }
        }

        if send_task.is_finished() {
            // Writer died (slow or gone client); no point reading on.
            break;
        }
    }

    for task in forwarders.into_values() {
        task.abort();
    }
    send_task.abort();
    state.router.disconnect(connection_id).await;
    tracing::debug!(connection_id = %connection_id, "websocket connection closed");
}

/// Subscribe the connection to a room and start forwarding its fanout.
///
/// Joining an unknown room yields an error frame; joining a room twice is
/// a no-op. There is no success acknowledgement; clients recover missed
/// history over the REST API after joining.
async fn handle_join(
    state: &WebSocketState,
    connection_id: ConnectionId,
    room_id: RoomId,
    out_tx: &mpsc::Sender<ServerFrame>,
    forwarders: &mut HashMap<RoomId, JoinHandle<()>>,
) {
    if forwarders.contains_key(&room_id) {
        return;
    }

    match state.rooms.find_by_id(room_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let _ = out_tx
                .send(ServerFrame::error(
                    ErrorCode::RoomNotFound.to_string(),
                    format!("Room not found: {}", room_id),
                ))
                .await;
            return;
        }
        Err(err) => {
            let _ = out_tx
                .send(ServerFrame::error(err.code.to_string(), err.message))
                .await;
            return;
        }
    }

    let mut rx = state.router.join(connection_id, room_id).await;
    let forward_tx = out_tx.clone();
    let task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(message) => {
                    if forward_tx.send(ServerFrame::message(&message)).await.is_err() {
                        break;
                    }
                }
                // Lagged receivers skip the overwritten messages and keep
                // going; clients refetch history to fill gaps.
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(room_id = %room_id, skipped, "fanout receiver lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
    forwarders.insert(room_id, task);
}

/// Attribute and append an inbound message, fanning it out on success.
#[allow(clippy::too_many_arguments)]
async fn handle_message(
    state: &WebSocketState,
    session_user: Option<&User>,
    room_id: RoomId,
    username: Option<String>,
    color: Option<String>,
    text: Option<String>,
    image_ref: Option<String>,
    author_id: Option<UserId>,
) -> Result<(), DomainError> {
    let actor = state
        .identity
        .resolve_message_author(session_user, author_id, username, color)
        .await;

    state
        .send_message
        .handle(SendMessageCommand {
            room_id,
            actor,
            text,
            image_ref,
        })
        .await?;
    Ok(())
}

/// Serialize and write outbound frames until the queue or socket closes.
async fn write_frames(
    mut sink: SplitSink<WebSocket, WsMessage>,
    mut out_rx: mpsc::Receiver<ServerFrame>,
) {
    while let Some(frame) = out_rx.recv().await {
        let json = match serde_json::to_string(&frame) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize server frame");
                continue;
            }
        };
        if sink.send(WsMessage::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Create the axum router for the WebSocket endpoint.
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::HmacTokenService;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::websocket::BroadcastChannelRouter;

    fn test_state() -> WebSocketState {
        let store = Arc::new(InMemoryStore::new());
        let router = Arc::new(BroadcastChannelRouter::with_default_capacity());
        let tokens = Arc::new(HmacTokenService::new("test-secret", 3600));
        WebSocketState {
            identity: Arc::new(ResolveIdentityHandler::new(store.clone(), tokens)),
            send_message: Arc::new(SendMessageHandler::new(
                store.clone(),
                store.clone(),
                router.clone(),
            )),
            rooms: store,
            router,
        }
    }

    #[test]
    fn websocket_router_creates_route() {
        let _router: axum::Router<()> = websocket_router().with_state(test_state());
    }

    #[tokio::test]
    async fn message_handling_rejects_unknown_room() {
        let state = test_state();
        let err = handle_message(
            &state,
            None,
            RoomId::from_i64(404),
            Some("drifter".into()),
            None,
            Some("hi".into()),
            None,
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::RoomNotFound);
    }
}
