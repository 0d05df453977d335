//! WebSocket upgrade handler and per-connection message loop.
//!
//! A connection is accepted unauthenticated and must complete an
//! `AUTHENTICATE` handshake before anything is delivered to it. Any other
//! pre-auth frame, or a handshake with a bad token, gets an `ERROR` reply
//! and the socket is closed.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tunetrace_core::types::DbId;
use uuid::Uuid;

use crate::auth::jwt;
use crate::state::AppState;
use crate::ws::protocol::{ClientMessage, ServerMessage};

/// Per-connection handshake state.
enum ConnState {
    Unauthenticated,
    Authenticated(DbId),
}

/// `GET /ws` -- upgrade to a WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = Uuid::new_v4().to_string();
    let (mut sink, mut stream) = socket.split();

    let mut rx = state.ws_manager.add(&conn_id).await;

    // Dedicated sender task: everything written to this connection flows
    // through the manager's channel so pushes and replies are serialized.
    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
        // Channel closed (manager shutdown or connection removal).
        let _ = sink.close().await;
    });

    let mut conn_state = ConnState::Unauthenticated;

    while let Some(result) = stream.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        };

        match message {
            Message::Text(text) => match conn_state {
                ConnState::Unauthenticated => {
                    match authenticate(&state, &conn_id, &text).await {
                        Ok(user_id) => {
                            tracing::info!(conn_id = %conn_id, user_id = %user_id, "WebSocket authenticated");
                            conn_state = ConnState::Authenticated(user_id);
                        }
                        Err(reason) => {
                            tracing::debug!(conn_id = %conn_id, reason = %reason, "WebSocket handshake rejected");
                            let frame = ServerMessage::Error {
                                message: reason.to_string(),
                            };
                            state
                                .ws_manager
                                .send_to_conn(&conn_id, frame.to_message())
                                .await;
                            break;
                        }
                    }
                }
                ConnState::Authenticated(ref user_id) => {
                    // The protocol has no post-handshake client messages.
                    tracing::debug!(conn_id = %conn_id, user_id = %user_id, "Ignoring client frame after handshake");
                }
            },
            Message::Close(_) => break,
            // Pings are answered automatically by axum; pongs need no action.
            Message::Ping(_) | Message::Pong(_) | Message::Binary(_) => {}
        }
    }

    // Removing the connection drops its sender, so the sender task drains
    // any queued frames (handshake errors included) and closes the sink.
    state.ws_manager.remove(&conn_id).await;
    if tokio::time::timeout(std::time::Duration::from_secs(5), send_task)
        .await
        .is_err()
    {
        tracing::warn!(conn_id = %conn_id, "Sender task did not drain in time");
    }
    tracing::debug!(conn_id = %conn_id, "WebSocket connection closed");
}

/// Run the handshake for a pre-auth text frame.
///
/// On success the connection is bound in the manager and the
/// `AUTHENTICATED` reply has been queued; the caller only tracks state.
async fn authenticate(
    state: &AppState,
    conn_id: &str,
    text: &str,
) -> Result<DbId, &'static str> {
    let parsed: ClientMessage =
        serde_json::from_str(text).map_err(|_| "Authentication required")?;
    let ClientMessage::Authenticate { token } = parsed;

    let claims =
        jwt::validate_token(&token, &state.config.jwt).map_err(|_| "Authentication failed")?;
    let user_id = claims.sub;

    state.ws_manager.bind_user(conn_id, &user_id).await;

    let reply = ServerMessage::Authenticated {
        message: "WebSocket connection established".to_string(),
    };
    state
        .ws_manager
        .send_to_conn(conn_id, reply.to_message())
        .await;

    Ok(user_id)
}
