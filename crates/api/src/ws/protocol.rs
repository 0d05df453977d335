//! Wire protocol for the live-delivery WebSocket.
//!
//! All frames are JSON objects with a `type` discriminant. The client sends
//! exactly one message kind (the authentication handshake); the server sends
//! handshake replies and pushed notifications.

use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};
use tunetrace_db::models::Notification;

/// Messages the client may send over the WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// The authentication handshake: the first (and only meaningful)
    /// client-to-server message.
    #[serde(rename = "AUTHENTICATE")]
    Authenticate {
        /// A JWT access token, identical to the REST bearer token.
        token: String,
    },
}

/// Messages the server pushes over the WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Handshake success reply.
    #[serde(rename = "AUTHENTICATED")]
    Authenticated { message: String },

    /// Protocol or handshake error. The connection is closed after this.
    #[serde(rename = "ERROR")]
    Error { message: String },

    /// A freshly created notification, pushed to its owner in real time.
    #[serde(rename = "NEW_NOTIFICATION")]
    NewNotification { notification: Notification },
}

impl ServerMessage {
    /// Serialize into a WebSocket text frame.
    pub fn to_message(&self) -> Message {
        match serde_json::to_string(self) {
            Ok(json) => Message::Text(json.into()),
            Err(e) => {
                // Serialization of these enums cannot realistically fail, but
                // never panic on the hot delivery path.
                tracing::error!(error = %e, "Failed to serialize server message");
                Message::Text(r#"{"type":"ERROR","message":"Internal error"}"#.into())
            }
        }
    }
}
