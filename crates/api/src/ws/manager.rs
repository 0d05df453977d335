//! Registry of live WebSocket connections and their user bindings.

use std::collections::HashMap;

use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use tunetrace_core::types::{DbId, Timestamp};

/// A single live connection's delivery handle.
struct WsConnection {
    /// The user this connection authenticated as, if the handshake completed.
    user_id: Option<DbId>,
    /// Channel into the connection's dedicated sender task.
    sender: mpsc::UnboundedSender<Message>,
    /// When the socket was accepted.
    connected_at: Timestamp,
}

#[derive(Default)]
struct Inner {
    /// All open connections, authenticated or not, keyed by connection id.
    connections: HashMap<String, WsConnection>,
    /// Delivery routing: user id to the connection currently bound to it.
    /// At most one connection per user; a later bind replaces an earlier one.
    user_bindings: HashMap<DbId, String>,
}

/// Manages all live WebSocket connections and routes pushed notifications to
/// the right socket.
///
/// Connections are registered on accept (unauthenticated), bound to a user
/// once the handshake succeeds, and removed on disconnect. Each user has at
/// most one bound connection; binding again from a new socket silently takes
/// over delivery without closing the older socket.
#[derive(Default)]
pub struct WsManager {
    inner: RwLock<Inner>,
}

impl WsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly accepted connection. Returns the receiving half of
    /// its delivery channel, to be drained by the connection's sender task.
    pub async fn add(&self, conn_id: &str) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id: None,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner.connections.insert(conn_id.to_string(), conn);
        tracing::debug!(conn_id = %conn_id, total = inner.connections.len(), "WebSocket connection registered");
        rx
    }

    /// Bind a connection to a user after a successful handshake.
    ///
    /// If the user already had a bound connection, the binding moves to this
    /// one (last writer wins). The previous socket stays open but no longer
    /// receives pushed notifications.
    pub async fn bind_user(&self, conn_id: &str, user_id: &DbId) {
        let mut inner = self.inner.write().await;

        let Some(conn) = inner.connections.get_mut(conn_id) else {
            // The socket closed between handshake validation and binding.
            tracing::warn!(conn_id = %conn_id, "Cannot bind user: connection already gone");
            return;
        };
        conn.user_id = Some(user_id.clone());

        if let Some(previous) = inner
            .user_bindings
            .insert(user_id.clone(), conn_id.to_string())
        {
            if previous != conn_id {
                tracing::debug!(user_id = %user_id, previous_conn = %previous, "User rebound to a newer connection");
            }
        }
    }

    /// Remove a connection on disconnect.
    ///
    /// The user binding is cleared only if it still points at this
    /// connection, so a takeover by a newer socket is not disturbed.
    pub async fn remove(&self, conn_id: &str) {
        let mut inner = self.inner.write().await;

        let Some(conn) = inner.connections.remove(conn_id) else {
            return;
        };

        if let Some(user_id) = conn.user_id {
            if inner.user_bindings.get(&user_id).map(String::as_str) == Some(conn_id) {
                inner.user_bindings.remove(&user_id);
            }
        }

        let lifetime = chrono::Utc::now() - conn.connected_at;
        tracing::debug!(
            conn_id = %conn_id,
            lifetime_secs = lifetime.num_seconds(),
            remaining = inner.connections.len(),
            "WebSocket connection removed"
        );
    }

    /// Send a message to a specific connection. Returns `false` if the
    /// connection is gone or its channel is closed.
    pub async fn send_to_conn(&self, conn_id: &str, message: Message) -> bool {
        let inner = self.inner.read().await;
        match inner.connections.get(conn_id) {
            Some(conn) => conn.sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Send a message to whatever connection is currently bound to the user.
    ///
    /// Returns `false` when the user has no live bound connection; delivery
    /// is best-effort and the caller is expected to carry on.
    pub async fn send_to_user(&self, user_id: &DbId, message: Message) -> bool {
        let inner = self.inner.read().await;

        let Some(conn_id) = inner.user_bindings.get(user_id) else {
            return false;
        };
        match inner.connections.get(conn_id) {
            Some(conn) => conn.sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Number of open connections, authenticated or not.
    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }

    /// Number of users with a bound connection.
    pub async fn bound_user_count(&self) -> usize {
        self.inner.read().await.user_bindings.len()
    }

    /// Send a ping frame to every open connection.
    pub async fn ping_all(&self) {
        let inner = self.inner.read().await;
        for (conn_id, conn) in &inner.connections {
            if conn.sender.send(Message::Ping(Vec::new().into())).is_err() {
                tracing::debug!(conn_id = %conn_id, "Ping failed: sender channel closed");
            }
        }
    }

    /// Close every connection's delivery channel during shutdown.
    ///
    /// Dropping the senders makes each connection's sender task finish, which
    /// in turn drops the sink and closes the socket.
    pub async fn shutdown_all(&self) {
        let mut inner = self.inner.write().await;
        let count = inner.connections.len();
        inner.connections.clear();
        inner.user_bindings.clear();
        if count > 0 {
            tracing::info!(count, "Closed all WebSocket connections for shutdown");
        }
    }
}
