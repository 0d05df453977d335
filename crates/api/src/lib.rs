//! TuneTrace HTTP + WebSocket server.
//!
//! Library form of the server so integration tests can build the exact
//! router the binary serves.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
