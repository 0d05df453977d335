//! Shared domain types for the TuneTrace server.

pub mod error;
pub mod notification;
pub mod types;
