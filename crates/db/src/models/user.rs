//! User entity model.

use sqlx::FromRow;
use tunetrace_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// Deliberately not `Serialize`: the password hash must never reach the
/// wire. Handlers build their own public DTOs.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub created_at: Timestamp,
}
