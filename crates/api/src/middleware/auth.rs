//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tunetrace_core::error::CoreError;
use tunetrace_core::types::DbId;

use crate::auth::jwt;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated user, extracted from the `Authorization: Bearer <token>`
/// header.
///
/// Add this as a handler argument to require authentication; requests without
/// a header are rejected with 401, requests with an invalid or expired token
/// with 403.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated user's id (from the token `sub` claim).
    pub user_id: DbId,
    /// The authenticated user's email (from the token `email` claim).
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                CoreError::Unauthorized("Access denied. No token provided.".to_string())
            })?;

        let claims = jwt::validate_token(token, &state.config.jwt)
            .map_err(|_| CoreError::Forbidden("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
