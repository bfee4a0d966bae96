use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::Claims;
use crate::errors::AppError;
use crate::state::AppState;

/// Claims of an authenticated caller.
///
/// Reads `Authorization: <scheme> <token>`. No header, or nothing after the
/// scheme, rejects with `MissingToken` (401); a token that fails verification
/// rejects with `InvalidToken` (403).
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AppError::MissingToken)?
            .to_str()
            .map_err(|_| AppError::InvalidToken)?;

        let token = bearer_token(header).ok_or(AppError::MissingToken)?;
        let claims = state.sessions.verify(token).map_err(|e| {
            tracing::warn!("Invalid session token presented");
            e
        })?;

        Ok(AuthUser(claims))
    }
}

/// Second whitespace-separated segment of the header value.
fn bearer_token(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}
