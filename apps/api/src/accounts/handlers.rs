//! Axum route handlers for accounts.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::accounts::{authenticate, register, SigninRequest, SignupRequest};
use crate::auth::extractor::AuthUser;
use crate::auth::Claims;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: Claims,
}

/// POST /signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, &'static str), AppError> {
    register(state.accounts.as_ref(), request).await?;
    Ok((StatusCode::CREATED, "User created successfully"))
}

/// POST /signin
pub async fn handle_signin(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = authenticate(state.accounts.as_ref(), &state.sessions, request).await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /profile
pub async fn handle_profile(AuthUser(claims): AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Welcome to your profile".to_string(),
        user: claims,
    })
}
