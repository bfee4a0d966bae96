//! User accounts: signup, signin and the protected profile.

pub mod handlers;
pub mod password;
pub mod store;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::accounts::password::{hash_password, verify_password};
use crate::accounts::store::{AccountStore, StoreError};
use crate::auth::SessionGuard;
use crate::errors::AppError;
use crate::models::user::{NewUser, User};

/// Signup payload. Every field is required; `dob` is `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub dob: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validates the payload, hashes the password and persists the user.
pub async fn register(store: &dyn AccountStore, request: SignupRequest) -> Result<User, AppError> {
    let (Some(name), Some(surname), Some(dob), Some(email), Some(password), Some(specialization)) = (
        present(request.name),
        present(request.surname),
        present(request.dob),
        present(request.email),
        present(request.password),
        present(request.specialization),
    ) else {
        return Err(AppError::Validation("All fields are required.".to_string()));
    };

    let dob = NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Validation("dob must be a date in YYYY-MM-DD format.".to_string())
    })?;

    let new_user = NewUser {
        name,
        surname,
        dob,
        email,
        password_hash: hash_password(&password)?,
        specialization,
    };

    let user = store.create(new_user).await.map_err(|e| match e {
        StoreError::Database(e) => {
            tracing::error!("Failed to create user: {e}");
            AppError::Persistence("Error creating user: database error".to_string())
        }
        other => AppError::Persistence(format!("Error creating user: {other}")),
    })?;

    info!("Created user {}", user.id);
    Ok(user)
}

/// Checks credentials and issues a session token.
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn authenticate(
    store: &dyn AccountStore,
    sessions: &SessionGuard,
    request: SigninRequest,
) -> Result<String, AppError> {
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AppError::InvalidCredentials);
    };

    let user = store.find_by_email(&email).await?;
    match user {
        Some(user) if verify_password(&password, &user.password_hash) => {
            sessions.issue(&user.email)
        }
        _ => {
            warn!("Failed signin attempt");
            Err(AppError::InvalidCredentials)
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
