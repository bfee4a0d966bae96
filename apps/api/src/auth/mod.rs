//! Session Guard: issues and verifies signed bearer tokens.
//!
//! Tokens are HS256 JWTs whose only identity claim is the email. Nothing is
//! stored server-side: a token is valid iff its signature checks out and its
//! `exp` is still in the future. Expiry is checked with zero leeway.

pub mod extractor;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Lifetime of an issued session token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct SessionGuard {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionGuard {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signs a token for `email`, valid for [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        self.issue_at(email, Utc::now().timestamp())
    }

    /// Signs a token as if issued at `issued_at` (unix seconds).
    pub fn issue_at(&self, email: &str, issued_at: i64) -> Result<String, AppError> {
        let claims = Claims {
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {e}")))
    }

    /// Any failure (bad signature, expired, malformed) is `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {e}");
                AppError::InvalidToken
            })
    }
}
