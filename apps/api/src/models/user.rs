use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub dob: NaiveDate,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
}

/// A validated signup, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub dob: NaiveDate,
    pub email: String,
    pub password_hash: String,
    pub specialization: String,
}
