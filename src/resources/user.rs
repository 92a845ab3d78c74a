use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::entity::Entity;
use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// The `users` CRUD resource. Carries no credentials; login identities
/// live in the credential store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub full_name: String,
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

fn check_email(payload: &UserPayload) -> Result<(), ApiError> {
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("invalid email address".into()));
    }
    Ok(())
}

#[async_trait]
impl Entity for UserRecord {
    const TABLE: &'static str = "users";
    const PATH: &'static str = "users";
    const KIND: &'static str = "User";
    const COLUMNS: &'static str =
        "id, full_name, email, is_active, is_superuser, created_at, updated_at";

    type Create = UserPayload;
    type Update = UserPayload;

    fn validate_create(input: &UserPayload) -> Result<(), ApiError> {
        check_email(input)
    }

    fn validate_update(input: &UserPayload) -> Result<(), ApiError> {
        check_email(input)
    }

    async fn insert(db: &PgPool, input: UserPayload) -> Result<Self, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (full_name, email, is_active, is_superuser)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, email, is_active, is_superuser, created_at, updated_at
            "#,
        )
        .bind(input.full_name)
        .bind(input.email)
        .bind(input.is_active)
        .bind(input.is_superuser)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    async fn replace(
        db: &PgPool,
        id: i64,
        input: UserPayload,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET full_name = $1, email = $2, is_active = $3, is_superuser = $4,
                updated_at = now()
            WHERE id = $5
            RETURNING id, full_name, email, is_active, is_superuser, created_at, updated_at
            "#,
        )
        .bind(input.full_name)
        .bind(input.email)
        .bind(input.is_active)
        .bind(input.is_superuser)
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}
