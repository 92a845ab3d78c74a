use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::error::ApiError;

/// One CRUD-exposed entity kind. The generic repository and handlers are
/// written once against this trait; each entity supplies its table names
/// and the two column-specific statements (insert and full replace).
///
/// Payload types deliberately have no `id` field, so a caller can never
/// supply one.
#[async_trait]
pub trait Entity:
    Serialize + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static
{
    /// SQL table name.
    const TABLE: &'static str;
    /// URL path segment, e.g. `techtalks` in `/techtalks/`.
    const PATH: &'static str;
    /// Human label used in messages, e.g. "Tech Talk".
    const KIND: &'static str;
    /// Column list shared by every SELECT/RETURNING on this entity.
    const COLUMNS: &'static str;

    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    fn validate_create(_input: &Self::Create) -> Result<(), ApiError> {
        Ok(())
    }

    fn validate_update(_input: &Self::Update) -> Result<(), ApiError> {
        Ok(())
    }

    /// INSERT with server-assigned id, returning the stored row.
    async fn insert(db: &PgPool, input: Self::Create) -> Result<Self, ApiError>;

    /// Full replace of the mutable columns plus `updated_at = now()`.
    /// Returns `None` when the id does not exist, so callers report
    /// NotFound instead of echoing unsaved data.
    async fn replace(db: &PgPool, id: i64, input: Self::Update)
        -> Result<Option<Self>, ApiError>;
}
