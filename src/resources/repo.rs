use sqlx::PgPool;

use super::entity::Entity;
use crate::error::ApiError;

pub async fn create<E: Entity>(db: &PgPool, input: E::Create) -> Result<E, ApiError> {
    E::validate_create(&input)?;
    E::insert(db, input).await
}

/// Rows come back ordered by id ascending, so pagination over a stable
/// dataset partitions it without overlap.
pub async fn list<E: Entity>(db: &PgPool, skip: i64, take: i64) -> Result<Vec<E>, ApiError> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY id ASC LIMIT $1 OFFSET $2",
        E::COLUMNS,
        E::TABLE
    );
    let rows = sqlx::query_as::<_, E>(&sql)
        .bind(take)
        .bind(skip)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn fetch<E: Entity>(db: &PgPool, id: i64) -> Result<E, ApiError> {
    let sql = format!("SELECT {} FROM {} WHERE id = $1", E::COLUMNS, E::TABLE);
    sqlx::query_as::<_, E>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::NotFound(E::KIND))
}

pub async fn update<E: Entity>(db: &PgPool, id: i64, input: E::Update) -> Result<E, ApiError> {
    E::validate_update(&input)?;
    E::replace(db, id, input)
        .await?
        .ok_or(ApiError::NotFound(E::KIND))
}

pub async fn remove<E: Entity>(db: &PgPool, id: i64) -> Result<(), ApiError> {
    let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
    let result = sqlx::query(&sql).bind(id).execute(db).await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(E::KIND));
    }
    Ok(())
}
