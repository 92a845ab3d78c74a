use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::{entity::Entity, repo};
use crate::{error::ApiError, state::AppState};

/// Offset/limit pagination with the original defaults.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_take")]
    pub take: i64,
}

fn default_take() -> i64 {
    100
}

impl Pagination {
    fn check(&self) -> Result<(), ApiError> {
        if self.skip < 0 || self.take < 0 {
            return Err(ApiError::Validation(
                "skip and take must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn deleted_message<E: Entity>(id: i64) -> String {
    format!("{} with id: {} deleted successfully!", E::KIND, id)
}

/// All five CRUD routes for one entity kind. Trailing slashes match the
/// original surface.
pub fn resource_router<E: Entity>() -> Router<AppState> {
    let collection = format!("/{}/", E::PATH);
    let item = format!("/{}/:id/", E::PATH);
    Router::new()
        .route(&collection, post(create::<E>).get(list::<E>))
        .route(
            &item,
            get(fetch::<E>).put(update::<E>).delete(remove::<E>),
        )
}

#[instrument(skip_all, fields(kind = E::PATH))]
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    Json(payload): Json<E::Create>,
) -> Result<(StatusCode, Json<E>), ApiError> {
    let row = repo::create::<E>(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[instrument(skip_all, fields(kind = E::PATH))]
pub async fn list<E: Entity>(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<E>>, ApiError> {
    page.check()?;
    let rows = repo::list::<E>(&state.db, page.skip, page.take).await?;
    Ok(Json(rows))
}

#[instrument(skip_all, fields(kind = E::PATH, id))]
pub async fn fetch<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<E>, ApiError> {
    let row = repo::fetch::<E>(&state.db, id).await?;
    Ok(Json(row))
}

#[instrument(skip_all, fields(kind = E::PATH, id))]
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<E::Update>,
) -> Result<Json<E>, ApiError> {
    let row = repo::update::<E>(&state.db, id, payload).await?;
    Ok(Json(row))
}

#[instrument(skip_all, fields(kind = E::PATH, id))]
pub async fn remove<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    repo::remove::<E>(&state.db, id).await?;
    Ok(Json(json!({ "message": deleted_message::<E>(id) })))
}
