use crate::state::AppState;
use axum::Router;

pub mod entity;
pub mod handlers;
pub mod repo;
pub mod talk;
pub mod user;

pub fn router() -> Router<AppState> {
    handlers::resource_router::<talk::Talk>()
        .merge(handlers::resource_router::<user::UserRecord>())
}
