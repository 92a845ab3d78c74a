use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod jwt;
pub mod password;
pub mod principal;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
