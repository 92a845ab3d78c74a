use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        jwt::{AuthPrincipal, JwtKeys},
        password::verify_password,
        principal::{CredentialStore, Principal},
    },
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(login_for_access_token))
        .route("/users/me/", get(read_me))
        .route("/users/me/items/", get(read_own_items))
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Unknown username and wrong password fail with the same error, so the
/// endpoint cannot be used to enumerate usernames.
pub fn authenticate<'a>(
    store: &'a CredentialStore,
    username: &str,
    password: &str,
) -> Result<&'a Principal, ApiError> {
    let principal = store.lookup(username).ok_or(ApiError::InvalidCredentials)?;
    let ok = verify_password(password, &principal.password_hash)?;
    if !ok {
        warn!(username = %principal.username, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }
    Ok(principal)
}

fn ensure_active(principal: &Principal) -> Result<(), ApiError> {
    if principal.disabled {
        return Err(ApiError::Disabled);
    }
    Ok(())
}

#[instrument(skip(state, form))]
pub async fn login_for_access_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let principal = authenticate(&state.principals, &form.username, &form.password)?;
    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&principal.username)?;
    info!(username = %principal.username, "access token issued");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

#[instrument(skip_all)]
pub async fn read_me(
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<Principal>, ApiError> {
    ensure_active(&principal)?;
    Ok(Json(principal))
}

#[instrument(skip_all)]
pub async fn read_own_items(
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_active(&principal)?;
    Ok(Json(json!([
        { "item_id": "Foo", "owner": principal.username }
    ])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::auth::principal::test_principal;

    fn store_with_johndoe() -> CredentialStore {
        let hash = hash_password("secret").unwrap();
        CredentialStore::from_principals(vec![test_principal("johndoe", &hash)])
    }

    #[test]
    fn authenticate_accepts_correct_password() {
        let store = store_with_johndoe();
        let principal = authenticate(&store, "johndoe", "secret").expect("valid login");
        assert_eq!(principal.username, "johndoe");
    }

    #[test]
    fn authenticate_fails_identically_for_unknown_user_and_bad_password() {
        let store = store_with_johndoe();
        let unknown = authenticate(&store, "nobody", "secret").unwrap_err();
        let bad_password = authenticate(&store, "johndoe", "wrong").unwrap_err();
        assert!(matches!(unknown, ApiError::InvalidCredentials));
        assert!(matches!(bad_password, ApiError::InvalidCredentials));
        assert_eq!(unknown.status(), bad_password.status());
        assert_eq!(unknown.to_string(), bad_password.to_string());
    }

    #[test]
    fn disabled_principal_is_rejected_with_bad_request() {
        let mut principal = test_principal("johndoe", "x");
        principal.disabled = true;
        let err = ensure_active(&principal).unwrap_err();
        assert!(matches!(err, ApiError::Disabled));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn active_principal_passes() {
        let principal = test_principal("johndoe", "x");
        assert!(ensure_active(&principal).is_ok());
    }

    #[test]
    fn token_response_shape() {
        let res = TokenResponse {
            access_token: "abc".into(),
            token_type: "bearer",
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }
}
