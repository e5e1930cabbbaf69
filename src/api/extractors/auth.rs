use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use std::sync::Arc;
use tracing::Span;

use crate::state::AppState;

/// The authenticated store, resolved from the `Authorization: Bearer` token.
/// Every scoped query uses `id` so one store can never see another's data.
pub struct CurrentStore {
    pub id: String,
    pub store_name: String,
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentStore
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state
            .auth_service
            .verify_token(token)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Span::current().record("store_id", claims.sub.as_str());

        Ok(CurrentStore {
            id: claims.sub,
            store_name: claims.store_name,
            username: claims.username,
        })
    }
}
