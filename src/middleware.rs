use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, Result},
    services::Claims,
    state::AppState,
};

/// Rejects the request with a server error when the database is unreachable.
pub async fn require_storage(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    state.health.ensure_healthy().await?;
    Ok(next.run(request).await)
}

/// Caller identity taken from a verified bearer token.
///
/// Missing or malformed `Authorization` headers yield 401; a token that fails
/// verification yields 403. Handlers that take this extractor never reach
/// their validation logic without a verified caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Token de autenticación requerido".to_string()))?;

        let claims = state.tokens.verify(token)?;
        Ok(Self(claims))
    }
}
