use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::services::Identity;
use crate::startup::AppState;

/// Requires a valid bearer token on the route.
///
/// A missing or malformed Authorization header is treated identically to an
/// unknown token; the route handler never runs on rejection.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let identity = state.sessions.verify(token).ok_or(AppError::Unauthorized)?;

    // Store the identity in request extensions so handlers can access it.
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Extractor for the authenticated identity in handlers.
pub struct AuthUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absence here is a wiring bug (route not behind auth_middleware),
        // not an authentication failure.
        let identity = parts.extensions.get::<Identity>().cloned().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("identity missing from request extensions"))
        })?;

        Ok(AuthUser(identity))
    }
}
