use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// JSON body extractor whose rejection flows through the shared error model
/// instead of axum's default plain-text response.
///
/// Field-level validation stays with the services so it runs regardless of
/// how a request object was produced.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("invalid request body: {}", e)))?;

        Ok(AppJson(value))
    }
}
