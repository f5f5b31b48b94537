use axum::response::IntoResponse;

use crate::services::get_metrics;

pub async fn metrics() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
