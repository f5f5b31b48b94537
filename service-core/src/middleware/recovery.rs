use std::any::Any;
use std::backtrace::Backtrace;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ErrorBody;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Outermost recovery boundary for the request pipeline.
///
/// A panic anywhere in the handler chain is captured here, logged with its
/// backtrace, and answered with the generic 500 body. The worker task keeps
/// serving subsequent requests.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };

    let backtrace = Backtrace::force_capture();
    tracing::error!(panic = %message, %backtrace, "recovered from panic while handling request");

    ErrorBody::internal().into_response()
}
