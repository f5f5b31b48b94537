use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    recovery::catch_panic_layer,
    tracing::{REQUEST_ID_HEADER, request_id_middleware},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::AlbumConfig;
use crate::handlers;
use crate::middleware::auth_middleware;
use crate::services::{AlbumService, AuthService, MemoryRepository, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AlbumConfig,
    pub albums: AlbumService,
    pub auth: AuthService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: AlbumConfig) -> Self {
        let sessions = SessionStore::new(config.auth.token_expiry_hours);
        let albums = AlbumService::new(Arc::new(MemoryRepository::new()));
        let auth = AuthService::new(config.auth.clone(), sessions.clone());

        Self {
            config,
            albums,
            auth,
            sessions,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route("/login", post(handlers::login))
        .route("/albums", get(handlers::list_albums))
        .route("/albums/:id", get(handlers::get_album));

    let protected = Router::new()
        .route("/albums", post(handlers::create_album))
        .route(
            "/albums/:id",
            put(handlers::update_album).delete(handlers::delete_album),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public
        .merge(protected)
        // Unmatched paths get the same classified 404 body as a missing row.
        .fallback(|| async { AppError::NotFound })
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        // Recovery is the outermost boundary: a panic anywhere below becomes
        // a 500 and the worker keeps serving.
        .layer(catch_panic_layer())
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: AlbumConfig) -> Result<Self, AppError> {
        let state = AppState::new(config.clone());
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
