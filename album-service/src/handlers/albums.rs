use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use service_core::error::AppError;

use crate::dtos::{CreateAlbumRequest, ListParams, UpdateAlbumRequest};
use crate::middleware::AuthUser;
use crate::startup::AppState;
use crate::utils::AppJson;

pub async fn list_albums(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let listing = state.albums.list(params.page, params.page_size).await?;
    Ok(Json(listing))
}

pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let album = state.albums.get(&id).await?;
    Ok(Json(album))
}

pub async fn create_album(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    AppJson(req): AppJson<CreateAlbumRequest>,
) -> Result<impl IntoResponse, AppError> {
    let album = state.albums.create(req).await?;
    tracing::info!(album_id = %album.id, user = %identity.username, "album created");
    Ok((StatusCode::CREATED, Json(album)))
}

pub async fn update_album(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateAlbumRequest>,
) -> Result<impl IntoResponse, AppError> {
    let album = state.albums.update(&id, req).await?;
    tracing::info!(album_id = %album.id, user = %identity.username, "album updated");
    Ok(Json(album))
}

pub async fn delete_album(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let album = state.albums.delete(&id).await?;
    tracing::info!(album_id = %album.id, user = %identity.username, "album deleted");
    Ok(Json(album))
}
