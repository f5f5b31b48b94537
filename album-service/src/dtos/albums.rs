use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Album;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlbumRequest {
    #[validate(length(min = 1, max = 128, message = "name must be between 1 and 128 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAlbumRequest {
    #[validate(length(min = 1, max = 128, message = "name must be between 1 and 128 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// One page of albums. `total_count` is the full store size, independent of
/// the window in `items`.
#[derive(Debug, Serialize)]
pub struct AlbumListResponse {
    pub items: Vec<Album>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}
