use std::sync::Arc;

use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{AlbumListResponse, CreateAlbumRequest, UpdateAlbumRequest};
use crate::models::Album;
use crate::services::AlbumRepository;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// CRUD orchestration over an [`AlbumRepository`].
///
/// Validation short-circuits before any repository call, so invalid input
/// never causes a partial write.
#[derive(Clone)]
pub struct AlbumService {
    repo: Arc<dyn AlbumRepository>,
}

impl AlbumService {
    pub fn new(repo: Arc<dyn AlbumRepository>) -> Self {
        Self { repo }
    }

    /// `total_count` always reflects the unfiltered store size, even when
    /// `items` is a pagination window.
    pub async fn list(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<AlbumListResponse, AppError> {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;

        let (items, total) = self.repo.list(offset as usize, page_size as usize).await?;

        Ok(AlbumListResponse {
            items,
            total_count: total as u64,
            page,
            page_size,
        })
    }

    pub async fn get(&self, id: &str) -> Result<Album, AppError> {
        self.repo.get(id).await
    }

    pub async fn create(&self, req: CreateAlbumRequest) -> Result<Album, AppError> {
        req.validate()?;
        self.repo.create(Album::new(req.name)).await
    }

    /// Read-modify-write: loads the current album, applies the validated
    /// fields, refreshes `updated_at`, persists.
    pub async fn update(&self, id: &str, req: UpdateAlbumRequest) -> Result<Album, AppError> {
        req.validate()?;
        let mut album = self.repo.get(id).await?;
        album.name = req.name;
        album.updated_at = chrono::Utc::now();
        self.repo.update(album).await
    }

    pub async fn delete(&self, id: &str) -> Result<Album, AppError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryRepository;

    fn service() -> AlbumService {
        AlbumService::new(Arc::new(MemoryRepository::new()))
    }

    #[tokio::test]
    async fn create_then_list_counts_every_album() {
        let service = service();
        for i in 0..3 {
            service
                .create(CreateAlbumRequest {
                    name: format!("album-{i}"),
                })
                .await
                .unwrap();
        }

        let listing = service.list(None, None).await.unwrap();
        assert_eq!(3, listing.total_count);
        assert_eq!(3, listing.items.len());
    }

    #[tokio::test]
    async fn invalid_input_short_circuits_before_the_repository() {
        let service = service();

        let err = service
            .create(CreateAlbumRequest {
                name: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Nothing was persisted.
        let listing = service.list(None, None).await.unwrap();
        assert_eq!(0, listing.total_count);
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_and_keeps_id() {
        let service = service();
        let created = service
            .create(CreateAlbumRequest {
                name: "original".to_string(),
            })
            .await
            .unwrap();

        let updated = service
            .update(
                &created.id,
                UpdateAlbumRequest {
                    name: "renamed".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.id, updated.id);
        assert_eq!("renamed", updated.name);
        assert_eq!(created.created_at, updated.created_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn update_unknown_album_is_not_found() {
        let service = service();
        let err = service
            .update(
                "missing",
                UpdateAlbumRequest {
                    name: "whatever".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn list_clamps_the_page_window_but_not_the_total() {
        let service = service();
        for i in 0..5 {
            service
                .create(CreateAlbumRequest {
                    name: format!("album-{i}"),
                })
                .await
                .unwrap();
        }

        let listing = service.list(Some(2), Some(2)).await.unwrap();
        assert_eq!(2, listing.items.len());
        assert_eq!(5, listing.total_count);
        assert_eq!(2, listing.page);

        // page 0 is treated as page 1
        let listing = service.list(Some(0), Some(2)).await.unwrap();
        assert_eq!(1, listing.page);
    }
}
