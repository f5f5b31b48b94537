use async_trait::async_trait;
use service_core::error::AppError;
use tokio::sync::RwLock;

use crate::models::Album;

/// Persistence-facing capability set used by the album service.
///
/// Implementations must be safe for concurrent use by many requests; callers
/// assume no cross-call transactional guarantee. A missing row surfaces as
/// [`AppError::NotFound`] regardless of why the backing store had no match.
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// Returns one window of albums plus the full, unpaginated item count.
    async fn list(&self, offset: usize, limit: usize) -> Result<(Vec<Album>, usize), AppError>;

    async fn get(&self, id: &str) -> Result<Album, AppError>;

    async fn create(&self, album: Album) -> Result<Album, AppError>;

    async fn update(&self, album: Album) -> Result<Album, AppError>;

    /// Removes the album and returns the deleted value for response echoing.
    async fn delete(&self, id: &str) -> Result<Album, AppError>;
}

/// In-memory repository, insertion-ordered.
#[derive(Default)]
pub struct MemoryRepository {
    items: RwLock<Vec<Album>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlbumRepository for MemoryRepository {
    async fn list(&self, offset: usize, limit: usize) -> Result<(Vec<Album>, usize), AppError> {
        let items = self.items.read().await;
        let total = items.len();
        let window = items.iter().skip(offset).take(limit).cloned().collect();
        Ok((window, total))
    }

    async fn get(&self, id: &str) -> Result<Album, AppError> {
        let items = self.items.read().await;
        items
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, album: Album) -> Result<Album, AppError> {
        let mut items = self.items.write().await;
        if items.iter().any(|a| a.id == album.id) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "duplicate album id {}",
                album.id
            )));
        }
        items.push(album.clone());
        Ok(album)
    }

    async fn update(&self, album: Album) -> Result<Album, AppError> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|a| a.id == album.id)
            .ok_or(AppError::NotFound)?;
        *slot = album.clone();
        Ok(album)
    }

    async fn delete(&self, id: &str) -> Result<Album, AppError> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|a| a.id == id)
            .ok_or(AppError::NotFound)?;
        Ok(items.remove(index))
    }
}
