pub mod album;
pub mod auth;
pub mod metrics;
pub mod repository;

pub use album::AlbumService;
pub use auth::{AuthService, Identity, SessionStore};
pub use metrics::{get_metrics, init_metrics};
pub use repository::{AlbumRepository, MemoryRepository};
