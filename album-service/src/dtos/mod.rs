pub mod albums;
pub mod auth;

pub use albums::{AlbumListResponse, CreateAlbumRequest, ListParams, UpdateAlbumRequest};
pub use auth::{LoginRequest, TokenResponse};
