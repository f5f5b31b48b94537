pub mod albums;
pub mod auth;
pub mod health;
pub mod metrics;

pub use albums::{create_album, delete_album, get_album, list_albums, update_album};
pub use auth::login;
pub use health::health_check;
pub use metrics::metrics;
