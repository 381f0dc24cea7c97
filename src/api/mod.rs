pub mod auth;
pub mod client;
pub mod listing;
pub mod models;

#[cfg(test)]
pub mod test_support;

pub use auth::AuthToken;
pub use client::{ApiClient, ApiError, FileTransport};
pub use models::{ApiConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
