use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Plaintext endpoint, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Whole-request timeout, body transfer included
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        Self {
            base_url: format!("http://{}:{}", host, port),
            timeout,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT)
    }
}
