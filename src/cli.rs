// Startup configuration, from flags or environment.

use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::api::{ApiConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "simple-file-downloader",
    version,
    about = "Browse and download files from an authenticated file server"
)]
pub struct Args {
    /// File server host
    #[arg(long, env = "FILES_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// File server port
    #[arg(long, env = "FILES_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "FILES_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.host, self.port, Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["simple-file-downloader"]).unwrap();
        let config = args.api_config();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "simple-file-downloader",
            "--host",
            "files.lan",
            "--port",
            "9000",
            "--timeout-secs",
            "12",
            "-vv",
        ])
        .unwrap();
        let config = args.api_config();

        assert_eq!(config.base_url, "http://files.lan:9000");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Args::try_parse_from(["simple-file-downloader", "--timeout-secs", "0"]).is_err());
    }
}
