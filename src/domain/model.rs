use std::fmt;
use std::path::PathBuf;

/// Username and password as typed by the user.
///
/// Supplied fresh for every request; nothing in the crate keeps a copy past
/// the call it was passed to.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Filenames reported by the server, in the order received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileListing {
    names: Vec<String>,
}

impl FileListing {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A confirmed download waiting to be executed.
///
/// Only built once the user said yes and picked a destination. Consumed by
/// value, so a request is executed at most once.
#[derive(Debug)]
pub struct DownloadRequest {
    pub filename: String,
    pub destination: PathBuf,
    pub credentials: Credentials,
}

/// Terminal result of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success(u64),
    TransportFailure(String),
    LocalIoFailure(String),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(bytes) => write!(f, "Downloaded {} bytes", bytes),
            Self::TransportFailure(reason) => write!(f, "Download failed: {}", reason),
            Self::LocalIoFailure(reason) => write!(f, "Could not save file: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    AwaitingConfirmation,
    AwaitingDestination,
    InFlight,
    Terminal,
}
