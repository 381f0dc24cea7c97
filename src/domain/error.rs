use thiserror::Error;

use super::model::DownloadPhase;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("No files found or authentication failed.")]
    AuthOrEmpty,

    #[error("Cannot write to {path}: {reason}")]
    LocalIo { path: String, reason: String },

    #[error("'{event}' is not valid while {phase:?}")]
    UnexpectedEvent {
        event: &'static str,
        phase: DownloadPhase,
    },
}
