use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::{
    api::{ApiError, AuthToken, FileTransport},
    domain::{AppError, Credentials, DownloadOutcome, DownloadPhase, DownloadRequest},
    utils::{file_type_label, sanitize_filename},
};

/// What the user is asked before anything is downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub filename: String,
    pub file_type: String,
}

impl ConfirmationPrompt {
    pub fn message(&self) -> String {
        format!(
            "Do you want to download the file '{}'?\nFile type: {}",
            self.filename, self.file_type
        )
    }
}

enum AttemptState {
    Idle,
    AwaitingConfirmation {
        filename: String,
        credentials: Credentials,
    },
    AwaitingDestination {
        filename: String,
        credentials: Credentials,
    },
    InFlight {
        filename: String,
    },
    Cancelled,
    Finished(DownloadOutcome),
}

/// Drives a single download attempt:
/// select → confirm → pick destination → transfer.
///
/// Each step is an event on the state machine; a step that does not fit the
/// current phase is rejected and leaves the state alone. Once terminal, the
/// attempt stays terminal; start a new orchestrator for the next file.
pub struct DownloadOrchestrator {
    state: AttemptState,
}

impl Default for DownloadOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadOrchestrator {
    pub fn new() -> Self {
        Self {
            state: AttemptState::Idle,
        }
    }

    pub fn phase(&self) -> DownloadPhase {
        match self.state {
            AttemptState::Idle => DownloadPhase::Idle,
            AttemptState::AwaitingConfirmation { .. } => DownloadPhase::AwaitingConfirmation,
            AttemptState::AwaitingDestination { .. } => DownloadPhase::AwaitingDestination,
            AttemptState::InFlight { .. } => DownloadPhase::InFlight,
            AttemptState::Cancelled | AttemptState::Finished(_) => DownloadPhase::Terminal,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase(), DownloadPhase::Idle | DownloadPhase::Terminal)
    }

    /// File being handled by this attempt, if any.
    pub fn filename(&self) -> Option<&str> {
        match &self.state {
            AttemptState::AwaitingConfirmation { filename, .. }
            | AttemptState::AwaitingDestination { filename, .. }
            | AttemptState::InFlight { filename, .. } => Some(filename),
            _ => None,
        }
    }

    fn reject(&self, event: &'static str) -> AppError {
        warn!(event, phase = ?self.phase(), "ignoring download event");
        AppError::UnexpectedEvent {
            event,
            phase: self.phase(),
        }
    }

    /// Idle → AwaitingConfirmation.
    pub fn select(
        &mut self,
        filename: String,
        credentials: Credentials,
    ) -> Result<ConfirmationPrompt, AppError> {
        if !matches!(self.state, AttemptState::Idle) {
            return Err(self.reject("select"));
        }

        let prompt = ConfirmationPrompt {
            file_type: file_type_label(&filename).to_string(),
            filename: filename.clone(),
        };
        info!(%filename, file_type = %prompt.file_type, "download requested");

        self.state = AttemptState::AwaitingConfirmation {
            filename,
            credentials,
        };
        Ok(prompt)
    }

    /// AwaitingConfirmation → AwaitingDestination on yes, Terminal on no.
    ///
    /// Returns the name to pre-fill in the save dialog when confirmed.
    pub fn confirm(&mut self, accepted: bool) -> Result<Option<String>, AppError> {
        match std::mem::replace(&mut self.state, AttemptState::Cancelled) {
            AttemptState::AwaitingConfirmation {
                filename,
                credentials,
            } => {
                if !accepted {
                    info!(%filename, "download declined");
                    return Ok(None);
                }

                let suggested = sanitize_filename(&filename);
                self.state = AttemptState::AwaitingDestination {
                    filename,
                    credentials,
                };
                Ok(Some(suggested))
            }
            other => {
                self.state = other;
                Err(self.reject("confirm"))
            }
        }
    }

    /// AwaitingDestination → InFlight when a path was picked, Terminal when
    /// the save dialog was cancelled.
    pub fn choose_destination(
        &mut self,
        destination: Option<PathBuf>,
    ) -> Result<Option<DownloadRequest>, AppError> {
        match std::mem::replace(&mut self.state, AttemptState::Cancelled) {
            AttemptState::AwaitingDestination {
                filename,
                credentials,
            } => {
                let Some(destination) = destination else {
                    info!(%filename, "save cancelled");
                    return Ok(None);
                };

                self.state = AttemptState::InFlight {
                    filename: filename.clone(),
                };
                Ok(Some(DownloadRequest {
                    filename,
                    destination,
                    credentials,
                }))
            }
            other => {
                self.state = other;
                Err(self.reject("choose_destination"))
            }
        }
    }

    /// InFlight → Terminal. Hands the outcome back for reporting.
    pub fn finish(&mut self, outcome: DownloadOutcome) -> Result<DownloadOutcome, AppError> {
        if !matches!(self.state, AttemptState::InFlight { .. }) {
            return Err(self.reject("finish"));
        }
        self.state = AttemptState::Finished(outcome.clone());
        Ok(outcome)
    }
}

fn local_io_failure(destination: &Path, reason: impl ToString) -> DownloadOutcome {
    let err = AppError::LocalIo {
        path: destination.display().to_string(),
        reason: reason.to_string(),
    };
    DownloadOutcome::LocalIoFailure(err.to_string())
}

/// Streams one confirmed download into its destination.
///
/// The destination is opened before any request goes out; if that fails the
/// server is never contacted. The file handle is flushed and closed before
/// the outcome is returned. A transfer that breaks halfway leaves what was
/// received on disk.
pub async fn execute<T: FileTransport>(transport: &T, request: DownloadRequest) -> DownloadOutcome {
    let DownloadRequest {
        filename,
        destination,
        credentials,
    } = request;

    let mut file = match File::create(&destination).await {
        Ok(file) => file,
        Err(e) => {
            warn!(destination = %destination.display(), error = %e, "cannot open destination");
            return local_io_failure(&destination, e);
        }
    };

    let token = AuthToken::derive(&credentials);
    drop(credentials);

    info!(%filename, destination = %destination.display(), "download started");
    let result = transport.fetch_file(&token, &filename, &mut file).await;

    let flushed = file.flush().await;
    let closed = match flushed {
        Ok(()) if result.is_ok() => file.sync_all().await,
        other => other,
    };
    drop(file);

    let outcome = match (result, closed) {
        (Ok(bytes), Ok(())) => DownloadOutcome::Success(bytes),
        (Ok(_), Err(e)) => local_io_failure(&destination, e),
        (Err(ApiError::Write(e)), _) => local_io_failure(&destination, e),
        (Err(e), _) => DownloadOutcome::TransportFailure(format!(
            "{} (file left at {})",
            e,
            destination.display()
        )),
    };

    match &outcome {
        DownloadOutcome::Success(bytes) => {
            info!(%filename, bytes, destination = %destination.display(), "download complete")
        }
        failure => warn!(%filename, %failure, "download failed"),
    }

    outcome
}
