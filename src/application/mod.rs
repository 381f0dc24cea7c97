pub mod download_orchestrator;
pub mod listing;

pub use download_orchestrator::{execute, ConfirmationPrompt, DownloadOrchestrator};
pub use listing::connect;
