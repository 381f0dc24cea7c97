use tracing::{info, warn};

use crate::{
    api::{listing, AuthToken, FileTransport},
    domain::{AppError, Credentials, FileListing},
};

/// Log in and fetch the files visible to `credentials`.
///
/// The server reports bad credentials with an empty 200 response, so an empty
/// listing comes back as [`AppError::AuthOrEmpty`] rather than as a
/// connection problem.
pub async fn connect<T: FileTransport>(
    transport: &T,
    credentials: &Credentials,
) -> Result<FileListing, AppError> {
    let token = AuthToken::derive(credentials);
    info!(username = %credentials.username, "fetching file listing");

    let body = transport.fetch_listing(&token).await.map_err(|e| {
        warn!(error = %e, "listing request failed");
        AppError::Transport(e.to_string())
    })?;

    let files = listing::parse(&body);
    if files.is_empty() {
        warn!(username = %credentials.username, "empty listing, credentials rejected or no files");
        return Err(AppError::AuthOrEmpty);
    }

    info!(count = files.len(), "listing received");
    Ok(files)
}
