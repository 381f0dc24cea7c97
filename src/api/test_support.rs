// Stub servers and a scripted transport shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::auth::AuthToken;
use super::client::{ApiError, FileTransport, Result};

/// Base URL of a port nothing listens on.
pub fn refused_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Accepts connections and never answers.
pub async fn silent_server() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    (format!("http://{}", addr), handle)
}

/// Answers one request with `body` while announcing `declared_len` bytes,
/// then hangs up.
pub async fn truncated_server(body: &'static [u8], declared_len: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                declared_len
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(body).await;
            let _ = socket.flush().await;
        }
    });
    format!("http://{}", addr)
}

/// A real `reqwest::Error` to stand in for connection failures.
pub fn transport_error() -> ApiError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    ApiError::Transport(err)
}

pub enum Scripted {
    Body(Vec<u8>),
    /// Writes the bytes, then fails like a dropped connection.
    BreakAfter(Vec<u8>),
    Unreachable,
}

/// `FileTransport` double that replays scripted answers and counts calls.
pub struct ScriptedTransport {
    listing: Scripted,
    file: Scripted,
    listing_calls: AtomicUsize,
    file_calls: AtomicUsize,
    tokens: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(listing: Scripted, file: Scripted) -> Self {
        Self {
            listing,
            file,
            listing_calls: AtomicUsize::new(0),
            file_calls: AtomicUsize::new(0),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn serving_file(bytes: &[u8]) -> Self {
        Self::new(Scripted::Unreachable, Scripted::Body(bytes.to_vec()))
    }

    pub fn serving_listing(body: &str) -> Self {
        Self::new(Scripted::Body(body.as_bytes().to_vec()), Scripted::Unreachable)
    }

    pub fn calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst) + self.file_calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    fn record(&self, token: &AuthToken) {
        self.tokens.lock().unwrap().push(token.as_str().to_string());
    }
}

impl FileTransport for ScriptedTransport {
    async fn fetch_listing(&self, token: &AuthToken) -> Result<String> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.record(token);
        match &self.listing {
            Scripted::Body(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            Scripted::BreakAfter(_) | Scripted::Unreachable => Err(transport_error()),
        }
    }

    async fn fetch_file<W>(&self, token: &AuthToken, _filename: &str, destination: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        self.record(token);
        match &self.file {
            Scripted::Body(bytes) => {
                destination.write_all(bytes).await.map_err(ApiError::Write)?;
                destination.flush().await.map_err(ApiError::Write)?;
                Ok(bytes.len() as u64)
            }
            Scripted::BreakAfter(bytes) => {
                destination.write_all(bytes).await.map_err(ApiError::Write)?;
                destination.flush().await.map_err(ApiError::Write)?;
                Err(transport_error())
            }
            Scripted::Unreachable => Err(transport_error()),
        }
    }
}
