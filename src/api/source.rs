use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::corpus::Corpus;
use crate::server::{self, CorpusError};

/// Errors that can occur while fetching the corpus.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Endpoint answered with a non-200 status.
    Status { status: u16, message: String },
    /// Response body was not a corpus document.
    Parse(String),
    /// Local source documents could not be loaded.
    Load(CorpusError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status { status, message } => {
                write!(f, "endpoint error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
            FetchError::Load(e) => write!(f, "load error: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Where the reader gets its corpus from.
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Short description for logs (URL or file pair).
    fn describe(&self) -> String;

    /// Fetch the merged corpus once.
    async fn fetch(&self) -> Result<Corpus, FetchError>;
}

/// Reads the two testament documents straight from disk, bypassing HTTP.
pub struct FileCorpusSource {
    pub old_testament: PathBuf,
    pub new_testament: PathBuf,
}

#[async_trait]
impl CorpusSource for FileCorpusSource {
    fn describe(&self) -> String {
        format!(
            "{} + {}",
            self.old_testament.display(),
            self.new_testament.display()
        )
    }

    async fn fetch(&self) -> Result<Corpus, FetchError> {
        server::load_corpus(&self.old_testament, &self.new_testament)
            .await
            .map_err(FetchError::Load)
    }
}
