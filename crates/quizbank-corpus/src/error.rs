//! Corpus loading error types.
//!
//! Any of these aborts corpus loading: a quiz is never configured from a
//! partially loaded corpus.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while retrieving or parsing question banks.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A bank file could not be read from disk.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP error {status} for {url}")]
    Http { status: u16, url: String },

    /// The server could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The source has no bank with this name.
    #[error("question bank not found: {0}")]
    NotFound(String),

    /// The bank is not a JSON array of question records.
    #[error("invalid question bank {partition}: {message}")]
    Parse { partition: String, message: String },

    /// Wraps the first failure of a corpus load with the bank it came from.
    #[error("failed to load question bank '{partition}'")]
    Partition {
        partition: String,
        #[source]
        source: Box<CorpusError>,
    },
}

impl CorpusError {
    /// The bank a load failure refers to, if known.
    pub fn partition(&self) -> Option<&str> {
        match self {
            CorpusError::Partition { partition, .. } | CorpusError::Parse { partition, .. } => {
                Some(partition)
            }
            CorpusError::NotFound(partition) => Some(partition),
            _ => None,
        }
    }
}
