//! Question banks stored as files in a local directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use quizbank_core::model::Question;

use crate::error::CorpusError;
use crate::source::{parse_partition, BankSource};

/// Reads `<root>/<file>` for each requested bank.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl BankSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch(&self, file: &str) -> Result<Vec<Question>, CorpusError> {
        let path = self.root.join(file);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| CorpusError::Io {
                path: path.clone(),
                source,
            })?;
        let questions = parse_partition(&bytes, file)?;
        tracing::debug!(count = questions.len(), "bank read");
        Ok(questions)
    }
}
