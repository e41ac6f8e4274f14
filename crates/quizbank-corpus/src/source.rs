//! The `BankSource` trait: where question bank files come from.

use async_trait::async_trait;

use quizbank_core::model::Question;

use crate::error::CorpusError;

/// A place question bank files can be retrieved from by name.
#[async_trait]
pub trait BankSource: Send + Sync {
    /// Short source kind for logs (e.g. "directory").
    fn name(&self) -> &str;

    /// Retrieve and parse the bank stored under `file`.
    async fn fetch(&self, file: &str) -> Result<Vec<Question>, CorpusError>;
}

/// Parse the contents of one bank file: a JSON array of question records.
pub fn parse_partition(bytes: &[u8], partition: &str) -> Result<Vec<Question>, CorpusError> {
    serde_json::from_slice(bytes).map_err(|e| CorpusError::Parse {
        partition: partition.to_string(),
        message: e.to_string(),
    })
}
