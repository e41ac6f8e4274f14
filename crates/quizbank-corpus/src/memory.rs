//! In-memory source for tests and embedded corpora.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quizbank_core::model::Question;

use crate::error::CorpusError;
use crate::source::BankSource;

/// Serves preloaded banks by name. Unknown names fail with
/// [`CorpusError::NotFound`].
#[derive(Default)]
pub struct MemorySource {
    banks: HashMap<String, Vec<Question>>,
    fetch_count: AtomicU32,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the bank stored under `file`.
    pub fn with_bank(mut self, file: &str, questions: Vec<Question>) -> Self {
        self.banks.insert(file.to_string(), questions);
        self
    }

    /// Number of fetches served so far, failed ones included.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BankSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, file: &str) -> Result<Vec<Question>, CorpusError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.banks
            .get(file)
            .cloned()
            .ok_or_else(|| CorpusError::NotFound(file.to_string()))
    }
}
