//! Corpus loading: fetch every bank, then build the pool.

use futures::future::try_join_all;

use quizbank_core::pool::QuestionPool;

use crate::config::ThemeFile;
use crate::error::CorpusError;
use crate::source::BankSource;

/// Fetch all `themes` from `source` concurrently and build a pool from them.
///
/// All or nothing: the first failing bank aborts the load and is reported
/// as [`CorpusError::Partition`]. On success the banks are merged in the
/// order of `themes`, so duplicates resolve to the earliest bank.
pub async fn load_corpus(
    source: &dyn BankSource,
    themes: &[ThemeFile],
) -> Result<QuestionPool, CorpusError> {
    let fetches = themes.iter().map(|theme| async move {
        source
            .fetch(&theme.file)
            .await
            .map_err(|e| CorpusError::Partition {
                partition: theme.file.clone(),
                source: Box::new(e),
            })
    });

    let banks = match try_join_all(fetches).await {
        Ok(banks) => banks,
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "corpus load aborted");
            return Err(e);
        }
    };

    let pool = QuestionPool::build(banks);
    tracing::info!(
        source = source.name(),
        banks = themes.len(),
        questions = pool.len(),
        "corpus loaded"
    );
    Ok(pool)
}
