//! Question banks served as static files over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use quizbank_core::model::Question;

use crate::error::CorpusError;
use crate::source::{parse_partition, BankSource};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GETs `<base_url>/<file>` for each requested bank.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, CorpusError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CorpusError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BankSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, file: &str) -> Result<Vec<Question>, CorpusError> {
        let url = format!("{}/{}", self.base_url, file);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                CorpusError::Network(format!(
                    "request to {url} timed out after {DEFAULT_TIMEOUT_SECS}s"
                ))
            } else if e.is_connect() {
                CorpusError::Network(format!("{} not reachable", self.base_url))
            } else {
                CorpusError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CorpusError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CorpusError::Network(format!("failed to read body of {url}: {e}")))?;
        let questions = parse_partition(&bytes, file)?;
        tracing::debug!(count = questions.len(), "bank downloaded");
        Ok(questions)
    }
}
