//! The `quizbank grade` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use quizbank_core::model::Question;
use quizbank_core::pool::QuestionPool;
use quizbank_core::report::SessionReport;
use quizbank_core::scoring::aggregate;
use quizbank_corpus::config::load_config_from;
use quizbank_report::html::write_html_report;
use quizbank_report::markdown::generate_markdown;

use super::{load_pool, print_results};

/// Answers recorded outside of `quizbank play`.
#[derive(Debug, Deserialize)]
struct AnswerSheet {
    /// Question ids, in quiz order.
    questions: Vec<String>,
    /// Submitted answers by question id. Missing ids are unanswered.
    #[serde(default)]
    answers: HashMap<String, Vec<String>>,
}

impl AnswerSheet {
    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answers: {}", path.display()))
    }

    /// Look up every listed question in `pool`.
    fn resolve(&self, pool: &QuestionPool) -> Result<Vec<Arc<Question>>> {
        self.questions
            .iter()
            .map(|id| {
                pool.get(id)
                    .cloned()
                    .with_context(|| format!("unknown question id '{id}'"))
            })
            .collect()
    }
}

pub async fn execute(
    answers_path: PathBuf,
    format: String,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let sheet = AnswerSheet::load(&answers_path)?;
    let config = load_config_from(config_path.as_deref())?;
    let pool = load_pool(&config, &config.themes).await?;

    let questions = sheet.resolve(&pool)?;
    let extra = sheet
        .answers
        .keys()
        .filter(|id| !sheet.questions.contains(id))
        .count();
    if extra > 0 {
        tracing::warn!(count = extra, "ignoring answers to questions not in the list");
    }

    let report = SessionReport::from_score(aggregate(&questions, &sheet.answers));

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", generate_markdown(&report)),
        "text" => print_results(&report),
        other => anyhow::bail!("unknown format '{other}': expected text, json or markdown"),
    }

    if let Some(path) = html {
        write_html_report(&report, &path)?;
        eprintln!("HTML report: {}", path.display());
    }

    Ok(())
}
