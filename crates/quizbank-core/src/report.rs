//! Session report: the score of a finished quiz plus what was asked for,
//! with JSON export.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{LevelMode, QuizConfig, Theme};
use crate::scoring::ScoreReport;
use crate::session::QuizSession;

/// Everything shown on the results screen of one attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Identifier of the session this report was produced from.
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub quiz: QuizSummary,
    pub score: ScoreReport,
    /// Wall-clock time spent on the quiz, in seconds.
    pub elapsed_secs: u64,
    /// Number of skip operations performed.
    pub skipped: usize,
}

/// What the quiz was composed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub themes: Vec<Theme>,
    /// `None` when the questions were not composed by quizbank (e.g. graded
    /// from an answers file).
    pub level: Option<LevelMode>,
    pub requested: usize,
    pub delivered: usize,
}

impl SessionReport {
    /// Score `session` and wrap the result.
    pub fn from_session(session: &QuizSession, config: &QuizConfig, elapsed: Duration) -> Self {
        Self {
            id: session.id(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                themes: config.themes.clone(),
                level: Some(config.level),
                requested: config.length,
                delivered: session.len(),
            },
            score: session.score(),
            elapsed_secs: elapsed.as_secs(),
            skipped: session.skip_count(),
        }
    }

    /// Wrap a score computed outside of a live session.
    pub fn from_score(score: ScoreReport) -> Self {
        let themes = score.per_theme.iter().map(|s| s.theme.clone()).collect();
        let delivered = score.total_questions;
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                themes,
                level: None,
                requested: delivered,
                delivered,
            },
            score,
            elapsed_secs: 0,
            skipped: 0,
        }
    }

    /// Elapsed time as `mm:ss`.
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

/// Format seconds as zero-padded `mm:ss`. Minutes keep growing past 59.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
