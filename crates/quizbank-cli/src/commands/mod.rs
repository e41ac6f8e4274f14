//! Subcommands, plus the setup they share.

pub mod compose;
pub mod grade;
pub mod init;
pub mod play;
pub mod themes;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizbank_core::model::{LevelMode, QuizConfig};
use quizbank_core::pool::QuestionPool;
use quizbank_core::report::SessionReport;
use quizbank_corpus::config::load_config_from;
use quizbank_corpus::{create_source, load_corpus, QuizbankConfig, ThemeFile};

/// Options shared by every command that composes a quiz.
#[derive(Debug, Args)]
pub struct QuizArgs {
    /// Themes to include, comma-separated (default: every configured theme)
    #[arg(long)]
    pub themes: Option<String>,

    /// Level: mixte, debutant, intermediaire, avance
    #[arg(long)]
    pub level: Option<String>,

    /// Length: courte, moyenne, longue, or a number of questions
    #[arg(long)]
    pub length: Option<String>,

    /// Seed for a reproducible quiz
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Everything needed to compose a quiz.
pub struct QuizSetup {
    pub config: QuizbankConfig,
    /// Selected themes, in selection order. The pool is still built from
    /// every configured bank so duplicate ids resolve the same way whatever
    /// the selection.
    pub banks: Vec<ThemeFile>,
    pub quiz: QuizConfig,
    pub rng: StdRng,
}

impl QuizArgs {
    pub fn resolve(&self) -> Result<QuizSetup> {
        let config = load_config_from(self.config.as_deref())?;

        let banks = match &self.themes {
            Some(list) => config.select_themes(list)?,
            None => config.themes.clone(),
        };
        let level = match &self.level {
            Some(level) => level.parse::<LevelMode>().map_err(anyhow::Error::msg)?,
            None => config.default_level,
        };
        let length =
            config.resolve_length(self.length.as_deref().unwrap_or(config.default_length.as_str()))?;
        let quiz = QuizConfig::new(banks.iter().map(|b| b.name.clone()), level, length)?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(QuizSetup {
            config,
            banks,
            quiz,
            rng,
        })
    }
}

/// Load `banks` from the configured source, merged in the order given.
pub async fn load_pool(config: &QuizbankConfig, banks: &[ThemeFile]) -> Result<QuestionPool> {
    let source = create_source(&config.source)?;
    let pool = load_corpus(source.as_ref(), banks)
        .await
        .context("failed to load the question banks")?;
    tracing::debug!(questions = pool.len(), "question banks loaded");
    Ok(pool)
}

/// Print a score the way the results screen shows it.
pub fn print_results(report: &SessionReport) {
    use comfy_table::{Cell, Table};

    let score = &report.score;
    println!(
        "Score: {} / {} ({:.1}%)",
        score.total_correct,
        score.total_questions,
        score.percentage()
    );
    if report.elapsed_secs > 0 {
        println!("Finished in {}", report.elapsed_display());
    }

    let mut table = Table::new();
    table.set_header(vec!["Theme", "Correct", "Total"]);
    for theme in &score.per_theme {
        table.add_row(vec![
            Cell::new(theme.theme.label()),
            Cell::new(theme.correct),
            Cell::new(theme.total),
        ]);
    }
    println!("\n{table}");

    if score.wrong_entries.is_empty() {
        println!("\nNo mistakes.");
        return;
    }

    println!("\nMistakes:");
    for (i, entry) in score.wrong_entries.iter().enumerate() {
        println!("\n  {}. [{}] {}", i + 1, entry.theme, entry.question);
        println!("     Your answer:    {}", entry.user_answer_text());
        println!("     Correct answer: {}", entry.correct_answer_text());
        if !entry.explanation.is_empty() {
            println!("     {}", entry.explanation);
        }
    }
}
