//! The `quizbank compose` command.

use anyhow::Result;

use quizbank_core::composer::compose;
use quizbank_core::model::Question;

use super::{load_pool, QuizArgs};

pub async fn execute(args: QuizArgs, format: String) -> Result<()> {
    let mut setup = args.resolve()?;
    let pool = load_pool(&setup.config, &setup.config.themes).await?;

    let composition = compose(&pool, &setup.quiz, &mut setup.rng)?;
    if let Some(shortfall) = composition.shortfall() {
        eprintln!("Warning: {shortfall}");
    }

    match format.as_str() {
        "json" => {
            let questions: Vec<&Question> =
                composition.questions().iter().map(|q| q.as_ref()).collect();
            let output = serde_json::json!({
                "themes": setup.quiz.themes,
                "level": setup.quiz.level,
                "requested": composition.requested(),
                "questions": questions,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            println!(
                "{} of {} questions (level {})",
                composition.len(),
                composition.requested(),
                setup.quiz.level
            );
            for (i, question) in composition.questions().iter().enumerate() {
                let first_line = question.text.lines().next().unwrap_or_default();
                println!(
                    "{:>3}. {:<10} {:<16} {:<13} {}",
                    i + 1,
                    question.id,
                    question.theme.label(),
                    question.level.as_str(),
                    first_line
                );
            }
        }
        other => anyhow::bail!("unknown format '{other}': expected text or json"),
    }

    Ok(())
}
