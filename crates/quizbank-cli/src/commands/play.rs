//! The `quizbank play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use quizbank_core::composer::compose;
use quizbank_core::model::{Question, QuestionType};
use quizbank_core::report::SessionReport;
use quizbank_core::session::{QuizSession, Step};
use quizbank_report::html::write_html_report;

use super::{load_pool, print_results, QuizArgs};

/// How an interactive run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The last question was answered.
    Completed,
    /// The player quit, or input ran out.
    Abandoned,
}

pub async fn execute(args: QuizArgs, html: Option<PathBuf>, json: Option<PathBuf>) -> Result<()> {
    let mut setup = args.resolve()?;
    let pool = load_pool(&setup.config, &setup.config.themes).await?;

    let composition = compose(&pool, &setup.quiz, &mut setup.rng)?;
    if let Some(shortfall) = composition.shortfall() {
        eprintln!("Warning: {shortfall}");
    }
    let mut session = QuizSession::from_composition(composition)?;
    tracing::info!(session = %session.id(), questions = session.len(), "quiz started");

    println!(
        "{} questions | {} | level {}",
        session.len(),
        setup
            .banks
            .iter()
            .map(|b| b.name.label())
            .collect::<Vec<_>>()
            .join(", "),
        setup.quiz.level
    );
    println!("Commands: :prev, :skip, :quit. An empty line leaves the question unanswered.\n");

    let started = Instant::now();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = run_session(&mut session, stdin.lock(), stdout.lock())?;

    if outcome == Outcome::Abandoned {
        println!("\nQuiz abandoned.");
        return Ok(());
    }

    let report = SessionReport::from_session(&session, &setup.quiz, started.elapsed());
    println!();
    print_results(&report);

    if let Some(path) = html {
        write_html_report(&report, &path)?;
        eprintln!("HTML report: {}", path.display());
    }
    if let Some(path) = json {
        report.save_json(&path)?;
        eprintln!("JSON report: {}", path.display());
    }

    Ok(())
}

/// Drive `session` from line-based input until it completes or is abandoned.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut QuizSession,
    mut input: R,
    mut out: W,
) -> Result<Outcome> {
    loop {
        render_question(session, &mut out)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Outcome::Abandoned);
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match line.trim() {
            ":quit" | ":q" => return Ok(Outcome::Abandoned),
            ":prev" | ":p" => {
                if !session.go_back() {
                    writeln!(out, "Already on the first question.")?;
                }
            }
            ":skip" | ":s" => {
                if session.skip().is_err() {
                    writeln!(out, "Skipping is no longer available.")?;
                }
            }
            _ => match parse_answer(session.current(), line) {
                Ok(answer) => {
                    session.save_answer(answer);
                    if session.advance() == Step::Finished {
                        return Ok(Outcome::Completed);
                    }
                }
                Err(msg) => writeln!(out, "{msg}")?,
            },
        }
    }
}

fn render_question<W: Write>(session: &QuizSession, out: &mut W) -> Result<()> {
    let question = session.current();
    let skip = if session.can_skip() { "  (:skip)" } else { "" };

    writeln!(
        out,
        "\n{}  [{} | {}]{skip}",
        session.progress(),
        question.theme,
        question.level.as_str()
    )?;
    writeln!(out, "{}", question.text.replace("```", ""))?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}) {option}", i + 1)?;
    }

    let hint = match question.kind {
        QuestionType::SingleChoice => "Pick one option number.",
        QuestionType::MultipleChoice => "Pick one or more option numbers, e.g. 1,3.",
        _ => "Type your answer.",
    };
    writeln!(out, "{hint}")?;

    if let Some(answer) = session.answer_for(&question.id) {
        writeln!(out, "Current answer: {}", answer.join(", "))?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Turn an input line into an answer for `question`.
///
/// Choice questions take 1-based option numbers separated by commas or
/// spaces. Other questions take the line as typed.
fn parse_answer(question: &Question, line: &str) -> Result<Vec<String>, String> {
    if !question.kind.is_choice() {
        return Ok(vec![line.to_string()]);
    }

    let mut picked: Vec<String> = Vec::new();
    for token in line.split([',', ' ']).filter(|t| !t.is_empty()) {
        let option = token
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| question.options.get(idx))
            .ok_or_else(|| {
                format!(
                    "Enter option numbers between 1 and {}.",
                    question.options.len()
                )
            })?;
        if !picked.contains(option) {
            picked.push(option.clone());
        }
    }

    if question.kind == QuestionType::SingleChoice && picked.len() > 1 {
        return Err("Pick a single option.".to_string());
    }
    Ok(picked)
}
