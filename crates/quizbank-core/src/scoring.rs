//! Score aggregation over a finished quiz.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::grader;
use crate::model::{Question, Theme};

/// Placeholder shown for an unanswered question.
pub const NO_ANSWER: &str = "(no answer)";

/// Correct/total counts for one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeScore {
    pub theme: Theme,
    pub correct: usize,
    pub total: usize,
}

/// A question that was answered incorrectly or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongEntry {
    pub question_id: String,
    pub theme: Theme,
    pub question: String,
    /// The submitted answer, `None` when the question was left unanswered.
    pub user_answer: Option<Vec<String>>,
    pub correct_answer: Vec<String>,
    pub explanation: String,
}

impl WrongEntry {
    pub fn user_answer_text(&self) -> String {
        match &self.user_answer {
            Some(answer) if !answer.join(", ").is_empty() => answer.join(", "),
            _ => NO_ANSWER.to_string(),
        }
    }

    pub fn correct_answer_text(&self) -> String {
        self.correct_answer.join(", ")
    }
}

/// Overall and per-theme results of one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total_correct: usize,
    pub total_questions: usize,
    /// One entry per theme, in order of first appearance in the quiz.
    pub per_theme: Vec<ThemeScore>,
    /// Every missed question, in quiz order.
    pub wrong_entries: Vec<WrongEntry>,
}

impl ScoreReport {
    pub fn theme(&self, theme: &Theme) -> Option<&ThemeScore> {
        self.per_theme.iter().find(|s| &s.theme == theme)
    }

    /// Share of correct answers, in percent.
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.total_correct as f64 * 100.0 / self.total_questions as f64
    }
}

/// Grade every question against its recorded answer and tally the results.
///
/// A question without an entry in `answers` is graded against an empty
/// answer. The function has no side effects, so it can be called again on
/// the same state.
pub fn aggregate(
    questions: &[Arc<Question>],
    answers: &HashMap<String, Vec<String>>,
) -> ScoreReport {
    let mut per_theme: Vec<ThemeScore> = Vec::new();
    let mut wrong_entries = Vec::new();
    let mut total_correct = 0usize;

    for question in questions {
        let recorded = answers.get(&question.id);
        let answer = recorded.map(Vec::as_slice).unwrap_or(&[]);
        let correct = grader::is_correct(question, answer);

        let idx = match per_theme.iter().position(|s| s.theme == question.theme) {
            Some(idx) => idx,
            None => {
                per_theme.push(ThemeScore {
                    theme: question.theme.clone(),
                    correct: 0,
                    total: 0,
                });
                per_theme.len() - 1
            }
        };
        let bucket = &mut per_theme[idx];
        bucket.total += 1;

        if correct {
            bucket.correct += 1;
            total_correct += 1;
        } else {
            wrong_entries.push(WrongEntry {
                question_id: question.id.clone(),
                theme: question.theme.clone(),
                question: question.text.clone(),
                // A blank submission is reported as no answer.
                user_answer: recorded
                    .filter(|a| a.iter().any(|s| !s.trim().is_empty()))
                    .cloned(),
                correct_answer: question.answers.clone(),
                explanation: question.explanation.clone(),
            });
        }
    }

    ScoreReport {
        total_correct,
        total_questions: questions.len(),
        per_theme,
        wrong_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, QuestionType};

    fn question(id: &str, theme: Theme, kind: QuestionType, answers: &[&str]) -> Arc<Question> {
        Arc::new(Question {
            id: id.into(),
            theme,
            level: Level::Debutant,
            kind,
            text: format!("question {id}"),
            options: vec![],
            answers: answers.iter().map(|s| s.to_string()).collect(),
            explanation: format!("because {id}"),
        })
    }

    fn quiz() -> Vec<Arc<Question>> {
        vec![
            question("h1", Theme::Html, QuestionType::SingleChoice, &["<p>"]),
            question("s1", Theme::Databases, QuestionType::FreeText, &["SELECT 1;"]),
            question("h2", Theme::Html, QuestionType::MultipleChoice, &["a", "b"]),
            question("x1", Theme::Php, QuestionType::Unknown("oral".into()), &["?"]),
        ]
    }

    #[test]
    fn aggregate_counts_per_theme_and_wrong_entries() {
        let questions = quiz();
        let mut answers = HashMap::new();
        answers.insert("h1".to_string(), vec!["<p>".to_string()]);
        answers.insert("s1".to_string(), vec!["select 1".to_string()]);
        answers.insert("h2".to_string(), vec!["a".to_string()]);

        let report = aggregate(&questions, &answers);
        assert_eq!(report.total_questions, 4);
        assert_eq!(report.total_correct, 2);

        let themes: Vec<&Theme> = report.per_theme.iter().map(|s| &s.theme).collect();
        assert_eq!(themes, vec![&Theme::Html, &Theme::Databases, &Theme::Php]);
        assert_eq!(
            report.theme(&Theme::Html),
            Some(&ThemeScore { theme: Theme::Html, correct: 1, total: 2 })
        );

        assert_eq!(report.wrong_entries.len(), 2);
        let h2 = &report.wrong_entries[0];
        assert_eq!(h2.question_id, "h2");
        assert_eq!(h2.user_answer_text(), "a");
        assert_eq!(h2.correct_answer_text(), "a, b");
        assert_eq!(h2.explanation, "because h2");

        let unanswered = &report.wrong_entries[1];
        assert_eq!(unanswered.question_id, "x1");
        assert_eq!(unanswered.user_answer, None);
        assert_eq!(unanswered.user_answer_text(), NO_ANSWER);
    }

    #[test]
    fn totals_match_per_theme_sums() {
        let questions = quiz();
        let report = aggregate(&questions, &HashMap::new());

        let total: usize = report.per_theme.iter().map(|s| s.total).sum();
        let correct: usize = report.per_theme.iter().map(|s| s.correct).sum();
        assert_eq!(total, report.total_questions);
        assert_eq!(correct, report.total_correct);
        assert_eq!(report.wrong_entries.len(), 4);
        assert_eq!(report.percentage(), 0.0);
    }

    #[test]
    fn empty_recorded_answer_is_reported_as_no_answer() {
        let questions = quiz();
        let mut answers = HashMap::new();
        answers.insert("h1".to_string(), Vec::new());
        answers.insert("s1".to_string(), vec!["  ".to_string()]);

        let report = aggregate(&questions, &answers);
        let h1 = &report.wrong_entries[0];
        assert_eq!(h1.question_id, "h1");
        assert_eq!(h1.user_answer, None);
        assert_eq!(h1.user_answer_text(), NO_ANSWER);
        assert_eq!(report.wrong_entries[1].user_answer, None);

        let stored = WrongEntry {
            user_answer: Some(Vec::new()),
            ..h1.clone()
        };
        assert_eq!(stored.user_answer_text(), NO_ANSWER);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let questions = quiz();
        let mut answers = HashMap::new();
        answers.insert("h1".to_string(), vec!["<p>".to_string()]);

        let first = aggregate(&questions, &answers);
        let second = aggregate(&questions, &answers);
        assert_eq!(first, second);
        assert!((first.percentage() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let report = aggregate(&[], &HashMap::new());
        assert_eq!(report.total_questions, 0);
        assert!(report.per_theme.is_empty());
        assert_eq!(report.percentage(), 0.0);
    }
}
