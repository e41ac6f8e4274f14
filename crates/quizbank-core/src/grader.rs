//! Answer grading.
//!
//! Choice questions compare the selected options with the accepted answers
//! as multisets: order does not matter, case and count do. Typed questions
//! compare a normalized form of the text with each accepted answer, so that
//! `select * from t` and `SELECT * FROM t;` are the same answer.

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionType};

/// Outcome of grading a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The question type has no grading rule. Scored as incorrect.
    Ungradable,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

/// Grade `answer` against `question`.
pub fn grade(question: &Question, answer: &[String]) -> Verdict {
    let correct = match &question.kind {
        QuestionType::SingleChoice | QuestionType::MultipleChoice => {
            choices_match(&question.answers, answer)
        }
        QuestionType::InputField | QuestionType::FreeText => {
            typed_answer_matches(&question.answers, answer)
        }
        QuestionType::Unknown(kind) => {
            tracing::warn!(id = %question.id, %kind, "no grading rule for question type, counting as incorrect");
            return Verdict::Ungradable;
        }
    };

    if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Shorthand for `grade(question, answer).is_correct()`.
pub fn is_correct(question: &Question, answer: &[String]) -> bool {
    grade(question, answer).is_correct()
}

/// Canonical form of a typed answer: every whitespace character removed, one
/// trailing `;` stripped, then lower-cased.
pub fn normalize_free_text(text: &str) -> String {
    let compact: String = text.chars().filter(|&c| !is_blank(c)).collect();
    compact
        .strip_suffix(';')
        .unwrap_or(compact.as_str())
        .to_lowercase()
}

/// Unicode `White_Space` without NEL (U+0085), plus the byte order mark.
/// Bank answers are compared under this set, not `char::is_whitespace`.
fn is_blank(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn choices_match(accepted: &[String], submitted: &[String]) -> bool {
    if accepted.len() != submitted.len() {
        return false;
    }
    let mut accepted: Vec<&str> = accepted.iter().map(String::as_str).collect();
    let mut submitted: Vec<&str> = submitted.iter().map(String::as_str).collect();
    accepted.sort_unstable();
    submitted.sort_unstable();
    accepted == submitted
}

fn typed_answer_matches(accepted: &[String], submitted: &[String]) -> bool {
    let Some(text) = submitted.first() else {
        return false;
    };
    if text.trim().is_empty() {
        return false;
    }
    let candidate = normalize_free_text(text);
    accepted
        .iter()
        .any(|expected| normalize_free_text(expected) == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, Theme};

    fn question(kind: QuestionType, answers: &[&str]) -> Question {
        Question {
            id: "q".into(),
            theme: Theme::Databases,
            level: Level::Debutant,
            kind,
            text: String::new(),
            options: vec!["A".into(), "B".into(), "C".into()],
            answers: answers.iter().map(|s| s.to_string()).collect(),
            explanation: String::new(),
        }
    }

    fn answer(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn free_text_normalization_equivalence() {
        let q = question(QuestionType::FreeText, &["SELECT * FROM t;"]);
        assert!(is_correct(&q, &answer(&["select * from t"])));
        assert!(is_correct(&q, &answer(&[" SELECT*FROM T ; "])));
        assert!(is_correct(&q, &answer(&["SELECT * FROM t;"])));
        assert!(!is_correct(&q, &answer(&["SELECT * FROM t2;"])));
        assert!(!is_correct(&q, &[]));
        assert!(!is_correct(&q, &answer(&["   "])));
    }

    #[test]
    fn normalization_whitespace_set() {
        assert_eq!(normalize_free_text("\u{feff}a\u{a0}b\u{3000}c;"), "abc");
        assert_eq!(normalize_free_text("a\u{85}b"), "a\u{85}b");
        assert_eq!(normalize_free_text("A\t\r\nB ;"), "ab");
    }

    #[test]
    fn typed_answer_matches_any_accepted_form() {
        let q = question(QuestionType::InputField, &["display: none", "visibility:hidden"]);
        assert!(is_correct(&q, &answer(&["Visibility: Hidden;"])));
        assert!(is_correct(&q, &answer(&["display:none"])));
        assert!(!is_correct(&q, &answer(&["opacity: 0"])));
    }

    #[test]
    fn only_one_trailing_semicolon_is_stripped() {
        assert_eq!(normalize_free_text("a;;"), "a;");
        assert_eq!(normalize_free_text("\tFoo ( ) ;\n"), "foo()");
        assert_eq!(normalize_free_text(";"), "");
    }

    #[test]
    fn multiple_choice_is_order_independent_and_cardinality_sensitive() {
        let q = question(QuestionType::MultipleChoice, &["A", "B"]);
        assert!(is_correct(&q, &answer(&["B", "A"])));
        assert!(!is_correct(&q, &answer(&["A"])));
        assert!(!is_correct(&q, &answer(&["A", "B", "C"])));
        assert!(!is_correct(&q, &answer(&["A", "A"])));
    }

    #[test]
    fn choice_comparison_is_case_sensitive() {
        let q = question(QuestionType::SingleChoice, &["A"]);
        assert!(is_correct(&q, &answer(&["A"])));
        assert!(!is_correct(&q, &answer(&["a"])));
        assert!(!is_correct(&q, &[]));
    }

    #[test]
    fn unknown_type_is_ungradable() {
        let q = question(QuestionType::Unknown("vrai_faux".into()), &["vrai"]);
        assert_eq!(grade(&q, &answer(&["vrai"])), Verdict::Ungradable);
        assert!(!is_correct(&q, &answer(&["vrai"])));
    }

    #[test]
    fn grading_is_repeatable() {
        let q = question(QuestionType::FreeText, &["SELECT 1;"]);
        let a = answer(&["select 1"]);
        let first = grade(&q, &a);
        for _ in 0..10 {
            assert_eq!(grade(&q, &a), first);
        }
    }
}
