//! State of one quiz attempt: question order, cursor, answers, skips.
//!
//! All mutation goes through `&mut self` methods triggered by discrete user
//! actions, so a session can be driven and inspected without any UI.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::composer::Composition;
use crate::error::QuizError;
use crate::model::Question;
use crate::scoring::{self, ScoreReport};

/// Result of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor moved to the next question.
    Moved,
    /// The cursor was already on the last question; the quiz is over.
    Finished,
}

/// One quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    questions: Vec<Arc<Question>>,
    answers: HashMap<String, Vec<String>>,
    cursor: usize,
    skip_count: usize,
}

impl QuizSession {
    pub fn new(questions: Vec<Arc<Question>>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptySession);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            questions,
            answers: HashMap::new(),
            cursor: 0,
            skip_count: 0,
        })
    }

    pub fn from_composition(composition: Composition) -> Result<Self, QuizError> {
        Self::new(composition.into_questions())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current(&self) -> &Arc<Question> {
        &self.questions[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    /// "Question i / n", 1-based.
    pub fn progress(&self) -> String {
        format!("Question {} / {}", self.cursor + 1, self.questions.len())
    }

    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<String, Vec<String>> {
        &self.answers
    }

    pub fn answer_for(&self, id: &str) -> Option<&[String]> {
        self.answers.get(id).map(Vec::as_slice)
    }

    pub fn skip_count(&self) -> usize {
        self.skip_count
    }

    /// Record the answer to the current question, replacing any earlier one.
    ///
    /// Typed answers are trimmed and only the first entry is kept. An empty
    /// answer clears the entry, leaving the question unanswered.
    pub fn save_answer(&mut self, answer: Vec<String>) {
        let question = &self.questions[self.cursor];
        let answer: Vec<String> = if question.kind.is_typed() {
            answer
                .into_iter()
                .take(1)
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .collect()
        } else {
            answer
        };

        if answer.is_empty() {
            self.answers.remove(&question.id);
        } else {
            self.answers.insert(question.id.clone(), answer);
        }
    }

    /// Move to the next question, or report that the last one was reached.
    pub fn advance(&mut self) -> Step {
        if self.is_last() {
            Step::Finished
        } else {
            self.cursor += 1;
            Step::Moved
        }
    }

    /// Move to the previous question. Returns `false` on the first question.
    pub fn go_back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Skipping stays available while more questions remain ahead than have
    /// already been pushed to the back.
    pub fn can_skip(&self) -> bool {
        self.questions.len() - self.cursor > self.skip_count + 1
    }

    /// Move the current question to the end of the quiz. The cursor stays put,
    /// so the following question takes its place.
    pub fn skip(&mut self) -> Result<(), QuizError> {
        if !self.can_skip() {
            return Err(QuizError::SkipUnavailable);
        }
        let question = self.questions.remove(self.cursor);
        tracing::debug!(id = %question.id, skips = self.skip_count + 1, "question requeued");
        self.questions.push(question);
        self.skip_count += 1;
        Ok(())
    }

    /// Grade the session in its current state.
    pub fn score(&self) -> ScoreReport {
        scoring::aggregate(&self.questions, &self.answers)
    }
}
