//! The deduplicated question corpus.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Level, Question, Theme};

/// All questions of a loaded corpus, unique by id, in source order.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    questions: Vec<Arc<Question>>,
    by_id: HashMap<String, usize>,
}

impl QuestionPool {
    /// Flatten the partitions in order, keeping the first question seen for
    /// each id. Records are not validated.
    pub fn build<I, P>(partitions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = Question>,
    {
        let mut questions = Vec::new();
        let mut by_id = HashMap::new();
        let mut duplicates = 0usize;

        for question in partitions.into_iter().flatten() {
            if by_id.contains_key(&question.id) {
                tracing::debug!(id = %question.id, "dropping duplicate question");
                duplicates += 1;
                continue;
            }
            by_id.insert(question.id.clone(), questions.len());
            questions.push(Arc::new(question));
        }

        tracing::debug!(unique = questions.len(), duplicates, "question pool built");
        Self { questions, by_id }
    }

    /// Questions whose theme is one of `themes` and, when given, whose level
    /// equals `level`. Pool order is preserved.
    pub fn filter(&self, themes: &[Theme], level: Option<&Level>) -> Vec<Arc<Question>> {
        self.questions
            .iter()
            .filter(|q| themes.contains(&q.theme))
            .filter(|q| level.map_or(true, |l| &q.level == l))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Question>> {
        self.by_id.get(id).map(|&idx| &self.questions[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Question>> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions tagged with both `theme` and `level`.
    pub fn count_by(&self, theme: &Theme, level: &Level) -> usize {
        self.questions
            .iter()
            .filter(|q| &q.theme == theme && &q.level == level)
            .count()
    }
}
