//! Quiz composition: choosing and ordering the questions of one attempt.
//!
//! `mixte` draws from the three level buckets with a fixed 50/30/20 split.
//! A single level interleaves the selected themes round-robin so no theme
//! dominates. Neither policy backfills a short bucket or theme from another
//! one; the caller is told about the shortfall instead.
//!
//! Randomness is always supplied by the caller, so a seeded generator makes
//! composition reproducible.

use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Level, Question, QuizConfig, Theme};
use crate::pool::QuestionPool;

/// Target number of questions per level for a `mixte` quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixSplit {
    pub debutant: usize,
    pub intermediaire: usize,
    pub avance: usize,
}

impl MixSplit {
    /// 50% beginner and 30% intermediate, each rounded half-up; advanced
    /// absorbs the remainder so the parts always sum to `length`.
    pub fn for_length(length: usize) -> Self {
        let debutant = round_tenths(length, 5);
        let intermediaire = round_tenths(length, 3);
        Self {
            debutant,
            intermediaire,
            avance: length.saturating_sub(debutant + intermediaire),
        }
    }

    pub fn total(&self) -> usize {
        self.debutant + self.intermediaire + self.avance
    }

    fn parts(&self) -> [(Level, usize); 3] {
        [
            (Level::Debutant, self.debutant),
            (Level::Intermediaire, self.intermediaire),
            (Level::Avance, self.avance),
        ]
    }
}

/// `length * tenths / 10`, rounded half-up in integer arithmetic.
fn round_tenths(length: usize, tenths: usize) -> usize {
    (length * tenths + 5) / 10
}

/// Fewer questions were available than requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub requested: usize,
    pub available: usize,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "only {} of the {} requested questions are available",
            self.available, self.requested
        )
    }
}

/// The ordered questions of one quiz attempt.
#[derive(Debug, Clone)]
pub struct Composition {
    questions: Vec<Arc<Question>>,
    requested: usize,
}

impl Composition {
    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Arc<Question>> {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    /// `Some` when fewer questions than requested could be selected.
    pub fn shortfall(&self) -> Option<Shortfall> {
        (self.questions.len() < self.requested).then_some(Shortfall {
            requested: self.requested,
            available: self.questions.len(),
        })
    }
}

/// Compose a quiz from `pool` according to `config`.
///
/// Fails with [`QuizError::EmptyComposition`] when nothing matches; a partial
/// result is returned as a [`Composition`] whose [`Composition::shortfall`]
/// is set.
pub fn compose<R: Rng + ?Sized>(
    pool: &QuestionPool,
    config: &QuizConfig,
    rng: &mut R,
) -> Result<Composition, QuizError> {
    let mut questions = match config.level.level() {
        None => compose_mixed(pool, config, rng),
        Some(level) => compose_single_level(pool, config, &level, rng),
    };

    if questions.is_empty() {
        return Err(QuizError::EmptyComposition {
            themes: config
                .themes
                .iter()
                .map(Theme::label)
                .collect::<Vec<_>>()
                .join(", "),
            level: config.level,
        });
    }

    // Hide the bucket/theme clustering left by construction.
    questions.shuffle(rng);

    let composition = Composition {
        questions,
        requested: config.length,
    };
    match composition.shortfall() {
        Some(shortfall) => tracing::warn!(
            requested = shortfall.requested,
            available = shortfall.available,
            level = %config.level,
            "quiz composed with fewer questions than requested"
        ),
        None => tracing::debug!(
            count = composition.len(),
            level = %config.level,
            "quiz composed"
        ),
    }
    Ok(composition)
}

fn compose_mixed<R: Rng + ?Sized>(
    pool: &QuestionPool,
    config: &QuizConfig,
    rng: &mut R,
) -> Vec<Arc<Question>> {
    let split = MixSplit::for_length(config.length);
    let mut selected = Vec::with_capacity(split.total());

    for (level, count) in split.parts() {
        let mut bucket = pool.filter(&config.themes, Some(&level));
        bucket.shuffle(rng);
        bucket.truncate(count);
        selected.extend(bucket);
    }

    selected
}

fn compose_single_level<R: Rng + ?Sized>(
    pool: &QuestionPool,
    config: &QuizConfig,
    level: &Level,
    rng: &mut R,
) -> Vec<Arc<Question>> {
    let matching = pool.filter(&config.themes, Some(level));

    let mut seen: Vec<&Theme> = Vec::new();
    let mut by_theme: Vec<Vec<Arc<Question>>> = Vec::new();
    for theme in &config.themes {
        if seen.contains(&theme) {
            continue;
        }
        seen.push(theme);

        let mut items: Vec<Arc<Question>> = matching
            .iter()
            .filter(|q| &q.theme == theme)
            .cloned()
            .collect();
        items.shuffle(rng);
        by_theme.push(items);
    }

    let mut selected = Vec::with_capacity(config.length);
    let mut round = 0;
    while selected.len() < config.length {
        let mut added = false;
        for items in &by_theme {
            if selected.len() >= config.length {
                break;
            }
            if let Some(question) = items.get(round) {
                selected.push(Arc::clone(question));
                added = true;
            }
        }
        if !added {
            break;
        }
        round += 1;
    }

    selected
}
