//! Quiz error types.
//!
//! A composition that comes up short is not an error: see
//! [`crate::composer::Shortfall`].

use thiserror::Error;

use crate::model::LevelMode;

/// Errors raised while configuring, composing, or driving a quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    /// No question in the pool matches the configuration.
    #[error("no questions found for themes [{themes}] at level {level}")]
    EmptyComposition { themes: String, level: LevelMode },

    /// The configuration itself is unusable.
    #[error("invalid quiz configuration: {0}")]
    InvalidConfig(String),

    /// A session was started with an empty question list.
    #[error("cannot start a quiz without questions")]
    EmptySession,

    /// Every remaining question has already been skipped past.
    #[error("no question left to skip to")]
    SkipUnavailable,
}
