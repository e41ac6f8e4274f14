//! Question pool, quiz composition, grading, and scoring.
//!
//! Everything in this crate is synchronous and free of I/O apart from
//! report export: callers hand in a loaded corpus, a configuration, and a
//! random source, and get back a composed quiz and later a score.

pub mod composer;
pub mod error;
pub mod grader;
pub mod model;
pub mod pool;
pub mod report;
pub mod scoring;
pub mod session;

pub use composer::{compose, Composition, MixSplit, Shortfall};
pub use error::QuizError;
pub use grader::{grade, is_correct, Verdict};
pub use model::{Level, LevelMode, Question, QuestionType, QuizConfig, Theme};
pub use pool::QuestionPool;
pub use scoring::{aggregate, ScoreReport, ThemeScore, WrongEntry};
pub use session::{QuizSession, Step};
