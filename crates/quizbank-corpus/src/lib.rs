//! Question bank sources and corpus loading.
//!
//! Banks are JSON files, one per theme, served from a local directory or
//! over HTTP. [`load_corpus`] fetches all of them concurrently and only
//! builds a [`QuestionPool`](quizbank_core::pool::QuestionPool) once every
//! bank has loaded.

pub mod config;
pub mod directory;
pub mod error;
pub mod http;
pub mod loader;
pub mod memory;
pub mod source;

pub use config::{create_source, load_config, QuizbankConfig, SourceConfig, ThemeFile};
pub use error::CorpusError;
pub use loader::load_corpus;
pub use source::BankSource;
