//! Core data model types for quizbank.
//!
//! Questions exactly as they appear in the bank files (French field names are
//! mapped onto Rust names with serde renames), plus the per-session quiz
//! configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// Subject tag attached to every question.
///
/// Tags outside the known set are kept verbatim in [`Theme::Other`] so that a
/// bank with an unexpected tag still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    Databases,
    Html,
    Css,
    JavaScript,
    Php,
    Other(String),
}

impl Theme {
    /// The known themes, in menu order.
    pub const KNOWN: [Theme; 5] = [
        Theme::Databases,
        Theme::Html,
        Theme::Css,
        Theme::JavaScript,
        Theme::Php,
    ];

    /// The tag as written in the bank files.
    pub fn label(&self) -> &str {
        match self {
            Theme::Databases => "Bases de données",
            Theme::Html => "HTML",
            Theme::Css => "CSS",
            Theme::JavaScript => "JavaScript",
            Theme::Php => "PHP",
            Theme::Other(tag) => tag,
        }
    }

    /// Language name used to tag code blocks of this theme.
    pub fn code_language(&self) -> &'static str {
        match self {
            Theme::Databases => "sql",
            Theme::Html => "html",
            Theme::Css => "css",
            Theme::JavaScript => "javascript",
            Theme::Php => "php",
            Theme::Other(_) => "",
        }
    }
}

/// A record without a tag; it matches no theme filter.
impl Default for Theme {
    fn default() -> Self {
        Theme::Other(String::new())
    }
}

impl From<String> for Theme {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Bases de données" => Theme::Databases,
            "HTML" => Theme::Html,
            "CSS" => Theme::Css,
            "JavaScript" => Theme::JavaScript,
            "PHP" => Theme::Php,
            _ => Theme::Other(tag),
        }
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Other(tag) => tag,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Theme {
    type Err = String;

    /// Parses user input (command line, config). Only the known themes are
    /// accepted here; aliases are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bases de données" | "bases de donnees" | "bases_de_donnees" | "bdd" | "sql"
            | "databases" => Ok(Theme::Databases),
            "html" => Ok(Theme::Html),
            "css" => Ok(Theme::Css),
            "javascript" | "js" => Ok(Theme::JavaScript),
            "php" => Ok(Theme::Php),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Difficulty tier of a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Debutant,
    Intermediaire,
    Avance,
    /// Unrecognized tier; never matches a level filter.
    Other(String),
}

impl Level {
    pub const KNOWN: [Level; 3] = [Level::Debutant, Level::Intermediaire, Level::Avance];

    pub fn as_str(&self) -> &str {
        match self {
            Level::Debutant => "debutant",
            Level::Intermediaire => "intermediaire",
            Level::Avance => "avance",
            Level::Other(tag) => tag,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Other(String::new())
    }
}

impl From<String> for Level {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "debutant" => Level::Debutant,
            "intermediaire" => Level::Intermediaire,
            "avance" => Level::Avance,
            _ => Level::Other(tag),
        }
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        match level {
            Level::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty selected for a quiz: one tier, or the `mixte` blend of all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelMode {
    #[default]
    Mixte,
    Debutant,
    Intermediaire,
    Avance,
}

impl LevelMode {
    /// The single tier this mode selects, or `None` for `mixte`.
    pub fn level(self) -> Option<Level> {
        match self {
            LevelMode::Mixte => None,
            LevelMode::Debutant => Some(Level::Debutant),
            LevelMode::Intermediaire => Some(Level::Intermediaire),
            LevelMode::Avance => Some(Level::Avance),
        }
    }
}

impl fmt::Display for LevelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelMode::Mixte => write!(f, "mixte"),
            LevelMode::Debutant => write!(f, "debutant"),
            LevelMode::Intermediaire => write!(f, "intermediaire"),
            LevelMode::Avance => write!(f, "avance"),
        }
    }
}

impl FromStr for LevelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mixte" | "mixed" => Ok(LevelMode::Mixte),
            "debutant" | "débutant" => Ok(LevelMode::Debutant),
            "intermediaire" | "intermédiaire" => Ok(LevelMode::Intermediaire),
            "avance" | "avancé" => Ok(LevelMode::Avance),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// Answer shape of a question, which also selects its grading rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    /// `choix_simple`: exactly one option is selected.
    SingleChoice,
    /// `choix_multiple`: any number of options are selected.
    MultipleChoice,
    /// `zone_saisie`: short typed answer.
    InputField,
    /// `saisie_libre`: free typed answer, usually a code snippet.
    FreeText,
    Unknown(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::SingleChoice => "choix_simple",
            QuestionType::MultipleChoice => "choix_multiple",
            QuestionType::InputField => "zone_saisie",
            QuestionType::FreeText => "saisie_libre",
            QuestionType::Unknown(tag) => tag,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultipleChoice)
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, QuestionType::InputField | QuestionType::FreeText)
    }
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::Unknown(String::new())
    }
}

impl From<String> for QuestionType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "choix_simple" => QuestionType::SingleChoice,
            "choix_multiple" => QuestionType::MultipleChoice,
            "zone_saisie" => QuestionType::InputField,
            "saisie_libre" => QuestionType::FreeText,
            _ => QuestionType::Unknown(tag),
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single question record from a bank file.
///
/// Every field is optional in the file. A record missing its tags still
/// loads; it just never matches a theme or level filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque identifier. Integer ids in the bank are kept as decimal text.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(rename = "niveau", default)]
    pub level: Level,
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    /// The question text; may contain inline or fenced code.
    #[serde(rename = "question", default)]
    pub text: String,
    /// Options offered by choice questions, in display order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Accepted answers. All of them for choice questions, any one of them
    /// for typed questions.
    #[serde(rename = "reponse", default)]
    pub answers: Vec<String>,
    #[serde(rename = "explication", default)]
    pub explanation: String,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
    })
}

/// Named quiz lengths offered by default.
pub const LENGTH_PRESETS: [(&str, usize); 3] = [("courte", 20), ("moyenne", 40), ("longue", 60)];

/// Per-session quiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Selected themes, in the order used for interleaving.
    pub themes: Vec<Theme>,
    pub level: LevelMode,
    /// Target number of questions.
    pub length: usize,
}

impl QuizConfig {
    /// Build a validated configuration. Repeated themes are dropped, keeping
    /// the first occurrence.
    pub fn new(
        themes: impl IntoIterator<Item = Theme>,
        level: LevelMode,
        length: usize,
    ) -> Result<Self, QuizError> {
        let mut unique: Vec<Theme> = Vec::new();
        for theme in themes {
            if !unique.contains(&theme) {
                unique.push(theme);
            }
        }

        if unique.is_empty() {
            return Err(QuizError::InvalidConfig(
                "at least one theme must be selected".into(),
            ));
        }
        if length == 0 {
            return Err(QuizError::InvalidConfig(
                "quiz length must be at least 1".into(),
            ));
        }

        Ok(Self {
            themes: unique,
            level,
            length,
        })
    }

    pub fn includes(&self, theme: &Theme) -> bool {
        self.themes.contains(theme)
    }
}
