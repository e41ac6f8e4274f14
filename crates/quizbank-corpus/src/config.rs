//! Corpus configuration and source factory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizbank_core::model::{LevelMode, Theme, LENGTH_PRESETS};

use crate::directory::DirectorySource;
use crate::http::HttpSource;
use crate::source::BankSource;

/// Where the bank files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Directory {
        #[serde(default = "default_data_dir")]
        path: String,
    },
    Http {
        base_url: String,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Directory {
            path: default_data_dir(),
        }
    }
}

/// One theme and the bank file holding its questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFile {
    pub name: Theme,
    pub file: String,
}

impl ThemeFile {
    pub fn new(name: Theme, file: &str) -> Self {
        Self {
            name,
            file: file.to_string(),
        }
    }
}

/// Top-level quizbank configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizbankConfig {
    /// Level used when none is given on the command line.
    #[serde(default)]
    pub default_level: LevelMode,
    /// Length preset (or number) used when none is given.
    #[serde(default = "default_length")]
    pub default_length: String,
    #[serde(default)]
    pub source: SourceConfig,
    /// Themes offered, in menu order.
    #[serde(default = "default_themes")]
    pub themes: Vec<ThemeFile>,
    /// Named quiz lengths.
    #[serde(default = "default_lengths")]
    pub lengths: BTreeMap<String, usize>,
}

fn default_data_dir() -> String {
    "./data".to_string()
}
fn default_length() -> String {
    "courte".to_string()
}
fn default_themes() -> Vec<ThemeFile> {
    vec![
        ThemeFile::new(Theme::Databases, "bases_de_donnees.json"),
        ThemeFile::new(Theme::Html, "html.json"),
        ThemeFile::new(Theme::Css, "css.json"),
        ThemeFile::new(Theme::JavaScript, "javascript.json"),
        ThemeFile::new(Theme::Php, "php.json"),
    ]
}
fn default_lengths() -> BTreeMap<String, usize> {
    LENGTH_PRESETS
        .iter()
        .map(|(name, n)| (name.to_string(), *n))
        .collect()
}

impl Default for QuizbankConfig {
    fn default() -> Self {
        Self {
            default_level: LevelMode::default(),
            default_length: default_length(),
            source: SourceConfig::default(),
            themes: default_themes(),
            lengths: default_lengths(),
        }
    }
}

impl QuizbankConfig {
    /// Turn a length preset name or a bare positive number into a count.
    pub fn resolve_length(&self, value: &str) -> Result<usize> {
        let value = value.trim();
        if let Some(&n) = self.lengths.get(&value.to_lowercase()) {
            return Ok(n);
        }
        match value.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => {
                let names: Vec<&str> = self.lengths.keys().map(String::as_str).collect();
                anyhow::bail!(
                    "unknown quiz length '{value}': expected one of [{}] or a positive number",
                    names.join(", ")
                )
            }
        }
    }

    /// Look up a configured theme by label or alias, case-insensitively.
    pub fn find_theme(&self, name: &str) -> Option<&ThemeFile> {
        let wanted = name.trim();
        let parsed = wanted.parse::<Theme>().ok();
        self.themes.iter().find(|t| {
            t.name.label().eq_ignore_ascii_case(wanted) || parsed.as_ref() == Some(&t.name)
        })
    }

    /// Resolve a comma-separated theme list against the configured themes.
    pub fn select_themes(&self, list: &str) -> Result<Vec<ThemeFile>> {
        let mut selected: Vec<ThemeFile> = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let theme = self.find_theme(name).with_context(|| {
                let known: Vec<&str> = self.themes.iter().map(|t| t.name.label()).collect();
                format!("unknown theme '{name}': expected one of [{}]", known.join(", "))
            })?;
            if !selected.contains(theme) {
                selected.push(theme.clone());
            }
        }
        if selected.is_empty() {
            anyhow::bail!("no themes selected");
        }
        Ok(selected)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_source_config(config: &SourceConfig, data_dir: Option<String>) -> SourceConfig {
    match config {
        SourceConfig::Directory { path } => SourceConfig::Directory {
            path: data_dir.unwrap_or_else(|| resolve_env_vars(path)),
        },
        SourceConfig::Http { base_url } => SourceConfig::Http {
            base_url: resolve_env_vars(base_url),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizbank.toml` in the current directory
/// 2. `~/.config/quizbank/config.toml`
///
/// `QUIZBANK_DATA_DIR` overrides the path of a directory source.
pub fn load_config() -> Result<QuizbankConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizbank.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizbankConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        None => QuizbankConfig::default(),
    };

    let data_dir = std::env::var("QUIZBANK_DATA_DIR").ok();
    config.source = resolve_source_config(&config.source, data_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizbank"))
}

/// Create a bank source from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn BankSource>> {
    match config {
        SourceConfig::Directory { path } => Ok(Box::new(DirectorySource::new(path))),
        SourceConfig::Http { base_url } => {
            let source = HttpSource::new(base_url)
                .with_context(|| format!("failed to set up HTTP source for {base_url}"))?;
            Ok(Box::new(source))
        }
    }
}
