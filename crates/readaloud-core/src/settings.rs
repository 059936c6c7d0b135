//! Settings domain types and validation.
//!
//! These are pure domain types. Reading `.env` files and parsing CLI flags
//! happens in the host; this module only knows the variable names.

use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_LANGUAGE;

/// Environment variable holding the default language tag.
pub const LANGUAGE_ENV_VAR: &str = "READALOUD_LANGUAGE";

/// Environment variable naming the speech program to use.
pub const ENGINE_ENV_VAR: &str = "READALOUD_ENGINE";

/// Speech programs the workspace knows how to drive.
pub const KNOWN_ENGINES: [&str; 4] = ["spd-say", "espeak-ng", "espeak", "say"];

/// Application settings.
///
/// All fields are optional so partial sources (env, flags) can be layered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReadAloudSettings {
    /// Default BCP-47 language tag for hosts that do not supply one.
    pub language: Option<String>,

    /// Preferred speech program; auto-detected when unset.
    pub engine: Option<String>,
}

impl ReadAloudSettings {
    /// Settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            language: Some(DEFAULT_LANGUAGE.to_string()),
            engine: None,
        }
    }

    /// Read settings from the process environment.
    ///
    /// Empty variables count as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (testable form of [`from_env`](Self::from_env)).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let settings = Self {
            language: read(LANGUAGE_ENV_VAR),
            engine: read(ENGINE_ENV_VAR),
        };
        tracing::debug!(
            language = ?settings.language,
            engine = ?settings.engine,
            "Loaded settings from environment"
        );
        settings
    }

    /// Effective language tag (with default fallback).
    #[must_use]
    pub fn effective_language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Merge an update into this one, only touching fields that are `Some`.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref language) = other.language {
            self.language.clone_from(language);
        }
        if let Some(ref engine) = other.engine {
            self.engine.clone_from(engine);
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = clear the field
/// - `Some(Some(value))` = set the field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub language: Option<Option<String>>,
    pub engine: Option<Option<String>>,
}

impl SettingsUpdate {
    /// Update that sets every field provided as `Some` and leaves the rest.
    #[must_use]
    pub fn overrides(language: Option<String>, engine: Option<String>) -> Self {
        Self {
            language: language.map(Some),
            engine: engine.map(Some),
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Language tag cannot be empty")]
    EmptyLanguage,

    #[error("Invalid language tag '{0}' (expected something like 'en-US')")]
    InvalidLanguage(String),

    #[error("Unknown speech engine '{0}' (expected one of: spd-say, espeak-ng, espeak, say)")]
    UnknownEngine(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &ReadAloudSettings) -> Result<(), SettingsError> {
    if let Some(ref language) = settings.language {
        validate_language_tag(language)?;
    }

    if let Some(ref engine) = settings.engine {
        if !KNOWN_ENGINES.contains(&engine.as_str()) {
            return Err(SettingsError::UnknownEngine(engine.clone()));
        }
    }

    Ok(())
}

/// Loose BCP-47 shape check: alphabetic primary subtag of 2–8 letters,
/// then hyphen-separated alphanumeric subtags of 1–8 characters.
fn validate_language_tag(tag: &str) -> Result<(), SettingsError> {
    if tag.trim().is_empty() {
        return Err(SettingsError::EmptyLanguage);
    }

    let mut subtags = tag.split('-');
    let primary = subtags.next().unwrap_or_default();
    let primary_ok =
        (2..=8).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    let rest_ok =
        subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()));

    if primary_ok && rest_ok {
        Ok(())
    } else {
        Err(SettingsError::InvalidLanguage(tag.to_string()))
    }
}
