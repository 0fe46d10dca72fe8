//! Caller-facing picker configuration.
//!
//! Loaded from YAML; every key is optional:
//!
//! ```yaml
//! color: "hsla(250, 50%, 20%, 1)"  # initial color description
//! debounce_ms: 100                  # completed-change quiescence window
//! history_capacity: 50              # undo/redo bound
//! ```

use crate::debounce::DEFAULT_WINDOW;
use crate::description::ColorDescription;
use crate::error::{Error, Result};
use crate::history::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Picker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Initial color description, as text. `None` means the default color.
    #[serde(default)]
    pub color: Option<String>,

    /// Completed-change quiescence window in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of undo/redo entries.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_WINDOW.as_millis() as u64
}
fn default_history_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            color: None,
            debounce_ms: default_debounce_ms(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl PickerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ConfigNotFound(path.display().to_string()),
            _ => Error::Io(e),
        })?;

        Self::parse(&content)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// [`Error::ConfigInvalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Checks value ranges and that `color` parses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::ConfigInvalid {
                key: "history_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        self.initial_color().map(|_| ())
    }

    /// The initial color description, or the default color when unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if `color` is not a recognizable description.
    pub fn initial_color(&self) -> Result<ColorDescription> {
        match &self.color {
            None => Ok(ColorDescription::default()),
            Some(text) => text.parse().map_err(|e: Error| Error::ConfigInvalid {
                key: "color".to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// The completed-change window as a Duration.
    #[must_use]
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
