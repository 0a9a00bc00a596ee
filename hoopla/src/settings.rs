// Hoopla - lexical and semantic checking for the Hoop teaching language.
// Copyright (C) 2025 The Hoopla Authors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Run configuration.
//!
//! [Settings::default] supplies the defaults.  A TOML file may override
//! them, and command-line options override both.  A settings file looks
//! like this:
//!
//! ```toml
//! strict-lexing = true
//! output-format = "csv"
//!
//! [max-messages]
//! error = 20
//! warning = 5
//! ```

use std::{
    fs,
    io::{Error as IoError, ErrorKind},
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use enum_map::EnumMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::message::Severity;

/// The settings file read from the working directory when none is given
/// explicitly.
pub const DEFAULT_SETTINGS_FILE: &str = "hoopla.toml";

/// Format for token and diagnostic reports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Fixed-width text.
    #[default]
    Text,

    /// Comma-separated values.
    Csv,

    /// JSON.
    Json,
}

impl From<&Path> for OutputFormat {
    /// Infers the format from the extension of `path`, defaulting to text.
    fn from(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("csv") => Self::Csv,
            Some(extension) if extension.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Report characters that the tokenizer drops as lexical warnings.
    pub strict_lexing: bool,

    /// Maximum number of diagnostics of each severity to display.
    pub max_messages: EnumMap<Severity, usize>,

    /// Report format, if configured.
    pub output_format: Option<OutputFormat>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strict_lexing: false,
            max_messages: EnumMap::from_fn(|_| 100),
            output_format: None,
        }
    }
}

/// The contents of a settings file.  Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsFile {
    pub strict_lexing: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub max_messages: Option<MaxMessages>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaxMessages {
    pub error: Option<usize>,
    pub warning: Option<usize>,
    pub note: Option<usize>,
}

#[derive(ThisError, Debug)]
pub enum SettingsError {
    #[error("{}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SettingsFile {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

impl Settings {
    /// Overrides these settings with those present in `file`.
    pub fn apply(&mut self, file: SettingsFile) {
        if let Some(strict_lexing) = file.strict_lexing {
            self.strict_lexing = strict_lexing;
        }
        if let Some(output_format) = file.output_format {
            self.output_format = Some(output_format);
        }
        if let Some(max_messages) = file.max_messages {
            for (severity, max) in [
                (Severity::Error, max_messages.error),
                (Severity::Warning, max_messages.warning),
                (Severity::Note, max_messages.note),
            ] {
                if let Some(max) = max {
                    self.max_messages[severity] = max;
                }
            }
        }
    }

    /// Returns the default settings overridden by the settings file at
    /// `path`, or by [DEFAULT_SETTINGS_FILE] in the working directory if
    /// `path` is `None` and that file exists.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_SETTINGS_FILE), false),
        };
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if !required && error.kind() == ErrorKind::NotFound => {
                return Ok(settings);
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.into(),
                    source,
                });
            }
        };
        debug!("reading settings from {}", path.display());
        let file = SettingsFile::from_toml(&text).map_err(|source| SettingsError::Parse {
            path: path.into(),
            source,
        })?;
        settings.apply(file);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::message::Severity;

    use super::{OutputFormat, Settings, SettingsFile};

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(!settings.strict_lexing);
        assert_eq!(settings.max_messages[Severity::Warning], 100);
        assert_eq!(settings.output_format, None);
    }

    #[test]
    fn layering() {
        let file = SettingsFile::from_toml(
            r#"
strict-lexing = true
output-format = "json"

[max-messages]
error = 3
"#,
        )
        .unwrap();
        let mut settings = Settings::default();
        settings.apply(file);
        assert!(settings.strict_lexing);
        assert_eq!(settings.output_format, Some(OutputFormat::Json));
        assert_eq!(settings.max_messages[Severity::Error], 3);
        assert_eq!(settings.max_messages[Severity::Note], 100);
    }

    #[test]
    fn unknown_keys() {
        assert!(SettingsFile::from_toml("strict = true").is_err());
        assert!(SettingsFile::from_toml("[max-messages]\nfatal = 1").is_err());
        assert!(SettingsFile::from_toml("output-format = \"xml\"").is_err());
    }

    #[test]
    fn missing_explicit_file() {
        assert!(Settings::load(Some(Path::new("/nonexistent/hoopla.toml"))).is_err());
    }

    #[test]
    fn format_from_path() {
        assert_eq!(OutputFormat::from(Path::new("out.CSV")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from(Path::new("out.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from(Path::new("out.txt")), OutputFormat::Text);
        assert_eq!(OutputFormat::from(Path::new("out")), OutputFormat::Text);
    }
}
