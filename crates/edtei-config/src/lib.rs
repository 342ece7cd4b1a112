use edtei_engine::{ParseOptions, TeiOptions, annotate::DEFAULT_RESP};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {field} in config file at {config_path}: {reason}")]
    ConfigValueError {
        config_path: PathBuf,
        field: &'static str,
        reason: String,
    },
}

/// Settings for the annotation passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    /// Responsibility pointer written on `note` and `corr`.
    pub resp: String,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            resp: DEFAULT_RESP.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseOptions,
    pub annotate: AnnotateConfig,
    pub tei: TeiOptions,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.validate(config_path)?;
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/edtei");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn validate(&self, config_path: &Path) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| ConfigError::ConfigValueError {
            config_path: config_path.to_path_buf(),
            field,
            reason: reason.to_string(),
        };

        if self.parse.number_lines_every == 0 {
            return Err(invalid("parse.number_lines_every", "must be at least 1"));
        }
        if self.annotate.resp.trim().is_empty() {
            return Err(invalid("annotate.resp", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edtei_engine::{NumeralStyle, TextMode};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/edtei/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.parse.mode, TextMode::Prose);
        assert_eq!(config.parse.number_lines_every, 4);
        assert_eq!(config.annotate.resp, "#EDT");
        assert_eq!(config.tei.title, "");
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"
[parse]
mode = "verse"
numeral_style = "roman"

[tei]
title = "Troilus"
"#,
        );

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config.parse.mode, TextMode::Verse);
        assert_eq!(config.parse.numeral_style, NumeralStyle::Roman);
        assert_eq!(config.parse.number_lines_every, 4);
        assert!(!config.parse.number_blocks);
        assert_eq!(config.annotate, AnnotateConfig::default());
        assert_eq!(config.tei.title, "Troilus");
    }

    #[test]
    fn test_zero_line_interval_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[parse]\nnumber_lines_every = 0\n");

        let err = Config::load_from_path(&path).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::ConfigValueError {
                field: "parse.number_lines_every",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_resp_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[annotate]\nresp = \"  \"\n");

        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[parse]\nmode = \"drama\"\n");

        let err = Config::load_from_path(&path).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r##"
[parse]
mode = "verse"
number_blocks = true
numeral_style = "arabic"
number_lines_every = 5
reset_counts_on_page_break = true

[annotate]
resp = "#DD"

[tei]
title = "Troilus"
"##,
        );

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config.parse.mode, TextMode::Verse);
        assert!(config.parse.number_blocks);
        assert_eq!(config.parse.numeral_style, NumeralStyle::Arabic);
        assert_eq!(config.parse.number_lines_every, 5);
        assert!(config.parse.reset_counts_on_page_break);
        assert_eq!(config.annotate.resp, "#DD");
        assert_eq!(config.tei.title, "Troilus");
    }
}
