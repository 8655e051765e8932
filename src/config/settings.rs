use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up at the root of the repository
pub const REPO_CONFIG_FILE: &str = ".amendguard.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub message: MessageConfig,
}

/// Policy data for the triviality rules
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Messages with fewer trimmed characters than this are blocked
    pub min_length: usize,
    /// Case-insensitive substrings, matched anywhere in the message
    pub phrases: Vec<String>,
    /// Regular expressions, matched against the whole trimmed message
    pub patterns: Vec<String>,
    /// Only block a phrase/pattern match when the staged diff looks trivial too
    pub require_diff_corroboration: bool,
    /// Extensions (without the dot) that count as documentation
    pub doc_extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct MessageConfig {
    /// Clean message files the way git does (comment lines per
    /// `core.commentChar`, the verbose-commit diff); false keeps them verbatim
    pub strip_comments: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_length: 4,
            phrases: [
                "fix typo",
                "fixed typo",
                "typo fix",
                "minor update",
                "minor fix",
                "minor change",
                "small fix",
                "wip",
                "cleanup",
                "clean up",
                "lint",
                "fix formatting",
                "whitespace fix",
                "oops",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            patterns: [
                "fix(es|ed)?|typos?|updates?|wip|tmp|temp|test|changes?|stuff|misc",
                "[a-z]",
                "[0-9]+",
                "[[:punct:]]+",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            require_diff_corroboration: false,
            doc_extensions: ["md", "txt", "rst", "adoc"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            strip_comments: true,
        }
    }
}

impl Config {
    /// Get the per-user config directory path
    pub fn config_dir() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".config").join("amendguard"))
    }

    /// Get the per-user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Resolve and load the effective configuration
    ///
    /// An explicit path must exist. Otherwise the repository file wins over
    /// the per-user file, and built-in defaults apply when neither exists.
    pub fn load(explicit: Option<&Path>, repo_root: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let candidates = repo_root
            .map(|root| root.join(REPO_CONFIG_FILE))
            .into_iter()
            .chain(Self::user_config_path());

        for path in candidates {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load_from(&path);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;

        if rules.min_length == 0 {
            return Err(ConfigError::InvalidValue(
                "rules.min_length must be greater than 0".to_string(),
            ));
        }

        // An empty phrase is a substring of every message
        if rules.phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "rules.phrases must not contain empty entries".to_string(),
            ));
        }

        if rules.patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "rules.patterns must not contain empty entries".to_string(),
            ));
        }

        if rules
            .doc_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').is_empty())
        {
            return Err(ConfigError::InvalidValue(
                "rules.doc_extensions must not contain empty entries".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rules.min_length, 4);
        assert!(!config.rules.require_diff_corroboration);
        assert!(config.rules.phrases.contains(&"fix typo".to_string()));
        assert!(config.message.strip_comments);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[rules]\nrequire_diff_corroboration = true\n").unwrap();
        assert!(config.rules.require_diff_corroboration);
        assert_eq!(config.rules.min_length, 4);
        assert_eq!(config.rules.phrases, RulesConfig::default().phrases);
        assert!(config.message.strip_comments);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_override_phrases() {
        let config = Config::parse("[rules]\nphrases = [\"bump\"]\n").unwrap();
        assert_eq!(config.rules.phrases, vec!["bump".to_string()]);
    }

    #[test]
    fn test_validate_zero_min_length() {
        let mut config = Config::default();
        config.rules.min_length = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validate_empty_phrase() {
        let result = Config::parse("[rules]\nphrases = [\"wip\", \"  \"]\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validate_empty_extension() {
        let result = Config::parse("[rules]\ndoc_extensions = [\".\"]\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::parse("[rules\nmin_length = 4");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_wrong_type() {
        let result = Config::parse("[rules]\nmin_length = \"four\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let result = Config::load(Some(&missing), None);
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_repo_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(REPO_CONFIG_FILE),
            "[rules]\nmin_length = 10\n",
        )
        .unwrap();

        let config = Config::load(None, Some(temp_dir.path())).unwrap();
        assert_eq!(config.rules.min_length, 10);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(config, parsed);
    }
}
