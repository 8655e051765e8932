use crate::config::ConfigError;
use crate::error::{GitError, GuardError};
use std::fmt;

/// A guard error put in terms a committer can act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub summary: String,
    pub suggestion: Option<String>,
    pub raw_error: String,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.summary, self.raw_error)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

pub struct ErrorExplainer;

impl ErrorExplainer {
    pub fn explain(error: &GuardError) -> Explanation {
        let raw_error = error.to_string();

        match error {
            GuardError::MissingInput(_) => Explanation {
                summary: "No commit message to check".to_string(),
                suggestion: Some(
                    "Pass the message file git gives the hook, e.g. `amendguard \"$1\"`".to_string(),
                ),
                raw_error,
            },
            GuardError::ChangeRetrieval(_) => Explanation {
                summary: "Could not read the staged changes, so the trivial-looking message was not confirmed"
                    .to_string(),
                suggestion: Some(
                    "Run `git diff --cached` to see the failure, or turn off rules.require_diff_corroboration"
                        .to_string(),
                ),
                raw_error,
            },
            GuardError::Configuration(config_err) => Explanation {
                summary: "The amendguard configuration is invalid, no rules were applied".to_string(),
                suggestion: Some(Self::config_suggestion(config_err)),
                raw_error,
            },
            GuardError::Git(git_err) => Self::explain_git(git_err, raw_error),
        }
    }

    fn config_suggestion(error: &ConfigError) -> String {
        match error {
            ConfigError::InvalidPattern { pattern, .. } => {
                format!("Fix or remove the pattern '{}' in rules.patterns", pattern)
            }
            ConfigError::ReadError { path, .. } => {
                format!("Check that {} exists and is readable", path.display())
            }
            ConfigError::ParseError(_) | ConfigError::InvalidValue(_) => {
                "Check .amendguard.toml or ~/.config/amendguard/config.toml".to_string()
            }
        }
    }

    fn explain_git(error: &GitError, raw_error: String) -> Explanation {
        match error {
            GitError::NotARepository => Explanation {
                summary: "Not inside a git repository".to_string(),
                suggestion: Some("Run amendguard from a hook, or pass --repo <dir>".to_string()),
                raw_error,
            },
            GitError::CommandFailed(_) | GitError::IoError(_) => Explanation {
                summary: "git could not be run".to_string(),
                suggestion: Some("Check that git is installed and on PATH".to_string()),
                raw_error,
            },
        }
    }
}
