pub mod explain;

pub use explain::{ErrorExplainer, Explanation};

use crate::classifier::Classification;
use crate::error::GuardError;
use crate::source::CommitMessage;
use serde::Serialize;

/// Command recommended instead of a separate trivial commit
pub const AMEND_COMMAND: &str = "git commit --amend --no-edit";

/// Exit status that lets the hook continue
pub const EXIT_ALLOW: i32 = 0;

/// Exit status that aborts the hook action
pub const EXIT_BLOCK: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Allowed,
    Blocked,
    Skipped,
}

/// What one invocation decided, ready to print
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub outcome: Outcome,
    pub reason: Option<String>,
    pub detail: Option<String>,
    pub message: Option<String>,
    pub warning: Option<String>,
}

impl Report {
    /// Report a classification; no message means there was nothing to check
    pub fn from_classification(
        message: Option<&CommitMessage>,
        classification: &Classification,
    ) -> Self {
        let Some(message) = message else {
            return Self::skipped("no commit message available");
        };

        match classification {
            Classification::Allowed => Self {
                outcome: Outcome::Allowed,
                reason: None,
                detail: None,
                message: Some(message.as_str().to_string()),
                warning: None,
            },
            Classification::Blocked(reason) => Self {
                outcome: Outcome::Blocked,
                reason: Some(reason.label().to_string()),
                detail: Some(reason.detail()),
                message: Some(message.as_str().to_string()),
                warning: None,
            },
        }
    }

    pub fn skipped(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Skipped,
            reason: None,
            detail: Some(detail.into()),
            message: None,
            warning: None,
        }
    }

    /// Skip because the input could not be read at all
    pub fn skipped_on_error(error: &GuardError) -> Self {
        Self {
            warning: Some(ErrorExplainer::explain(error).to_string()),
            ..Self::skipped("no commit message available")
        }
    }

    /// Let the commit through because tooling, not the message, failed
    pub fn failed_open(message: Option<&CommitMessage>, error: &GuardError) -> Self {
        Self {
            outcome: Outcome::Allowed,
            reason: None,
            detail: None,
            message: message.map(|m| m.as_str().to_string()),
            warning: Some(ErrorExplainer::explain(error).to_string()),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            Outcome::Blocked => EXIT_BLOCK,
            Outcome::Allowed | Outcome::Skipped => EXIT_ALLOW,
        }
    }

    /// Blocks and warnings belong on stderr so git shows them
    pub fn is_diagnostic(&self) -> bool {
        self.outcome == Outcome::Blocked || self.warning.is_some()
    }

    /// One-line summary of the decision
    pub fn status_line(&self) -> String {
        match self.outcome {
            Outcome::Allowed => "amendguard: commit allowed".to_string(),
            Outcome::Skipped => format!(
                "amendguard: skipped ({})",
                self.detail.as_deref().unwrap_or("nothing to check")
            ),
            Outcome::Blocked => match (&self.reason, &self.detail) {
                (Some(reason), Some(detail)) => {
                    format!("amendguard: commit blocked: {} ({})", reason, detail)
                }
                (Some(reason), None) => format!("amendguard: commit blocked: {}", reason),
                _ => "amendguard: commit blocked".to_string(),
            },
        }
    }

    /// Full human-readable report
    pub fn render_text(&self) -> String {
        let mut out = self.status_line();

        if self.outcome == Outcome::Blocked {
            let message = self.message.as_deref().unwrap_or_default();
            out.push_str(&format!(
                "\n\n  \"{}\"\n\n\
                 This looks like a trivial change that belongs in the previous commit.\n\
                 Stage it and amend instead of committing separately:\n\n    \
                 {}\n\n\
                 (use `git commit --amend` to edit the previous message as well)",
                message, AMEND_COMMAND
            ));
        }

        if let Some(warning) = &self.warning {
            out.push_str(&format!("\namendguard: warning: {}", warning));
        }

        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
