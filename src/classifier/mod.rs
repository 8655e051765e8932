//! Triviality rules for commit messages.
//!
//! [`Classifier::classify`] is a pure function of the message, the optional
//! staged diff and the rule set it was built with. It performs no I/O and
//! keeps no state between calls.

pub mod diff;
pub mod patterns;

pub use diff::DiffSummary;
pub use patterns::PatternSet;

use crate::config::{ConfigError, RulesConfig};
use crate::source::{CommitMessage, StagedDiff};
use std::fmt;

/// Which rule decided that a commit is trivial
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    TooShort { length: usize, minimum: usize },
    TrivialPhrase { phrase: String },
    TrivialPattern { pattern: String },
}

impl BlockReason {
    /// Stable rule name used in reports
    pub fn label(&self) -> &'static str {
        match self {
            BlockReason::TooShort { .. } => "too short",
            BlockReason::TrivialPhrase { .. } => "trivial phrase",
            BlockReason::TrivialPattern { .. } => "trivial pattern",
        }
    }

    /// What exactly matched
    pub fn detail(&self) -> String {
        match self {
            BlockReason::TooShort { length, minimum } => {
                format!("{} characters, at least {} required", length, minimum)
            }
            BlockReason::TrivialPhrase { phrase } => format!("contains \"{}\"", phrase),
            BlockReason::TrivialPattern { pattern } => format!("matches /{}/", pattern),
        }
    }

    /// Whether a substantive diff can overturn this reason
    pub fn is_corroborable(&self) -> bool {
        !matches!(self, BlockReason::TooShort { .. })
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Allowed,
    Blocked(BlockReason),
}

impl Classification {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Classification::Blocked(_))
    }

    pub fn reason(&self) -> Option<&BlockReason> {
        match self {
            Classification::Allowed => None,
            Classification::Blocked(reason) => Some(reason),
        }
    }
}

/// Decides whether a commit should have been an amend
#[derive(Debug, Clone)]
pub struct Classifier {
    patterns: PatternSet,
    require_diff_corroboration: bool,
    doc_extensions: Vec<String>,
}

impl Classifier {
    /// Message-only classifier over the given rules
    pub fn new(patterns: PatternSet) -> Self {
        Self {
            patterns,
            require_diff_corroboration: false,
            doc_extensions: RulesConfig::default().doc_extensions,
        }
    }

    /// Build the classifier described by a `[rules]` config section
    pub fn from_rules(rules: &RulesConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(PatternSet::from_rules(rules)?)
            .with_diff_corroboration(rules.require_diff_corroboration)
            .with_doc_extensions(rules.doc_extensions.clone()))
    }

    pub fn with_diff_corroboration(mut self, enabled: bool) -> Self {
        self.require_diff_corroboration = enabled;
        self
    }

    pub fn with_doc_extensions(mut self, extensions: Vec<String>) -> Self {
        self.doc_extensions = extensions;
        self
    }

    /// Classify a message, optionally checking the staged diff
    ///
    /// Rules run in order and the first match wins: length, phrase, pattern.
    /// With corroboration enabled and a diff supplied, a phrase or pattern
    /// match only stands if the diff is trivial as well. Without a diff the
    /// corroboration step does nothing.
    pub fn classify(&self, message: &CommitMessage, diff: Option<&StagedDiff>) -> Classification {
        let verdict = self.message_verdict(message);

        match diff {
            Some(diff) if self.needs_diff(&verdict) => {
                if DiffSummary::parse(diff.as_str()).is_trivial(&self.doc_extensions) {
                    verdict
                } else {
                    Classification::Allowed
                }
            }
            _ => verdict,
        }
    }

    /// Whether this message-only verdict still has to be checked against the
    /// staged diff before it can be final
    pub fn needs_diff(&self, verdict: &Classification) -> bool {
        self.require_diff_corroboration
            && verdict.reason().is_some_and(BlockReason::is_corroborable)
    }

    fn message_verdict(&self, message: &CommitMessage) -> Classification {
        let trimmed = message.trimmed();

        if self.patterns.is_too_short(trimmed) {
            return Classification::Blocked(BlockReason::TooShort {
                length: trimmed.chars().count(),
                minimum: self.patterns.min_length(),
            });
        }

        if let Some(phrase) = self.patterns.matching_phrase(trimmed) {
            return Classification::Blocked(BlockReason::TrivialPhrase {
                phrase: phrase.to_string(),
            });
        }

        if let Some(pattern) = self.patterns.matching_pattern(trimmed) {
            return Classification::Blocked(BlockReason::TrivialPattern {
                pattern: pattern.to_string(),
            });
        }

        Classification::Allowed
    }
}
