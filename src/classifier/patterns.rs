use crate::config::{ConfigError, RulesConfig};
use regex::{Regex, RegexBuilder};

/// Compiled policy data for the message rules
///
/// Built once per invocation from configuration and never mutated, so a
/// classifier can be handed any rule set without touching shared state.
#[derive(Debug, Clone)]
pub struct PatternSet {
    min_length: usize,
    phrases: Vec<String>,
    patterns: Vec<(String, Regex)>,
}

impl PatternSet {
    /// Compile a pattern set from raw entries
    ///
    /// Phrases are stored lower-cased. Every pattern is wrapped in `^(?:...)$`
    /// so it can only match the entire message.
    pub fn new<P, R>(min_length: usize, phrases: P, patterns: R) -> Result<Self, ConfigError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().to_lowercase())
            .collect();

        let patterns = patterns
            .into_iter()
            .map(|p| {
                let source = p.as_ref().to_string();
                RegexBuilder::new(&format!("^(?:{})$", source))
                    .case_insensitive(true)
                    .build()
                    .map(|regex| (source.clone(), regex))
                    .map_err(|e| ConfigError::InvalidPattern {
                        pattern: source,
                        source: e,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            min_length,
            phrases,
            patterns,
        })
    }

    /// Compile the pattern set described by a `[rules]` config section
    pub fn from_rules(rules: &RulesConfig) -> Result<Self, ConfigError> {
        Self::new(rules.min_length, &rules.phrases, &rules.patterns)
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Whether a trimmed message is below the length threshold
    pub fn is_too_short(&self, trimmed: &str) -> bool {
        trimmed.chars().count() < self.min_length
    }

    /// First phrase contained anywhere in the message, ignoring case
    pub fn matching_phrase(&self, message: &str) -> Option<&str> {
        let lowered = message.to_lowercase();
        self.phrases
            .iter()
            .find(|phrase| lowered.contains(phrase.as_str()))
            .map(String::as_str)
    }

    /// First pattern that matches the whole trimmed message, ignoring case
    pub fn matching_pattern(&self, trimmed: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(trimmed))
            .map(|(source, _)| source.as_str())
    }
}
