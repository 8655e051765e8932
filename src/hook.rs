use crate::classifier::Classifier;
use crate::config::{Config, ConfigError};
use crate::error::GuardError;
use crate::git::Repository;
use crate::report::Report;
use crate::source::{read_staged_diff, ChangeSource, HistorySource, MessageSource, NoRepository};
use std::path::PathBuf;

/// One classification pass over a repository
pub struct Hook<S> {
    source: S,
    classifier: Classifier,
    strip_comments: bool,
}

impl<S: HistorySource + ChangeSource> Hook<S> {
    pub fn new(source: S, classifier: Classifier) -> Self {
        Self {
            source,
            classifier,
            strip_comments: true,
        }
    }

    /// Build a hook from loaded configuration, compiling its patterns
    pub fn from_config(source: S, config: &Config) -> Result<Self, ConfigError> {
        let classifier = Classifier::from_rules(&config.rules)?;
        Ok(Self::new(source, classifier).with_comment_stripping(config.message.strip_comments))
    }

    pub fn with_comment_stripping(mut self, enabled: bool) -> Self {
        self.strip_comments = enabled;
        self
    }

    /// Read the message, classify it and decide
    ///
    /// Never fails: unreadable input is a skip and tooling failures fail
    /// open, so only a deliberate classification can block.
    pub fn run(&self, input: &MessageSource) -> Report {
        let message = match input.read(&self.source, self.strip_comments) {
            Ok(Some(message)) => message,
            Ok(None) => {
                tracing::info!("no previous commit, nothing to check");
                return Report::skipped("no previous commit to check");
            }
            Err(e) => {
                tracing::info!(error = %e, "skipping");
                return Report::skipped_on_error(&e);
            }
        };

        let verdict = self.classifier.classify(&message, None);

        // The staged diff only describes the commit being made, not HEAD
        let corroborate =
            matches!(input, MessageSource::File(_)) && self.classifier.needs_diff(&verdict);
        if !corroborate {
            return Report::from_classification(Some(&message), &verdict);
        }

        match read_staged_diff(&self.source) {
            Ok(diff) => {
                let verdict = self.classifier.classify(&message, Some(&diff));
                if !verdict.is_blocked() {
                    tracing::info!("staged diff is substantive, allowing trivial-looking message");
                }
                Report::from_classification(Some(&message), &verdict)
            }
            Err(e) => {
                tracing::info!(error = %e, "cannot corroborate, failing open");
                Report::failed_open(Some(&message), &e)
            }
        }
    }
}

/// Everything a single command-line invocation asks for
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub message_file: Option<PathBuf>,
    pub repo_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    /// Overrides `rules.require_diff_corroboration` when set
    pub corroborate: Option<bool>,
}

/// Resolve repository and configuration, then run the hook
pub fn evaluate(invocation: &Invocation) -> Report {
    let repo = match &invocation.repo_dir {
        Some(dir) => Repository::discover_from(dir),
        None => Repository::discover(),
    };
    let repo = match repo {
        Ok(repo) => Some(repo),
        Err(e) => {
            tracing::debug!(error = %e, "no repository, message-only checks");
            None
        }
    };

    let mut config = match Config::load(
        invocation.config_path.as_deref(),
        repo.as_ref().map(Repository::path),
    ) {
        Ok(config) => config,
        Err(e) => return config_failure(e),
    };

    if let Some(enabled) = invocation.corroborate {
        config.rules.require_diff_corroboration = enabled;
    }

    let input = MessageSource::from_arg(invocation.message_file.clone());

    let report = match repo {
        Some(repo) => Hook::from_config(repo, &config).map(|hook| hook.run(&input)),
        None => Hook::from_config(NoRepository, &config).map(|hook| hook.run(&input)),
    };

    report.unwrap_or_else(config_failure)
}

fn config_failure(error: ConfigError) -> Report {
    let error = GuardError::from(error);
    tracing::info!(error = %error, "failing open");
    Report::failed_open(None, &error)
}
