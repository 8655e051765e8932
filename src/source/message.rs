use crate::error::{GitError, GitResult, GuardError, GuardResult};
use crate::git::Repository;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Marker git writes above the diff in `git commit --verbose`, after the
/// comment character
const SCISSORS: &str = "------------------------ >8 ------------------------";

const DEFAULT_COMMENT: &str = "#";

/// The text a commit will be recorded with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The message without surrounding whitespace, as the rules see it
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How git cleans an edited message before recording it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleanup {
    /// Drop comment lines and everything from the scissors line down
    Strip { comment: String },
    /// Only cut at the scissors line
    Scissors { comment: String },
    /// Keep the text as written
    Verbatim,
}

impl Default for Cleanup {
    fn default() -> Self {
        Cleanup::Strip {
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

impl Cleanup {
    /// Cleanup mode from `commit.cleanup` and the comment string from
    /// `core.commentChar`
    ///
    /// `auto` lets git pick a character per message, which cannot be known
    /// afterwards, so it falls back to `#`.
    pub fn from_git_config(comment_char: Option<&str>, mode: Option<&str>) -> Self {
        let comment = match comment_char {
            Some(value) if !value.is_empty() && value != "auto" => value.to_string(),
            _ => DEFAULT_COMMENT.to_string(),
        };

        match mode.map(str::to_ascii_lowercase).as_deref() {
            Some("verbatim") | Some("whitespace") => Cleanup::Verbatim,
            Some("scissors") => Cleanup::Scissors { comment },
            _ => Cleanup::Strip { comment },
        }
    }

    pub fn apply(&self, raw: &str) -> String {
        match self {
            Cleanup::Strip { comment } => strip_git_comments(raw, comment),
            Cleanup::Scissors { comment } => {
                let scissors = format!("{} {}", comment, SCISSORS);
                raw.lines()
                    .take_while(|line| *line != scissors)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Cleanup::Verbatim => raw.to_string(),
        }
    }
}

/// Anything that can tell us the message of the latest commit
pub trait HistorySource {
    /// None when there is no commit yet
    fn latest_message(&self) -> GitResult<Option<String>>;

    /// How this history cleans up edited messages
    fn message_cleanup(&self) -> GitResult<Cleanup> {
        Ok(Cleanup::default())
    }
}

impl HistorySource for Repository {
    fn latest_message(&self) -> GitResult<Option<String>> {
        self.last_commit_message()
    }

    fn message_cleanup(&self) -> GitResult<Cleanup> {
        let comment_char = self.config_value("core.commentChar")?;
        let mode = self.config_value("commit.cleanup")?;
        Ok(Cleanup::from_git_config(comment_char.as_deref(), mode.as_deref()))
    }
}

/// Where the candidate message comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    /// File handed to a `commit-msg` style hook
    File(PathBuf),
    /// No file given: check the most recent commit instead
    LastCommit,
}

impl MessageSource {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => MessageSource::File(path),
            None => MessageSource::LastCommit,
        }
    }

    /// Read the message, or None when there is nothing to check
    ///
    /// An unreadable file is `GuardError::MissingInput`; an empty repository
    /// in fallback mode is simply `Ok(None)`. Bytes that are not UTF-8, as
    /// left by a legacy `i18n.commitEncoding`, are replaced rather than
    /// treated as unreadable.
    pub fn read<H: HistorySource>(
        &self,
        history: &H,
        strip_comments: bool,
    ) -> GuardResult<Option<CommitMessage>> {
        match self {
            MessageSource::File(path) => {
                let bytes = fs::read(path).map_err(|e| {
                    GuardError::MissingInput(format!("cannot read {}: {}", path.display(), e))
                })?;
                let raw = String::from_utf8_lossy(&bytes);

                let cleanup = if strip_comments {
                    history.message_cleanup().unwrap_or_else(|e| {
                        tracing::debug!(error = %e, "cannot read cleanup settings, using defaults");
                        Cleanup::default()
                    })
                } else {
                    Cleanup::Verbatim
                };

                Ok(Some(CommitMessage::new(cleanup.apply(&raw).trim_end())))
            }
            MessageSource::LastCommit => {
                let message = history.latest_message()?;
                if message.is_none() {
                    tracing::debug!("repository has no commits yet");
                }
                Ok(message.map(|m| CommitMessage::new(m.trim_end())))
            }
        }
    }
}

/// Remove what git itself drops from an edited message: comment lines
/// and everything from the scissors line down
pub fn strip_git_comments(raw: &str, comment: &str) -> String {
    let scissors = format!("{} {}", comment, SCISSORS);
    let mut kept = Vec::new();

    for line in raw.lines() {
        if line == scissors {
            break;
        }
        if line.starts_with(comment) {
            continue;
        }
        kept.push(line);
    }

    kept.join("\n")
}

/// Stand-in history for running outside a repository
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepository;

impl HistorySource for NoRepository {
    fn latest_message(&self) -> GitResult<Option<String>> {
        Err(GitError::NotARepository)
    }
}
