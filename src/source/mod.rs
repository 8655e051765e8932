pub mod changes;
pub mod message;

pub use changes::{read_staged_diff, ChangeSource, StagedDiff};
pub use message::{
    strip_git_comments, Cleanup, CommitMessage, HistorySource, MessageSource, NoRepository,
};
