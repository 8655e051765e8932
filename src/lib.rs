pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod hook;
pub mod report;
pub mod source;

// Re-export commonly used types for convenience
pub use classifier::{BlockReason, Classification, Classifier, PatternSet};
pub use config::Config;
pub use error::{GitError, GuardError, GuardResult};
pub use git::Repository;
pub use hook::{evaluate, Hook, Invocation};
pub use report::{Outcome, Report};
pub use source::{CommitMessage, MessageSource, StagedDiff};
