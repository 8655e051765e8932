use crate::error::{GitError, GitResult, GuardError, GuardResult};
use crate::git::Repository;
use crate::source::message::NoRepository;

/// Unified diff of the changes staged for the next commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedDiff(String);

impl StagedDiff {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Anything that can produce the staged change set
pub trait ChangeSource {
    fn staged_changes(&self) -> GitResult<StagedDiff>;
}

impl ChangeSource for Repository {
    fn staged_changes(&self) -> GitResult<StagedDiff> {
        self.staged_diff().map(StagedDiff::new)
    }
}

impl ChangeSource for NoRepository {
    fn staged_changes(&self) -> GitResult<StagedDiff> {
        Err(GitError::NotARepository)
    }
}

/// Read the staged diff, reporting any failure as `ChangeRetrieval`
pub fn read_staged_diff<C: ChangeSource>(source: &C) -> GuardResult<StagedDiff> {
    source.staged_changes().map_err(GuardError::ChangeRetrieval)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenGit;

    impl ChangeSource for BrokenGit {
        fn staged_changes(&self) -> GitResult<StagedDiff> {
            Err(GitError::CommandFailed("exit code 128".to_string()))
        }
    }

    #[test]
    fn test_failure_is_change_retrieval() {
        let result = read_staged_diff(&BrokenGit);
        assert!(matches!(
            result,
            Err(GuardError::ChangeRetrieval(GitError::CommandFailed(_)))
        ));
    }

    #[test]
    fn test_no_repository() {
        let result = read_staged_diff(&NoRepository);
        assert!(matches!(
            result,
            Err(GuardError::ChangeRetrieval(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_empty_diff() {
        assert!(StagedDiff::new("").is_empty());
        assert!(StagedDiff::new("\n").is_empty());
        assert!(!StagedDiff::new("diff --git a/x b/x\n").is_empty());
    }
}
