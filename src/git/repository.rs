use crate::error::{GitError, GitResult};
use crate::git::executor::GitExecutor;
use std::env;
use std::path::{Path, PathBuf};

/// A git working tree the guard reads from
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: GitExecutor,
}

impl Repository {
    /// Detect git repository from current working directory
    pub fn discover() -> GitResult<Self> {
        let current_dir = env::current_dir().map_err(GitError::IoError)?;

        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> GitResult<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            // `.git` is a file inside linked worktrees and submodules
            if current.join(".git").exists() {
                return Ok(Self::new(current));
            }

            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Create a Repository for a known working tree
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let executor = GitExecutor::new(&path);

        Self { path, executor }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether HEAD points at a commit (false on an unborn branch)
    pub fn has_commits(&self) -> GitResult<bool> {
        let output = self
            .executor
            .probe(&["rev-parse", "--verify", "--quiet", "HEAD"])?;
        Ok(output.success)
    }

    /// Full message of the most recent commit, or None in an empty repository
    pub fn last_commit_message(&self) -> GitResult<Option<String>> {
        if !self.has_commits()? {
            return Ok(None);
        }

        let output = self.executor.execute(&["log", "-1", "--format=%B"])?;
        Ok(Some(output.stdout))
    }

    /// Unified diff of the index against HEAD
    ///
    /// On an unborn branch git compares the index with the empty tree, so
    /// staged files show up as additions. The path prefixes are pinned to
    /// `a/` and `b/` whatever `diff.noprefix` or `diff.mnemonicPrefix` say.
    pub fn staged_diff(&self) -> GitResult<String> {
        let output = self.executor.execute(&[
            "diff",
            "--cached",
            "--no-color",
            "--no-ext-diff",
            "--src-prefix=a/",
            "--dst-prefix=b/",
        ])?;
        Ok(output.stdout)
    }

    /// Value of a git config key, or None when it is not set
    pub fn config_value(&self, key: &str) -> GitResult<Option<String>> {
        let output = self.executor.probe(&["config", "--get", key])?;

        match output.exit_code {
            0 => Ok(Some(output.stdout.trim_end_matches('\n').to_string())),
            // git config exits 1 for a missing key
            1 => Ok(None),
            code => Err(GitError::CommandFailed(format!(
                "Command 'git config --get {}' failed with exit code {}: {}",
                key,
                code,
                output.stderr.trim()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(repo_path: &Path, args: &[&str]) {
        Command::new("git")
            .args(args)
            .current_dir(repo_path)
            .output()
            .unwrap();
    }

    fn create_test_repo() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let repo_path = temp_dir.path().to_path_buf();

        git(&repo_path, &["init"]);
        git(&repo_path, &["config", "user.name", "Test User"]);
        git(&repo_path, &["config", "user.email", "test@example.com"]);
        git(&repo_path, &["config", "commit.gpgsign", "false"]);

        (temp_dir, repo_path)
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (_temp, repo_path) = create_test_repo();

        let sub_dir = repo_path.join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let repo = Repository::discover_from(&sub_dir).unwrap();
        assert_eq!(repo.path(), repo_path.as_path());
    }

    #[test]
    fn test_discover_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        let result = Repository::discover_from(temp_dir.path());

        assert!(matches!(result.unwrap_err(), GitError::NotARepository));
    }

    #[test]
    fn test_empty_repo_has_no_commits() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        assert!(!repo.has_commits().unwrap());
        assert_eq!(repo.last_commit_message().unwrap(), None);
    }

    #[test]
    fn test_last_commit_message() {
        let (_temp, repo_path) = create_test_repo();
        fs::write(repo_path.join("a.txt"), "a").unwrap();
        git(&repo_path, &["add", "a.txt"]);
        git(&repo_path, &["commit", "-m", "Add the first file"]);

        let repo = Repository::new(&repo_path);
        let message = repo.last_commit_message().unwrap().unwrap();
        assert_eq!(message.trim_end(), "Add the first file");
    }

    #[test]
    fn test_staged_diff_in_empty_repo() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        assert_eq!(repo.staged_diff().unwrap(), "");

        fs::write(repo_path.join("notes.md"), "hello\n").unwrap();
        git(&repo_path, &["add", "notes.md"]);

        let diff = repo.staged_diff().unwrap();
        assert!(diff.contains("diff --git a/notes.md b/notes.md"));
        assert!(diff.contains("+hello"));
    }

    #[test]
    fn test_staged_diff_pins_path_prefixes() {
        let (_temp, repo_path) = create_test_repo();
        git(&repo_path, &["config", "diff.mnemonicPrefix", "true"]);
        git(&repo_path, &["config", "diff.noprefix", "true"]);
        fs::write(repo_path.join("README.md"), "teh guard\n").unwrap();
        git(&repo_path, &["add", "README.md"]);
        git(&repo_path, &["commit", "-m", "Add README"]);
        fs::write(repo_path.join("README.md"), "the guard\n").unwrap();
        git(&repo_path, &["add", "README.md"]);

        let diff = Repository::new(&repo_path).staged_diff().unwrap();
        assert!(diff.contains("diff --git a/README.md b/README.md"));
        assert!(diff.contains("+++ b/README.md"));
    }

    #[test]
    fn test_config_value() {
        let (_temp, repo_path) = create_test_repo();
        let repo = Repository::new(&repo_path);

        assert_eq!(repo.config_value("amendguard.unsetkey").unwrap(), None);

        git(&repo_path, &["config", "core.commentChar", ";"]);
        assert_eq!(repo.config_value("core.commentChar").unwrap().as_deref(), Some(";"));
    }

    #[test]
    fn test_staged_diff_ignores_unstaged_changes() {
        let (_temp, repo_path) = create_test_repo();
        fs::write(repo_path.join("a.txt"), "a\n").unwrap();
        git(&repo_path, &["add", "a.txt"]);
        git(&repo_path, &["commit", "-m", "Add the first file"]);

        fs::write(repo_path.join("a.txt"), "changed\n").unwrap();

        let repo = Repository::new(&repo_path);
        assert_eq!(repo.staged_diff().unwrap(), "");
    }
}
