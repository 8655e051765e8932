use crate::error::{GitError, GitResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of executing a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Executes read-only git commands within a repository
#[derive(Debug)]
pub struct GitExecutor {
    repo_path: PathBuf,
}

impl GitExecutor {
    /// Create a new GitExecutor for the given repository path
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Run git with the given arguments, failing on a non-zero exit
    ///
    /// Arguments are passed straight to the process, never through a shell.
    /// Example: `executor.execute(&["log", "-1", "--format=%B"])`
    pub fn execute(&self, args: &[&str]) -> GitResult<CommandOutput> {
        let output = self.probe(args)?;

        if !output.success {
            return Err(GitError::CommandFailed(format!(
                "Command 'git {}' failed with exit code {}: {}",
                args.join(" "),
                output.exit_code,
                output.stderr.trim()
            )));
        }

        Ok(output)
    }

    /// Run git and return its output even when it exits non-zero
    ///
    /// Used for commands whose exit status is an answer rather than a failure,
    /// such as `rev-parse --verify --quiet HEAD`.
    pub fn probe(&self, args: &[&str]) -> GitResult<CommandOutput> {
        if args.is_empty() {
            return Err(GitError::CommandFailed("Empty command".to_string()));
        }

        tracing::debug!(repo = %self.repo_path.display(), "git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| GitError::CommandFailed(format!("Failed to execute git: {}", e)))?;

        Ok(Self::process_output(output))
    }

    fn process_output(output: Output) -> CommandOutput {
        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        }
    }
}
