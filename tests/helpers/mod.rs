#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run git in the given repository
pub fn git(repo_path: &Path, args: &[&str]) -> Output {
    Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .expect("Failed to run git")
}

/// Helper to create a test git repository
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"]);
    git(&repo_path, &["config", "user.name", "Test User"]);
    git(&repo_path, &["config", "user.email", "test@example.com"]);
    git(&repo_path, &["config", "commit.gpgsign", "false"]);

    (temp_dir, repo_path)
}

/// Helper to create a commit
pub fn create_commit(repo_path: &Path, file: &str, content: &str, message: &str) {
    stage_file(repo_path, file, content);

    let output = git(repo_path, &["commit", "-m", message]);
    assert!(output.status.success(), "Failed to commit: {:?}", output);
}

/// Helper to write and stage a file without committing
pub fn stage_file(repo_path: &Path, file: &str, content: &str) {
    let file_path = repo_path.join(file);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directories");
    }
    fs::write(&file_path, content).expect("Failed to write file");

    let output = git(repo_path, &["add", file]);
    assert!(output.status.success(), "Failed to add file: {:?}", output);
}

/// Helper to write a commit message file the way git does for commit-msg hooks
pub fn write_message(repo_path: &Path, message: &str) -> PathBuf {
    let path = repo_path.join(".git").join("COMMIT_EDITMSG");
    fs::write(&path, format!("{}\n# Please enter the commit message for your changes.\n", message))
        .expect("Failed to write message file");
    path
}
