use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use chrono::NaiveDateTime;
use log::warn;

use crate::types::{AppError, AppResult};

/// Thin boundary over the git working tree. Both operations are
/// synchronous subprocesses; commits carry forged author/committer dates
/// through environment overrides.
pub struct GitWorkspace {
    root: PathBuf,
}

impl GitWorkspace {
    /// Fails when `root` is not a git repository; checked before any
    /// fabrication work starts
    pub fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        if !root.join(".git").exists() {
            return Err(AppError::Git(format!(
                "{} is not a git repository",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stage a repository-relative path. Failures are silently ignored;
    /// a bad stage surfaces as a failed commit on the same iteration.
    pub fn stage(&self, path: &Path) {
        let _ = Command::new("git")
            .arg("add")
            .arg(path)
            .current_dir(&self.root)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }

    /// Commit staged changes with backdated author/committer timestamps.
    /// Non-zero exit status is an iteration failure, not an error.
    pub fn commit(&self, message: &str, when: &NaiveDateTime) -> bool {
        let stamp = when.format("%Y-%m-%dT%H:%M:%S").to_string();
        match Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(&self.root)
            .env("GIT_AUTHOR_DATE", &stamp)
            .env("GIT_COMMITTER_DATE", &stamp)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(err) => {
                warn!("failed to spawn git commit: {err}");
                false
            }
        }
    }
}
