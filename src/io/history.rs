//! Commit timestamps from git

use crate::core::HistoryProvider;
use crate::error::{Result, SourceToolError};
use log::debug;
use std::path::Path;
use std::process::Command;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runs `git log` in the source root
#[derive(Debug, Clone)]
pub struct GitHistory {
    program: String,
}

impl Default for GitHistory {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another executable in place of `git`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl HistoryProvider for GitHistory {
    fn history(&self, root: &Path, relative: &Path) -> Result<Vec<String>> {
        let target = root.join(relative);
        let output = Command::new(&self.program)
            .arg("log")
            .arg("--pretty=format:%ad")
            .arg(format!("--date=format:{}", DATE_FORMAT))
            .arg("--")
            .arg(relative)
            .current_dir(root)
            .output()
            .map_err(|e| {
                SourceToolError::history_unavailable(
                    &target,
                    format!("failed to execute {}: {}", self.program, e),
                )
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() || !stderr.trim().is_empty() {
            return Err(SourceToolError::history_unavailable(
                &target,
                format!("{} log failed ({}): {}", self.program, output.status, stderr.trim()),
            ));
        }

        let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if lines.is_empty() {
            return Err(SourceToolError::history_unavailable(
                &target,
                "no commits touch this file",
            ));
        }
        debug!("{} commits touch {}", lines.len(), relative.display());
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str], unix_time: u64) {
        let date = format!("@{} +0000", unix_time);
        let status = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .current_dir(dir)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn test_missing_program_is_recoverable() {
        let temp_dir = TempDir::new().unwrap();
        let history = GitHistory::with_program("hexo-source-tool-no-such-binary");
        let err = history
            .history(temp_dir.path(), Path::new("_posts/a.md"))
            .unwrap_err();
        assert!(matches!(err, SourceToolError::HistoryUnavailable { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_outside_repository_fails() {
        // Either git is missing or the temp dir is not a repository
        let temp_dir = TempDir::new().unwrap();
        let err = GitHistory::new()
            .history(temp_dir.path(), Path::new("a.md"))
            .unwrap_err();
        assert!(matches!(err, SourceToolError::HistoryUnavailable { .. }));
    }

    #[test]
    fn test_commits_are_listed_newest_first() {
        if Command::new("git").arg("--version").output().is_err() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        git(root, &["init", "-q"], 0);
        fs::create_dir(root.join("_posts")).unwrap();

        fs::write(root.join("_posts/a.md"), "first").unwrap();
        git(root, &["add", "."], 0);
        git(root, &["commit", "-q", "-m", "first"], 1_609_495_200);
        fs::write(root.join("_posts/a.md"), "second").unwrap();
        fs::write(root.join("untracked.md"), "never added").unwrap();
        git(root, &["commit", "-q", "-a", "-m", "second"], 1_643_767_322);

        let history = GitHistory::new();
        assert_eq!(
            history.history(root, Path::new("_posts/a.md")).unwrap(),
            vec!["2022-02-02 02:02:02", "2021-01-01 10:00:00"]
        );

        let err = history
            .history(root, Path::new("untracked.md"))
            .unwrap_err();
        assert!(matches!(err, SourceToolError::HistoryUnavailable { .. }));
    }
}
