//! Version-control queries using command-line git
//!
//! Uses command-line git to avoid dependency issues with git2/libgit2.
//! Only the queries the release pipeline needs are exposed: commit count,
//! tag description, and dirty-tree detection.

use crate::error::{Error, ErrorCode, Result};
use crate::process::run_command_in_dir;
use std::path::{Path, PathBuf};

/// Git repository wrapper
pub struct VcsRepo {
    workdir: PathBuf,
}

impl VcsRepo {
    /// Open a git repository at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let result = run_command_in_dir("git", &["rev-parse", "--git-dir"], path)?;
        if !result.success {
            return Err(Error::not_a_vcs_repo());
        }

        let result = run_command_in_dir("git", &["rev-parse", "--show-toplevel"], path)?;
        let workdir = PathBuf::from(result.stdout.trim());

        Ok(Self { workdir })
    }

    /// Open the repository in the current directory
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::open(&current_dir)
    }

    /// Get the repository working directory
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Count commits reachable from HEAD
    pub fn commit_count(&self) -> Result<u64> {
        let result = run_command_in_dir("git", &["rev-list", "--count", "HEAD"], &self.workdir)?;
        if !result.success {
            return Err(Error::new(
                ErrorCode::VcsQueryFailed,
                format!("git rev-list failed: {}", result.stderr.trim()),
            ));
        }

        result.stdout.trim().parse().map_err(|_| {
            Error::new(
                ErrorCode::VcsQueryFailed,
                format!("Unexpected git rev-list output: {:?}", result.stdout.trim()),
            )
        })
    }

    /// Get the tag-based version description of HEAD
    pub fn describe(&self) -> Result<String> {
        let result = run_command_in_dir("git", &["describe", "--tags"], &self.workdir)?;
        let description = result.stdout.trim();
        if !result.success || description.is_empty() {
            return Err(Error::new(
                ErrorCode::VcsQueryFailed,
                format!("git describe failed: {}", result.stderr.trim()),
            )
            .with_suggestion("Create at least one tag to derive a version name from"));
        }

        Ok(description.to_string())
    }

    /// Check if there are uncommitted changes
    pub fn is_dirty(&self) -> Result<bool> {
        let result = run_command_in_dir("git", &["status", "--porcelain"], &self.workdir)?;
        if !result.success {
            return Err(Error::new(
                ErrorCode::VcsQueryFailed,
                format!("git status failed: {}", result.stderr.trim()),
            ));
        }

        Ok(!result.stdout.trim().is_empty())
    }
}

/// Check if we're in a git repository
pub fn is_vcs_repo(path: &Path) -> bool {
    run_command_in_dir("git", &["rev-parse", "--git-dir"], path)
        .map(|r| r.success)
        .unwrap_or(false)
}
