//! Status and file tracking operations for GitManager
//!
//! Contains methods for getting repository status

use git2::{Status, StatusOptions};

use crate::git::error::{RepoError, RepoResult};
use crate::git::types::RepoStatus;
use crate::git::GitManager;

impl GitManager {
    /// Get repository status.
    ///
    /// Safe on any existing directory: an uninitialized one reports
    /// `is_initialized: false` instead of failing, and nothing is created.
    pub fn get_status(&self) -> RepoResult<RepoStatus> {
        if !self.repo_path().exists() {
            return Err(RepoError::not_found(format!(
                "repository path {}",
                self.repo_path().display()
            )));
        }
        if !self.is_initialized() {
            return Ok(RepoStatus::uninitialized());
        }

        let repo = self.open()?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        opts.recurse_untracked_dirs(true);
        opts.include_ignored(false);

        let statuses = repo.statuses(Some(&mut opts))?;

        let mut staged = Vec::new();
        let mut modified = Vec::new();
        let mut untracked = Vec::new();

        for entry in statuses.iter() {
            let Some(path) = entry.path() else {
                continue;
            };
            let status = entry.status();

            if self.is_staged(status) {
                staged.push(path.to_string());
            }
            if self.is_unstaged(status) {
                modified.push(path.to_string());
            }
            if status.contains(Status::WT_NEW) {
                untracked.push(path.to_string());
            }
        }

        Ok(RepoStatus::new(
            Self::current_branch_name(&repo),
            staged,
            modified,
            untracked,
        ))
    }

    /// Index differs from HEAD
    pub(crate) fn is_staged(&self, status: Status) -> bool {
        status.intersects(
            Status::INDEX_NEW
                | Status::INDEX_MODIFIED
                | Status::INDEX_DELETED
                | Status::INDEX_RENAMED
                | Status::INDEX_TYPECHANGE,
        )
    }

    /// Working tree differs from the index for a tracked file
    pub(crate) fn is_unstaged(&self, status: Status) -> bool {
        status.intersects(
            Status::WT_MODIFIED | Status::WT_DELETED | Status::WT_RENAMED | Status::WT_TYPECHANGE,
        )
    }
}
