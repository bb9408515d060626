//! Rollback for GitManager
//!
//! Moves the current branch to any commit in the object store. The target does
//! not need to be an ancestor of HEAD, so this can rewrite branch history.

use crate::git::error::RepoResult;
use crate::git::types::ResetMode;
use crate::git::GitManager;

impl GitManager {
    /// Reset the current branch to `commit_sha` and return the new HEAD SHA.
    ///
    /// `ResetMode::Hard` overwrites tracked files and the index. Uncommitted
    /// work is gone afterwards; there is no undo through this API.
    pub fn rollback(&self, commit_sha: &str, mode: ResetMode) -> RepoResult<String> {
        let repo = self.open()?;
        Self::require_commits(&repo)?;

        let target = Self::resolve_commit(&repo, commit_sha)?;

        if mode == ResetMode::Hard {
            log::warn!(
                "[GitManager] Hard reset to {} discards uncommitted changes in {}",
                target.id(),
                self.repo_path().display()
            );
        }

        repo.reset(target.as_object(), mode.into(), None)?;

        let new_head = Self::head_commit(&repo)?.id().to_string();
        log::info!("[GitManager] Rolled back to {} (mode: {})", new_head, mode);

        Ok(new_head)
    }
}
