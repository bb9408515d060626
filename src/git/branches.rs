//! Branch operations for GitManager
//!
//! Contains methods for creating, listing, and switching branches

use git2::build::CheckoutBuilder;
use git2::{Branch, BranchType, ErrorCode};

use crate::git::error::{RepoError, RepoResult};
use crate::git::types::BranchInfo;
use crate::git::GitManager;

impl GitManager {
    /// Create a new branch pointing at `from_ref` (HEAD when `None`).
    ///
    /// Only creates the pointer; the working tree is not switched.
    pub fn create_branch(&self, name: &str, from_ref: Option<&str>) -> RepoResult<BranchInfo> {
        let name = validate_branch_name(name)?;
        let repo = self.open()?;

        if repo.find_branch(name, BranchType::Local).is_ok() {
            return Err(RepoError::Conflict(format!(
                "branch '{}' already exists",
                name
            )));
        }

        let base = match from_ref.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reference) => Self::resolve_commit(&repo, reference)?,
            None => Self::head_commit(&repo)?,
        };

        let branch = repo.branch(name, &base, false)?;
        log::info!("[GitManager] Created branch {} at {}", name, base.id());

        self.branch_to_info(&branch)
    }

    /// Check out a local branch and return the branch HEAD now points to.
    ///
    /// Uses a safe checkout: if uncommitted work would be overwritten the
    /// switch is refused with a `Conflict` and nothing changes.
    pub fn switch_branch(&self, name: &str) -> RepoResult<String> {
        let repo = self.open()?;

        let branch = repo
            .find_branch(name, BranchType::Local)
            .map_err(|_| RepoError::not_found(format!("branch '{}'", name)))?;
        let refname = branch
            .get()
            .name()
            .ok_or_else(|| RepoError::validation("branch name is not valid UTF-8"))?
            .to_string();
        let target = branch.get().peel_to_commit()?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        repo.checkout_tree(target.as_object(), Some(&mut checkout))
            .map_err(|e| match e.code() {
                ErrorCode::Conflict | ErrorCode::MergeConflict => RepoError::Conflict(format!(
                    "switching to '{}' would overwrite uncommitted changes: {}",
                    name,
                    e.message()
                )),
                _ => e.into(),
            })?;
        repo.set_head(&refname)?;

        log::info!("[GitManager] Switched to branch {}", name);

        Self::current_branch_name(&repo)
            .ok_or_else(|| RepoError::Conflict("HEAD is detached after checkout".to_string()))
    }

    /// Get all local branches, sorted by name
    pub fn list_branches(&self) -> RepoResult<Vec<BranchInfo>> {
        let repo = self.open()?;
        let branches = repo.branches(Some(BranchType::Local))?;

        let mut result = Vec::new();
        for branch in branches {
            let (branch, _) = branch?;
            result.push(self.branch_to_info(&branch)?);
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    /// Convert a Branch to BranchInfo
    pub(crate) fn branch_to_info(&self, branch: &Branch) -> RepoResult<BranchInfo> {
        let name = branch.name()?.unwrap_or("").to_string();
        let commit = branch.get().peel_to_commit()?;

        Ok(BranchInfo {
            name,
            is_current: branch.is_head(),
            last_commit_sha: commit.id().to_string(),
            last_commit_message: commit.summary().unwrap_or("").to_string(),
        })
    }
}

fn validate_branch_name(name: &str) -> RepoResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepoError::validation("branch name must not be empty"));
    }
    if name == "HEAD" || !Branch::name_is_valid(name)? {
        return Err(RepoError::validation(format!(
            "'{}' is not a valid branch name",
            name
        )));
    }
    Ok(name)
}
