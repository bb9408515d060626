//! Repository tools
//!
//! One function per tool in the public surface. Each resolves the repository
//! path (falling back to the configured default), runs the GitManager
//! operation, and renders the result as text for the calling transport.

use serde::Serialize;
use std::path::PathBuf;

use crate::git::{
    BranchInfo, CommitIdentity, CommitOutcome, GitManager, RepoError, RepoResult, ResetMode,
};
use crate::utils::{short_sha, to_path_buf};

/// Default history length for `list_commits`
pub const DEFAULT_COMMIT_LIMIT: usize = 50;

/// Reply to `commit_all_changes` on a clean working tree
pub const NO_CHANGES_MESSAGE: &str = "No changes to commit";

/// Git tool state
///
/// Built once at startup from configuration and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct GitToolState {
    default_repo_path: Option<PathBuf>,
    identity: Option<CommitIdentity>,
}

impl GitToolState {
    pub fn new(default_repo_path: Option<PathBuf>, identity: Option<CommitIdentity>) -> Self {
        Self {
            default_repo_path,
            identity,
        }
    }

    pub fn default_repo_path(&self) -> Option<&PathBuf> {
        self.default_repo_path.as_ref()
    }

    /// Manager for the given path, or for the configured default when omitted
    pub fn manager_for(&self, repo_path: Option<&str>) -> RepoResult<GitManager> {
        let path = match repo_path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => to_path_buf(path),
            None => self.default_repo_path.clone().ok_or_else(|| {
                RepoError::validation("repo_path is required (no default configured)")
            })?,
        };

        Ok(GitManager::new(path).with_identity(self.identity.clone()))
    }
}

/// Structured results are rendered as indented JSON with fixed field order
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> RepoResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Initialize a repository, optionally committing what is already there
pub fn initialize_repo(
    repo_path: Option<&str>,
    initial_commit: bool,
    state: &GitToolState,
) -> RepoResult<String> {
    state.manager_for(repo_path)?.initialize(initial_commit)
}

/// Repository status as JSON
pub fn get_repo_status(repo_path: Option<&str>, state: &GitToolState) -> RepoResult<String> {
    let status = state.manager_for(repo_path)?.get_status()?;
    to_pretty_json(&status)
}

/// Stage everything and commit; returns the new SHA or [`NO_CHANGES_MESSAGE`]
pub fn commit_all_changes(
    repo_path: Option<&str>,
    message: &str,
    state: &GitToolState,
) -> RepoResult<String> {
    match state.manager_for(repo_path)?.commit_all(message)? {
        CommitOutcome::Created(sha) => Ok(sha),
        CommitOutcome::NoChanges => Ok(NO_CHANGES_MESSAGE.to_string()),
    }
}

/// Commit history as JSON
pub fn list_commits(
    repo_path: Option<&str>,
    branch: Option<&str>,
    limit: Option<usize>,
    state: &GitToolState,
) -> RepoResult<String> {
    let commits = state.manager_for(repo_path)?.list_commits(
        branch.unwrap_or("HEAD"),
        limit.unwrap_or(DEFAULT_COMMIT_LIMIT),
    )?;
    to_pretty_json(&commits)
}

/// Reset the current branch. The mode is validated before anything is resolved.
pub fn rollback_to_commit(
    repo_path: Option<&str>,
    commit_sha: &str,
    mode: Option<&str>,
    state: &GitToolState,
) -> RepoResult<String> {
    let mode: ResetMode = match mode {
        Some(mode) => mode.parse()?,
        None => ResetMode::default(),
    };

    let new_head = state.manager_for(repo_path)?.rollback(commit_sha, mode)?;
    Ok(format!(
        "Rolled back to {}. New HEAD: {} (mode: {})",
        short_sha(commit_sha.trim()),
        short_sha(&new_head),
        mode
    ))
}

/// Two-tree diff as JSON
pub fn compare_commits(
    repo_path: Option<&str>,
    from_commit: &str,
    to_commit: &str,
    state: &GitToolState,
) -> RepoResult<String> {
    let diff = state
        .manager_for(repo_path)?
        .compare_commits(from_commit, to_commit)?;
    to_pretty_json(&diff)
}

pub fn create_branch(
    repo_path: Option<&str>,
    branch_name: &str,
    from_ref: Option<&str>,
    state: &GitToolState,
) -> RepoResult<String> {
    let branch = state
        .manager_for(repo_path)?
        .create_branch(branch_name, from_ref)?;
    Ok(format!("Created branch: {}", branch.name))
}

/// Switch branches. Refuses (with a conflict) when uncommitted work would be lost.
pub fn switch_branch(
    repo_path: Option<&str>,
    branch_name: &str,
    state: &GitToolState,
) -> RepoResult<String> {
    let current = state.manager_for(repo_path)?.switch_branch(branch_name)?;
    Ok(format!("Switched to branch: {}", current))
}

/// One line per local branch, current branch marked with `*`
pub fn list_branches(repo_path: Option<&str>, state: &GitToolState) -> RepoResult<String> {
    let branches = state.manager_for(repo_path)?.list_branches()?;
    Ok(format_branch_listing(&branches))
}

pub(crate) fn format_branch_listing(branches: &[BranchInfo]) -> String {
    if branches.is_empty() {
        return "No branches (repository has no commits yet)".to_string();
    }

    branches
        .iter()
        .map(|b| {
            format!(
                "{}{} ({}): {}",
                if b.is_current { "* " } else { "  " },
                b.name,
                short_sha(&b.last_commit_sha),
                b.last_commit_message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
