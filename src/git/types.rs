//! Git data types and structures
//!
//! Result shapes produced fresh by every call. None of them outlive the response.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::git::error::RepoError;

/// Snapshot of a repository's working state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatus {
    pub is_initialized: bool,
    pub current_branch: Option<String>,
    pub has_changes: bool,
    pub staged_files: Vec<String>,
    pub modified_files: Vec<String>,
    pub untracked_files: Vec<String>,
}

impl RepoStatus {
    /// Build a status for an initialized repository; `has_changes` is derived
    pub fn new(
        current_branch: Option<String>,
        staged_files: Vec<String>,
        modified_files: Vec<String>,
        untracked_files: Vec<String>,
    ) -> Self {
        let has_changes =
            !(staged_files.is_empty() && modified_files.is_empty() && untracked_files.is_empty());
        Self {
            is_initialized: true,
            current_branch,
            has_changes,
            staged_files,
            modified_files,
            untracked_files,
        }
    }

    /// Status reported for a directory that has no repository yet
    pub fn uninitialized() -> Self {
        Self {
            is_initialized: false,
            current_branch: None,
            has_changes: false,
            staged_files: Vec::new(),
            modified_files: Vec::new(),
            untracked_files: Vec::new(),
        }
    }

    /// Total number of distinct paths reported across the three groups
    pub fn changed_file_count(&self) -> usize {
        self.staged_files.len() + self.modified_files.len() + self.untracked_files.len()
    }
}

/// A single commit in a history listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    pub author: String,
    /// RFC 3339 timestamp in the committer's recorded offset
    pub timestamp: String,
}

/// History of a branch, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitList {
    pub branch: String,
    pub commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
}

/// Represents a file diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    pub status: ChangeKind,
    pub insertions: usize,
    pub deletions: usize,
    pub patch: String,
}

/// Two-tree comparison between commits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDiff {
    pub from_sha: String,
    pub to_sha: String,
    pub files_changed: Vec<FileChange>,
    pub insertions: usize,
    pub deletions: usize,
}

impl CommitDiff {
    /// Aggregate counts are always the sum of the per-file counts
    pub fn from_files(from_sha: String, to_sha: String, files_changed: Vec<FileChange>) -> Self {
        let insertions = files_changed.iter().map(|f| f.insertions).sum();
        let deletions = files_changed.iter().map(|f| f.deletions).sum();
        Self {
            from_sha,
            to_sha,
            files_changed,
            insertions,
            deletions,
        }
    }
}

/// Represents a git branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub name: String,
    pub is_current: bool,
    pub last_commit_sha: String,
    pub last_commit_message: String,
}

/// Name and email recorded on commits made through the tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

/// Outcome of staging everything and committing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(String),
    NoChanges,
}

/// How far a rollback rewrites repository state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetMode {
    /// Move the branch pointer only
    #[default]
    Soft,
    /// Move the branch pointer and reset the index
    Mixed,
    /// Move the branch pointer, reset the index, and overwrite tracked files.
    /// Uncommitted work is lost and cannot be recovered through this API.
    Hard,
}

impl ResetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetMode::Soft => "soft",
            ResetMode::Mixed => "mixed",
            ResetMode::Hard => "hard",
        }
    }
}

impl fmt::Display for ResetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResetMode {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soft" => Ok(ResetMode::Soft),
            "mixed" => Ok(ResetMode::Mixed),
            "hard" => Ok(ResetMode::Hard),
            other => Err(RepoError::validation(format!(
                "unknown reset mode '{}' (expected soft, mixed, or hard)",
                other
            ))),
        }
    }
}

impl From<ResetMode> for git2::ResetType {
    fn from(mode: ResetMode) -> Self {
        match mode {
            ResetMode::Soft => git2::ResetType::Soft,
            ResetMode::Mixed => git2::ResetType::Mixed,
            ResetMode::Hard => git2::ResetType::Hard,
        }
    }
}
