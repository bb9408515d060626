//! Git operations using git2-rs
//!
//! This module provides the repository façade organized into focused submodules:
//! - `manager` - Core GitManager struct, initialization, and reference resolution
//! - `status` - Working tree / index status
//! - `commits` - Commit operations (commit, history, diff)
//! - `branches` - Branch operations (create, list, switch)
//! - `reset` - Rollback to an arbitrary commit
//! - `types` - Result shapes
//! - `error` - Error taxonomy

mod branches;
mod commits;
pub mod error;
mod manager;
mod reset;
mod status;
mod types;

// Re-export the main GitManager struct
pub use manager::{GitManager, DEFAULT_BRANCH, INITIAL_COMMIT_MESSAGE};

pub use error::{RepoError, RepoResult};
pub use types::{
    BranchInfo, ChangeKind, CommitDiff, CommitIdentity, CommitList, CommitOutcome, CommitRecord,
    FileChange, RepoStatus, ResetMode,
};
