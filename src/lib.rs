// Module declarations
pub mod commands;
pub mod config;
pub mod git;
pub mod shutdown;
mod utils;

// Transports (HTTP command proxy and stdio)
pub mod server;

pub use git::{
    BranchInfo, CommitDiff, CommitList, CommitRecord, FileChange, GitManager, RepoError,
    RepoResult, RepoStatus, ResetMode,
};
pub use utils::short_sha;
