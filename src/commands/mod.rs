// Tool command implementations

pub mod commit_message;
pub mod git;

pub use commit_message::{generate_commit_message, CommitMessageStyle};
pub use git::GitToolState;
