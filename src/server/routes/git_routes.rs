//! Repository tool routing
//!
//! Handles: initialize_repo, get_repo_status, commit_all_changes, list_commits,
//! rollback_to_commit, compare_commits, create_branch, switch_branch,
//! list_branches, generate_commit_message
//!
//! `repo_path` is optional on every tool; the configured default is used
//! when it is omitted.

use crate::commands::{self, GitToolState};
use serde_json::Value;

use super::{get_arg, get_opt_arg, route_text};

/// Tool names handled by this router
pub const GIT_COMMANDS: &[&str] = &[
    "initialize_repo",
    "get_repo_status",
    "commit_all_changes",
    "list_commits",
    "rollback_to_commit",
    "compare_commits",
    "create_branch",
    "switch_branch",
    "list_branches",
    "generate_commit_message",
];

/// Check if a command is handled by this router
pub fn is_git_command(cmd: &str) -> bool {
    GIT_COMMANDS.contains(&cmd)
}

/// Route repository commands
pub fn route_git_command(cmd: &str, args: Value, state: &GitToolState) -> Result<Value, String> {
    let repo_path: Option<String> = get_opt_arg(&args, "repo_path")?;
    let repo_path = repo_path.as_deref();

    match cmd {
        "initialize_repo" => {
            let initial_commit: bool = get_opt_arg(&args, "initial_commit")?.unwrap_or(true);
            route_text!(commands::git::initialize_repo(
                repo_path,
                initial_commit,
                state
            ))
        }

        "get_repo_status" => route_text!(commands::git::get_repo_status(repo_path, state)),

        "commit_all_changes" => {
            let message: String = get_arg(&args, "message")?;
            route_text!(commands::git::commit_all_changes(
                repo_path, &message, state
            ))
        }

        "list_commits" => {
            let branch: Option<String> = get_opt_arg(&args, "branch")?;
            let limit: Option<usize> = get_opt_arg(&args, "limit")?;
            route_text!(commands::git::list_commits(
                repo_path,
                branch.as_deref(),
                limit,
                state
            ))
        }

        "rollback_to_commit" => {
            let commit_sha: String = get_arg(&args, "commit_sha")?;
            let mode: Option<String> = get_opt_arg(&args, "mode")?;
            route_text!(commands::git::rollback_to_commit(
                repo_path,
                &commit_sha,
                mode.as_deref(),
                state
            ))
        }

        "compare_commits" => {
            let from_commit: String = get_arg(&args, "from_commit")?;
            let to_commit: String = get_arg(&args, "to_commit")?;
            route_text!(commands::git::compare_commits(
                repo_path,
                &from_commit,
                &to_commit,
                state
            ))
        }

        "create_branch" => {
            let branch_name: String = get_arg(&args, "branch_name")?;
            let from_ref: Option<String> = get_opt_arg(&args, "from_ref")?;
            route_text!(commands::git::create_branch(
                repo_path,
                &branch_name,
                from_ref.as_deref(),
                state
            ))
        }

        "switch_branch" => {
            let branch_name: String = get_arg(&args, "branch_name")?;
            route_text!(commands::git::switch_branch(
                repo_path,
                &branch_name,
                state
            ))
        }

        "list_branches" => route_text!(commands::git::list_branches(repo_path, state)),

        "generate_commit_message" => {
            let style: Option<String> = get_opt_arg(&args, "style")?;
            route_text!(commands::generate_commit_message(
                repo_path,
                style.as_deref(),
                state
            ))
        }

        _ => Err(format!("Unknown git command: {}", cmd)),
    }
}
