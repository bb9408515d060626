//! Tool definitions for discovery by tool-calling clients

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Boolean,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ToolParameter>,
}

fn required(name: &'static str, param_type: ParameterType, description: &'static str) -> ToolParameter {
    ToolParameter {
        name,
        param_type,
        required: true,
        default: None,
        description,
    }
}

fn optional(
    name: &'static str,
    param_type: ParameterType,
    default: Option<Value>,
    description: &'static str,
) -> ToolParameter {
    ToolParameter {
        name,
        param_type,
        required: false,
        default,
        description,
    }
}

fn repo_path() -> ToolParameter {
    optional(
        "repo_path",
        ParameterType::String,
        None,
        "Path to the repository directory (defaults to the configured repository)",
    )
}

/// Every tool the server exposes, in a stable order
pub fn tool_definitions() -> Vec<ToolDefinition> {
    use ParameterType::*;

    vec![
        ToolDefinition {
            name: "initialize_repo",
            description: "Initialize a git repository. Safe to call on an already-initialized repository.",
            parameters: vec![
                repo_path(),
                optional("initial_commit", Boolean, Some(json!(true)), "Commit existing files after initializing"),
            ],
        },
        ToolDefinition {
            name: "get_repo_status",
            description: "Show initialization state, current branch, and uncommitted changes.",
            parameters: vec![repo_path()],
        },
        ToolDefinition {
            name: "commit_all_changes",
            description: "Stage all modified, deleted, and new files and commit them. Initializes the repository if needed.",
            parameters: vec![
                repo_path(),
                required("message", String, "Commit message describing the changes"),
            ],
        },
        ToolDefinition {
            name: "list_commits",
            description: "List commits on a branch, newest first.",
            parameters: vec![
                repo_path(),
                optional("branch", String, Some(json!("HEAD")), "Branch name or HEAD for the current branch"),
                optional("limit", Integer, Some(json!(50)), "Maximum number of commits to return"),
            ],
        },
        ToolDefinition {
            name: "rollback_to_commit",
            description: "Reset the current branch to a commit. WARNING: 'hard' mode discards all uncommitted changes and cannot be undone.",
            parameters: vec![
                repo_path(),
                required("commit_sha", String, "Commit to roll back to"),
                optional("mode", String, Some(json!("soft")), "soft keeps changes staged, mixed unstages them, hard discards them"),
            ],
        },
        ToolDefinition {
            name: "compare_commits",
            description: "Show files changed, lines added and deleted, and patches between two commits.",
            parameters: vec![
                repo_path(),
                required("from_commit", String, "Source commit (older)"),
                required("to_commit", String, "Target commit (newer)"),
            ],
        },
        ToolDefinition {
            name: "create_branch",
            description: "Create a branch from HEAD or a given ref without switching to it.",
            parameters: vec![
                repo_path(),
                required("branch_name", String, "Name for the new branch"),
                optional("from_ref", String, None, "Commit or branch to start from"),
            ],
        },
        ToolDefinition {
            name: "switch_branch",
            description: "Check out a branch. Refuses when uncommitted changes would be overwritten.",
            parameters: vec![
                repo_path(),
                required("branch_name", String, "Branch to switch to"),
            ],
        },
        ToolDefinition {
            name: "list_branches",
            description: "List local branches with the current branch marked.",
            parameters: vec![repo_path()],
        },
        ToolDefinition {
            name: "generate_commit_message",
            description: "Suggest a commit message for the uncommitted changes.",
            parameters: vec![
                repo_path(),
                optional("style", String, Some(json!("conventional")), "conventional or simple"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::routes::git_routes::GIT_COMMANDS;

    #[test]
    fn test_every_routed_command_has_a_definition() {
        let names: Vec<&str> = tool_definitions().iter().map(|t| t.name).collect();
        assert_eq!(names, GIT_COMMANDS);
    }

    #[test]
    fn test_definitions_serialize_with_types() {
        let value = serde_json::to_value(tool_definitions()).unwrap();
        let list_commits = &value[3];
        assert_eq!(list_commits["name"], "list_commits");
        assert_eq!(list_commits["parameters"][2]["type"], "integer");
        assert_eq!(list_commits["parameters"][2]["default"], 50);
        assert_eq!(list_commits["parameters"][0]["required"], false);
    }
}
