//! Command routing modules
//!
//! - git_routes: repository tools
//! - tools: tool definitions served by `list_tools`

pub mod git_routes;
pub mod tools;

use serde_json::Value;

use crate::commands::GitToolState;

// =============================================================================
// Helper functions for use by route modules
// =============================================================================

/// Extract a required argument from JSON args
pub fn get_arg<T: serde::de::DeserializeOwned>(args: &Value, name: &str) -> Result<T, String> {
    serde_json::from_value(
        args.get(name)
            .ok_or_else(|| format!("Missing argument: {}", name))?
            .clone(),
    )
    .map_err(|e| format!("Invalid argument {}: {}", name, e))
}

/// Extract an optional argument from JSON args
pub fn get_opt_arg<T: serde::de::DeserializeOwned>(
    args: &Value,
    name: &str,
) -> Result<Option<T>, String> {
    match args.get(name) {
        Some(v) if !v.is_null() => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| format!("Invalid argument {}: {}", name, e)),
        _ => Ok(None),
    }
}

// =============================================================================
// Command Routing Macros
// =============================================================================

/// Routes a command whose handler returns a text result
#[macro_export]
macro_rules! route_text {
    ($handler:expr) => {{
        let text = $handler.map_err(|e| e.to_string())?;
        Ok(serde_json::Value::String(text))
    }};
}

pub use route_text;

// =============================================================================
// Main Command Dispatcher
// =============================================================================

/// Route a command to its implementation.
///
/// Runs git operations inline; async callers should move this onto a
/// blocking thread.
pub fn route_command(cmd: &str, args: Value, state: &GitToolState) -> Result<Value, String> {
    if cmd == "list_tools" {
        return serde_json::to_value(tools::tool_definitions()).map_err(|e| e.to_string());
    }

    if git_routes::is_git_command(cmd) {
        return git_routes::route_git_command(cmd, args, state);
    }

    Err(format!("Unknown command: {}", cmd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_get_arg_success() {
        let args = json!({"name": "test", "count": 42});
        let name: String = get_arg(&args, "name").unwrap();
        let count: i32 = get_arg(&args, "count").unwrap();
        assert_eq!(name, "test");
        assert_eq!(count, 42);
    }

    #[test]
    fn test_get_arg_missing() {
        let args = json!({"name": "test"});
        let result: Result<i32, String> = get_arg(&args, "missing");
        assert!(result.unwrap_err().contains("Missing argument: missing"));
    }

    #[test]
    fn test_get_opt_arg_treats_null_as_absent() {
        let args = json!({"name": "test", "branch": null});
        let name: Option<String> = get_opt_arg(&args, "name").unwrap();
        let branch: Option<String> = get_opt_arg(&args, "branch").unwrap();
        let missing: Option<String> = get_opt_arg(&args, "missing").unwrap();
        assert_eq!(name, Some("test".to_string()));
        assert_eq!(branch, None);
        assert_eq!(missing, None);
    }

    #[test]
    fn test_get_opt_arg_rejects_wrong_type() {
        let args = json!({"limit": "ten"});
        let result: Result<Option<usize>, String> = get_opt_arg(&args, "limit");
        assert!(result.unwrap_err().contains("Invalid argument limit"));
    }

    #[test]
    fn test_unknown_command() {
        let state = GitToolState::default();
        let err = route_command("push_everything", json!({}), &state).unwrap_err();
        assert_eq!(err, "Unknown command: push_everything");
    }

    #[test]
    fn test_list_tools() {
        let state = GitToolState::default();
        let tools = route_command("list_tools", Value::Null, &state).unwrap();
        assert_eq!(tools.as_array().unwrap().len(), git_routes::GIT_COMMANDS.len());
    }

    #[test]
    fn test_routes_status_for_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let state = GitToolState::default();
        let args = json!({"repo_path": temp_dir.path().to_string_lossy()});

        let status = route_command("get_repo_status", args, &state).unwrap();
        let text = status.as_str().unwrap();
        assert!(text.contains("\"is_initialized\": false"));
    }

    #[test]
    fn test_missing_required_argument_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let state = GitToolState::default();
        let args = json!({"repo_path": temp_dir.path().to_string_lossy()});

        let err = route_command("commit_all_changes", args, &state).unwrap_err();
        assert_eq!(err, "Missing argument: message");
    }
}
