//! Command proxy handler that routes HTTP requests to the repository tools
//!
//! A single /api/invoke endpoint takes `{cmd, args}` and answers with
//! `{success, data | error}`. Routing lives in `routes/`.

use super::routes::tools::{tool_definitions, ToolDefinition};
use super::ServerAppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for /api/invoke endpoint
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    /// Command name (e.g., "get_repo_status", "commit_all_changes")
    pub cmd: String,
    /// Command arguments as JSON object
    #[serde(default)]
    pub args: Value,
}

/// Response body for /api/invoke endpoint
#[derive(Debug, Serialize)]
pub struct InvokeResponse {
    /// Whether the command succeeded
    pub success: bool,
    /// Result data (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error message (on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvokeResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    pub fn from_result(result: Result<Value, String>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failed(e),
        }
    }
}

/// Error type for invoke handler
pub struct InvokeError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for InvokeError {
    fn into_response(self) -> Response {
        (self.status, Json(InvokeResponse::failed(self.message))).into_response()
    }
}

/// Main invoke handler - routes commands to their implementations
pub async fn invoke_handler(
    State(state): State<ServerAppState>,
    Json(req): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, InvokeError> {
    log::debug!("Invoke command: {} with args: {:?}", req.cmd, req.args);

    let cmd = req.cmd.clone();
    match state.dispatch(req.cmd, req.args).await {
        Ok(data) => Ok(Json(InvokeResponse::ok(data))),
        Err(e) => {
            log::warn!("Command {} failed: {}", cmd, e);
            Err(InvokeError {
                status: StatusCode::BAD_REQUEST,
                message: e,
            })
        }
    }
}

/// Tool discovery endpoint
pub async fn tools_handler() -> Json<Vec<ToolDefinition>> {
    Json(tool_definitions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GitToolState;
    use crate::shutdown::ShutdownState;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_invoke_request_deserialization() {
        let json = r#"{"cmd": "list_commits", "args": {"repo_path": "/tmp/test", "limit": 5}}"#;
        let req: InvokeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.cmd, "list_commits");
        assert_eq!(req.args["repo_path"], "/tmp/test");
        assert_eq!(req.args["limit"], 5);
    }

    #[test]
    fn test_invoke_request_without_args() {
        let req: InvokeRequest = serde_json::from_str(r#"{"cmd": "list_tools"}"#).unwrap();
        assert!(req.args.is_null());
    }

    #[test]
    fn test_invoke_response_serialization() {
        let json = serde_json::to_string(&InvokeResponse::ok(json!("abc1234"))).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":\"abc1234\""));
        assert!(!json.contains("error"));

        let json = serde_json::to_string(&InvokeResponse::failed("boom".into())).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"boom\""));
        assert!(!json.contains("data"));
    }

    #[tokio::test]
    async fn test_invoke_handler_success_and_failure() {
        let temp_dir = TempDir::new().unwrap();
        let state = ServerAppState::new(
            GitToolState::new(Some(temp_dir.path().to_path_buf()), None),
            ShutdownState::new(),
        );

        let ok = invoke_handler(
            State(state.clone()),
            Json(InvokeRequest {
                cmd: "initialize_repo".into(),
                args: json!({}),
            }),
        )
        .await;
        let Json(body) = ok.ok().expect("initialize_repo should succeed");
        assert!(body.success);
        assert!(body.data.unwrap().as_str().unwrap().starts_with("Initialized"));

        let failed = invoke_handler(
            State(state),
            Json(InvokeRequest {
                cmd: "switch_branch".into(),
                args: json!({"branch_name": "missing"}),
            }),
        )
        .await;
        let response = failed.err().expect("switch to missing branch should fail").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
