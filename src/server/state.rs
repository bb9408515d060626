//! Server application state shared across handlers

use crate::commands::GitToolState;
use crate::shutdown::ShutdownState;
use std::sync::Arc;

/// Shared state for the HTTP and stdio transports
#[derive(Clone)]
pub struct ServerAppState {
    /// Repository tool state (default path and commit identity)
    pub tools: Arc<GitToolState>,

    /// Shutdown state
    pub shutdown_state: ShutdownState,
}

impl ServerAppState {
    pub fn new(tools: GitToolState, shutdown_state: ShutdownState) -> Self {
        Self {
            tools: Arc::new(tools),
            shutdown_state,
        }
    }

    /// Route a command on a blocking thread. git2 calls are synchronous and
    /// must not stall the runtime.
    pub async fn dispatch(&self, cmd: String, args: serde_json::Value) -> Result<serde_json::Value, String> {
        let tools = Arc::clone(&self.tools);
        tokio::task::spawn_blocking(move || super::routes::route_command(&cmd, args, &tools))
            .await
            .map_err(|e| format!("Command task failed: {}", e))?
    }
}
