//! Transports for the repository tools
//!
//! HTTP mode serves the command proxy; stdio mode reads one JSON request per
//! line. Both route through `routes::route_command`.

mod proxy;
pub mod routes;
pub mod state;
mod stdio;

pub use proxy::{invoke_handler, tools_handler, InvokeRequest, InvokeResponse};
pub use routes::route_command;
pub use state::ServerAppState;
pub use stdio::{run_stdio, serve_lines};

use crate::config::ServerSettings;
use crate::utils::ResultExt;
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue,
    },
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Version information for the server
#[derive(serde::Serialize)]
struct VersionInfo {
    name: String,
    version: String,
}

/// Build the HTTP router
pub fn build_router(state: ServerAppState, cors_origins: &[String]) -> Router {
    let cors = if cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE, ACCEPT])
    } else {
        let allowed_origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE, ACCEPT])
    };

    Router::new()
        .route("/api/invoke", post(proxy::invoke_handler))
        .route("/api/tools", get(proxy::tools_handler))
        .route("/health", get(health_handler))
        .route("/api/version", get(version_handler))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server until shutdown is requested
pub async fn run_server(state: ServerAppState, settings: &ServerSettings) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", settings.bind, settings.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let app = build_router(state.clone(), &settings.cors_origins);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(&format!("Failed to bind to {}", addr))?;

    log::info!("Server listening on http://{}", addr);
    match state.tools.default_repo_path() {
        Some(path) => log::info!("Default repository: {}", path.display()),
        None => log::info!("No default repository; every call must pass repo_path"),
    }

    let shutdown_state = state.shutdown_state.clone();
    let shutdown_signal = async move {
        shutdown_state.wait_for_shutdown().await;
        log::info!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Version endpoint
async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GitToolState;
    use crate::shutdown::ShutdownState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        let state = ServerAppState::new(GitToolState::default(), ShutdownState::new());
        build_router(state, &[])
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invoke_without_default_repo_is_rejected() {
        let request = Request::post("/api/invoke")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"cmd": "get_repo_status", "args": {}}"#))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("repo_path is required"));
    }

    #[tokio::test]
    async fn test_tools_endpoint_lists_definitions() {
        let response = router()
            .oneshot(Request::get("/api/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let tools: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(tools[0]["name"], "initialize_repo");
    }
}
