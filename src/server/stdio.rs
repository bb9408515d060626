//! Line-delimited JSON transport over stdin/stdout
//!
//! Each input line is an `{"cmd": ..., "args": {...}}` request; each output
//! line is the matching `{success, data | error}` response. Logging goes to
//! stderr so stdout carries responses only.

use super::proxy::{InvokeRequest, InvokeResponse};
use super::ServerAppState;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Serve requests from stdin until EOF or shutdown
pub async fn run_stdio(state: ServerAppState) -> Result<(), String> {
    log::info!("Serving tools over stdio");
    let reader = BufReader::new(tokio::io::stdin());
    serve_lines(reader, tokio::io::stdout(), &state).await
}

/// Serve requests from any line source; blank lines are skipped
pub async fn serve_lines<R, W>(reader: R, mut writer: W, state: &ServerAppState) -> Result<(), String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.map_err(|e| format!("Failed to read request: {}", e))?,
            _ = state.shutdown_state.wait_for_shutdown() => {
                log::info!("Shutdown signal received, stopping stdio transport...");
                break;
            }
        };

        let Some(line) = line else {
            log::debug!("stdin closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&line, state).await;
        let mut payload = serde_json::to_string(&response).map_err(|e| e.to_string())?;
        payload.push('\n');

        writer
            .write_all(payload.as_bytes())
            .await
            .map_err(|e| format!("Failed to write response: {}", e))?;
        writer
            .flush()
            .await
            .map_err(|e| format!("Failed to write response: {}", e))?;
    }

    Ok(())
}

async fn handle_line(line: &str, state: &ServerAppState) -> InvokeResponse {
    let req: InvokeRequest = match serde_json::from_str(line) {
        Ok(req) => req,
        Err(e) => return InvokeResponse::failed(format!("Invalid request: {}", e)),
    };

    log::debug!("stdio command: {}", req.cmd);
    let cmd = req.cmd.clone();
    let result = state.dispatch(req.cmd, req.args).await;
    if let Err(ref e) = result {
        log::warn!("Command {} failed: {}", cmd, e);
    }
    InvokeResponse::from_result(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GitToolState;
    use crate::shutdown::ShutdownState;
    use serde_json::Value;
    use tempfile::TempDir;

    async fn run(input: &str, state: &ServerAppState) -> Vec<Value> {
        let mut output = Vec::new();
        serve_lines(input.as_bytes(), &mut output, state).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_one_response_per_request() {
        let temp_dir = TempDir::new().unwrap();
        let state = ServerAppState::new(
            GitToolState::new(Some(temp_dir.path().to_path_buf()), None),
            ShutdownState::new(),
        );

        let input = concat!(
            "{\"cmd\": \"initialize_repo\"}\n",
            "\n",
            "not json\n",
            "{\"cmd\": \"list_branches\", \"args\": {}}\n",
        );
        let responses = run(input, &state).await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["success"], true);
        assert_eq!(responses[1]["success"], false);
        assert!(responses[1]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request"));
        assert_eq!(
            responses[2]["data"],
            "No branches (repository has no commits yet)"
        );
    }

    #[tokio::test]
    async fn test_stops_when_shutdown_requested() {
        let state = ServerAppState::new(GitToolState::default(), ShutdownState::new());
        state.shutdown_state.request_shutdown();

        // A reader that never yields a line
        let (_keep_open, pending) = tokio::io::duplex(64);
        let mut output = Vec::new();
        tokio::time::timeout(
            std::time::Duration::from_secs(2),
            serve_lines(BufReader::new(pending), &mut output, &state),
        )
        .await
        .expect("transport should stop on shutdown")
        .unwrap();
        assert!(output.is_empty());
    }
}
