//! Server functions bridging the client UI to the upstream fetch logic.
//! Callable from both web (WASM) and desktop clients.

use dioxus::prelude::*;

use crate::model::LogRecord;

/// Fetch all logs from the upstream API, parsed and sorted newest-first.
/// Calls are never cached; every invocation hits the upstream. Any failure
/// in the pipeline (config, network, non-2xx upstream) becomes one
/// 500-class error whose body carries the message; no partial results.
#[server]
pub async fn fetch_logs() -> Result<Vec<LogRecord>, ServerFnError> {
    crate::upstream::fetch_upstream_logs().await.map_err(|e| {
        crate::log::app_log("ERROR", format!("Error fetching logs: {}", e));
        ServerFnError::new(e)
    })
}
