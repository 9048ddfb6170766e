//! Ping Handler
//!
//! 健康检查，附带播放队列状态

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::{AiState, QueueStatus};
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub ai_state: AiState,
    pub queue: QueueStatus,
    pub clients: usize,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        ai_state: state.ai_state.get(),
        queue: state.task_queue.status(),
        clients: state.event_publisher.client_count(),
    })
}
