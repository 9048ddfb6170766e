//! Audio Handlers - 播放任务与控制

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::{
    AddAudioTaskCommand, AddAudioTaskResponse, ApplicationError, BackendSynthCompleteCommand,
    InterruptCommand, InterruptResponse, SetAiStateCommand, SetAiStateResponse,
};
use crate::infrastructure::http::dto::{ApiResponse, AudioTaskRequest, SetAiStateRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn add_audio_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AudioTaskRequest>,
) -> Result<Json<ApiResponse<AddAudioTaskResponse>>, ApiError> {
    let result = state
        .add_audio_task_handler
        .handle(AddAudioTaskCommand::from(req))?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn interrupt(State(state): State<Arc<AppState>>) -> Json<ApiResponse<InterruptResponse>> {
    Json(ApiResponse::success(
        state.interrupt_handler.handle(InterruptCommand),
    ))
}

pub async fn set_ai_state(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetAiStateRequest>,
) -> Json<ApiResponse<SetAiStateResponse>> {
    Json(ApiResponse::success(
        state
            .set_ai_state_handler
            .handle(SetAiStateCommand { state: req.state }),
    ))
}

#[derive(Debug, Serialize)]
pub struct SynthCompleteResponse {
    /// 是否已发布播放完成事件
    pub notified: bool,
}

/// 等待播放队列排空后返回
pub async fn synth_complete(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SynthCompleteResponse>>, ApiError> {
    let notified = state
        .playback_complete_handler
        .handle(BackendSynthCompleteCommand)
        .await
        .map_err(|e| ApplicationError::internal(format!("Completion waiter failed: {}", e)))?;

    Ok(Json(ApiResponse::success(SynthCompleteResponse { notified })))
}
