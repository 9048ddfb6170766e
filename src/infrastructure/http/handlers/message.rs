//! Message Handlers - 文本分割与聊天记录

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    ChatHistoryResponse, GetChatHistoryQuery, SplitMessageQuery, SplitMessageResponse,
};
use crate::infrastructure::http::dto::{ApiResponse, SplitMessageRequest};
use crate::infrastructure::http::state::AppState;

pub async fn split_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SplitMessageRequest>,
) -> Json<ApiResponse<SplitMessageResponse>> {
    let result = state.split_message_handler.handle(SplitMessageQuery {
        content: req.content,
    });
    Json(ApiResponse::success(result))
}

pub async fn chat_history(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<ChatHistoryResponse>> {
    let result = state.get_chat_history_handler.handle(GetChatHistoryQuery);
    Json(ApiResponse::success(result))
}
