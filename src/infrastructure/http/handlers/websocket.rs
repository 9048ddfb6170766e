//! WebSocket Handler
//!
//! 单一端点 `/ws`：入站消息驱动播放队列，出站推送播放与状态事件

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::application::{
    AddAudioTaskCommand, BackendSynthCompleteCommand, InterruptCommand, SetAiStateCommand,
};
use crate::infrastructure::http::dto::InboundMessage;
use crate::infrastructure::http::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let client_id = uuid::Uuid::new_v4().to_string();
    let mut client_rx = state.event_publisher.register_client(&client_id);
    let mut global_rx = state.event_publisher.subscribe_global();

    tracing::info!(client_id = %client_id, "WebSocket connected");

    // 事件转发任务
    let client_id_for_forward = client_id.clone();
    let forward_task = tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                r = global_rx.recv() => r,
                r = client_rx.recv() => r,
            };

            let event = match received {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        client_id = %client_id_for_forward,
                        skipped = skipped,
                        "WebSocket client lagging, events dropped"
                    );
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(
                    client_id = %client_id_for_forward,
                    error = %e,
                    "Failed to send WebSocket message"
                );
                break;
            }
        }
    });

    // 接收客户端消息
    let client_id_for_receive = client_id.clone();
    let receive_state = state.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    dispatch_inbound(&receive_state, &client_id_for_receive, &text);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(client_id = %client_id_for_receive, "WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(client_id = %client_id_for_receive, error = %e, "WebSocket error");
                    break;
                }
                // Ping/Pong 由 axum 处理
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = forward_task => {}
        _ = receive_task => {}
    }

    state.event_publisher.unregister_client(&client_id);
    tracing::info!(client_id = %client_id, "WebSocket disconnected");
}

/// 分发一条入站文本消息，错误只回给发送方
fn dispatch_inbound(state: &AppState, client_id: &str, text: &str) {
    let inbound: InboundMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!(client_id = %client_id, error = %e, "Invalid inbound message");
            state
                .event_publisher
                .publish_error(client_id, &format!("Invalid message: {}", e));
            return;
        }
    };

    match inbound {
        InboundMessage::Audio(req) => {
            if let Err(e) = state
                .add_audio_task_handler
                .handle(AddAudioTaskCommand::from(req))
            {
                tracing::warn!(client_id = %client_id, error = %e, "Audio task rejected");
                state.event_publisher.publish_error(client_id, &e.to_string());
            }
        }
        InboundMessage::BackendSynthComplete => {
            // 等待在后台进行，不阻塞后续消息
            let _ = state
                .playback_complete_handler
                .handle(BackendSynthCompleteCommand);
        }
        InboundMessage::InterruptSignal => {
            state.interrupt_handler.handle(InterruptCommand);
        }
        InboundMessage::FullText { text } => {
            state.chat_history.set_subtitle(&text);
        }
        InboundMessage::SetAiState { state: ai_state } => {
            state
                .set_ai_state_handler
                .handle(SetAiStateCommand { state: ai_state });
        }
    }
}
