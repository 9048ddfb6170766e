//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                  GET   健康检查
//! - /api/message/split         POST  分割消息（普通文本 / 特殊内容 / 思考状态）
//! - /api/chat/history          GET   聊天记录与字幕
//! - /api/audio/task            POST  添加音频播放任务
//! - /api/audio/interrupt       POST  打断播放并清空队列
//! - /api/audio/state           POST  设置 AI 状态
//! - /api/audio/synth-complete  POST  后端合成完成，队列排空后返回
//! - /ws                        WS    双向事件通道

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws", get(handlers::websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/message", message_routes())
        .route("/chat/history", get(handlers::chat_history))
        .nest("/audio", audio_routes())
}

/// Message 路由
fn message_routes() -> Router<Arc<AppState>> {
    Router::new().route("/split", post(handlers::split_message))
}

/// Audio 路由
fn audio_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/task", post(handlers::add_audio_task))
        .route("/interrupt", post(handlers::interrupt))
        .route("/state", post(handlers::set_ai_state))
        .route("/synth-complete", post(handlers::synth_complete))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::state::tests::test_state;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        create_routes().with_state(Arc::new(test_state()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let request = Request::builder().uri("/api/ping").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["ai_state"], "idle");
        assert_eq!(body["queue"]["pending"], 0);
    }

    #[tokio::test]
    async fn test_split_message() {
        let request = post_json(
            "/api/message/split",
            json!({ "content": "（想一想）看代码：\n```rust\nfn main() {}\n```" }),
        );
        let response = app().oneshot(request).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["errno"], 0);
        let data = &body["data"];
        assert_eq!(data["plain_text"], "（想一想）看代码：");
        assert_eq!(data["special_content"], "```rust\nfn main() {}\n```");
        assert_eq!(data["is_special_content_complete"], true);
        assert_eq!(data["is_thinking"], false);
        assert_eq!(data["display_text"], "看代码：");
    }

    #[tokio::test]
    async fn test_invalid_audio_payload_returns_envelope_error() {
        let request = post_json("/api/audio/task", json!({ "audio": "not base64!" }));
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["errno"], 400);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_interrupt_then_audio_is_skipped() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json("/api/audio/interrupt", json!({})))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["data"]["dropped"], 0);

        let response = app
            .oneshot(post_json(
                "/api/audio/task",
                json!({ "display_text": { "text": "hi" } }),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["data"]["queued"], false);
    }

    #[tokio::test]
    async fn test_chat_history_after_text_only_task() {
        let state = Arc::new(test_state());
        let app = create_routes().with_state(state.clone());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/audio/task",
                json!({ "display_text": { "text": "你好", "name": "Mao" } }),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["data"]["queued"], true);

        state.task_queue.wait_for_completion().await;

        let request = Request::builder()
            .uri("/api/chat/history")
            .body(Body::empty())
            .unwrap();
        let body = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(body["data"]["full_response"], "你好");
        assert_eq!(body["data"]["messages"][0]["content"], "你好");
        assert_eq!(body["data"]["messages"][0]["name"], "Mao");
    }

    #[tokio::test]
    async fn test_synth_complete_reports_notification() {
        let response = app()
            .oneshot(post_json("/api/audio/synth-complete", json!({})))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["data"]["notified"], true);
    }
}
