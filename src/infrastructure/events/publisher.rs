//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::AiState;
use crate::domain::chat::DisplayText;

/// WebSocket 出站事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WsEvent {
    /// 开始播放一段音频
    AudioPlayStart {
        display_text: DisplayText,
        /// 已转发标记，接收方据此避免再次转发
        forwarded: bool,
    },
    /// 本地播放队列已排空
    FrontendPlaybackComplete,
    /// AI 状态变更
    AiStateChanged { state: AiState },
    /// 仅发送给单个客户端的错误
    Error { message: String },
}

/// 事件发布器
pub struct EventPublisher {
    /// client_id -> broadcast sender（定向事件）
    client_channels: DashMap<String, broadcast::Sender<WsEvent>>,
    /// 全局广播
    global_channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (global_tx, _) = broadcast::channel(100);
        Self {
            client_channels: DashMap::new(),
            global_channel: global_tx,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅全局事件
    pub fn subscribe_global(&self) -> broadcast::Receiver<WsEvent> {
        self.global_channel.subscribe()
    }

    /// 注册客户端的定向事件通道
    pub fn register_client(&self, client_id: &str) -> broadcast::Receiver<WsEvent> {
        if let Some(sender) = self.client_channels.get(client_id) {
            return sender.subscribe();
        }

        let (tx, rx) = broadcast::channel(16);
        self.client_channels.insert(client_id.to_string(), tx);
        rx
    }

    /// 取消注册客户端
    pub fn unregister_client(&self, client_id: &str) {
        self.client_channels.remove(client_id);
    }

    /// 已注册客户端数量
    pub fn client_count(&self) -> usize {
        self.client_channels.len()
    }

    /// 发布开始播放事件
    pub fn publish_audio_play_start(&self, display_text: &DisplayText) {
        self.publish_global(WsEvent::AudioPlayStart {
            display_text: display_text.clone(),
            forwarded: true,
        });
    }

    /// 发布播放完成事件
    pub fn publish_playback_complete(&self) {
        self.publish_global(WsEvent::FrontendPlaybackComplete);
    }

    /// 发布 AI 状态变更事件
    pub fn publish_ai_state(&self, state: AiState) {
        self.publish_global(WsEvent::AiStateChanged { state });
    }

    /// 发送错误给指定客户端
    pub fn publish_error(&self, client_id: &str, message: &str) {
        if let Some(sender) = self.client_channels.get(client_id) {
            if let Err(e) = sender.send(WsEvent::Error {
                message: message.to_string(),
            }) {
                tracing::debug!(
                    client_id = %client_id,
                    error = %e,
                    "Failed to publish error event (no receivers)"
                );
            }
        }
    }

    fn publish_global(&self, event: WsEvent) {
        if let Err(e) = self.global_channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event = WsEvent::AudioPlayStart {
            display_text: DisplayText::new("hello"),
            forwarded: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "audio-play-start");
        assert_eq!(json["display_text"]["text"], "hello");
        assert_eq!(json["forwarded"], true);

        let json = serde_json::to_string(&WsEvent::FrontendPlaybackComplete).unwrap();
        assert_eq!(json, r#"{"type":"frontend-playback-complete"}"#);

        let json = serde_json::to_value(WsEvent::AiStateChanged {
            state: AiState::ThinkingSpeaking,
        })
        .unwrap();
        assert_eq!(json["state"], "thinking-speaking");
    }

    #[tokio::test]
    async fn test_global_and_client_channels() {
        let publisher = EventPublisher::new();
        let mut global = publisher.subscribe_global();
        let mut client = publisher.register_client("c1");

        publisher.publish_playback_complete();
        publisher.publish_error("c1", "bad message");
        publisher.publish_error("unknown", "ignored");

        assert_eq!(global.recv().await.unwrap(), WsEvent::FrontendPlaybackComplete);
        assert_eq!(
            client.recv().await.unwrap(),
            WsEvent::Error {
                message: "bad message".to_string()
            }
        );

        publisher.unregister_client("c1");
        assert_eq!(publisher.client_count(), 0);
    }
}
