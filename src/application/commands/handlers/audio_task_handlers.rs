//! Audio Task Command Handlers
//!
//! 把后端下发的音频片段转换为顺序队列中的播放任务

use base64::prelude::{Engine, BASE64_STANDARD};
use std::sync::Arc;

use crate::application::commands::{
    AddAudioTaskCommand, AddAudioTaskResponse, BackendSynthCompleteCommand, InterruptCommand,
    InterruptResponse, SetAiStateCommand, SetAiStateResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    queue_task, AiState, AiStatePort, ChatHistoryPort, PlaybackPort, PlaybackRequest, TaskError,
    TaskQueuePort,
};
use crate::domain::chat::{ChatMessage, DisplayText, Expression};
use crate::infrastructure::events::EventPublisher;

/// 一次播放任务所需的全部数据
struct PlaybackJob {
    audio: Vec<u8>,
    volumes: Vec<f32>,
    slice_length_ms: u64,
    display_text: Option<DisplayText>,
    expression: Option<Expression>,
    forwarded: bool,
    playback: Arc<dyn PlaybackPort>,
    chat_history: Arc<dyn ChatHistoryPort>,
    ai_state: Arc<dyn AiStatePort>,
    event_publisher: Arc<EventPublisher>,
}

impl PlaybackJob {
    async fn run(self) -> Result<(), TaskError> {
        // 入队后可能已被打断
        if self.ai_state.is_interrupted() {
            tracing::warn!(state = AiState::Interrupted.as_str(), "Audio playback blocked");
            return Ok(());
        }

        if let Some(display_text) = &self.display_text {
            // 新回复的第一个片段：开始新一轮完整回复
            if let Some(message_id) = &display_text.message_id {
                if !self.chat_history.contains_message(message_id) {
                    self.chat_history.clear_response();
                    tracing::debug!(message_id = %message_id, "New response started");
                }
            }
            self.chat_history.append_response(&display_text.text);

            let mut message = ChatMessage::ai(display_text.text.clone())
                .with_speaker(display_text.name.clone(), display_text.avatar.clone());
            if let Some(message_id) = &display_text.message_id {
                message = message.with_id(message_id.clone());
            }
            self.chat_history.append_message(message);

            if !self.audio.is_empty() {
                self.chat_history.set_subtitle(&display_text.text);
            }

            if !self.forwarded {
                self.event_publisher.publish_audio_play_start(display_text);
            }
        }

        self.playback
            .play(PlaybackRequest {
                audio: self.audio,
                volumes: self.volumes,
                slice_length_ms: self.slice_length_ms,
                expression: self.expression,
            })
            .await
            .map_err(|e| TaskError::failed(e.to_string()))
    }
}

/// AddAudioTask Handler - 添加音频播放任务
pub struct AddAudioTaskHandler {
    task_queue: Arc<dyn TaskQueuePort>,
    playback: Arc<dyn PlaybackPort>,
    chat_history: Arc<dyn ChatHistoryPort>,
    ai_state: Arc<dyn AiStatePort>,
    event_publisher: Arc<EventPublisher>,
}

impl AddAudioTaskHandler {
    pub fn new(
        task_queue: Arc<dyn TaskQueuePort>,
        playback: Arc<dyn PlaybackPort>,
        chat_history: Arc<dyn ChatHistoryPort>,
        ai_state: Arc<dyn AiStatePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            task_queue,
            playback,
            chat_history,
            ai_state,
            event_publisher,
        }
    }

    pub fn handle(&self, cmd: AddAudioTaskCommand) -> Result<AddAudioTaskResponse, ApplicationError> {
        if self.ai_state.is_interrupted() {
            tracing::info!("Skipping audio task due to interrupted state");
            return Ok(AddAudioTaskResponse {
                queued: false,
                pending: self.task_queue.status().pending,
            });
        }

        let audio = match cmd.audio_base64.as_deref().filter(|s| !s.is_empty()) {
            Some(encoded) => BASE64_STANDARD
                .decode(encoded)
                .map_err(|e| ApplicationError::validation(format!("Invalid audio payload: {}", e)))?,
            None => Vec::new(),
        };

        tracing::info!(
            text = cmd.display_text.as_ref().map(|t| t.text.as_str()).unwrap_or_default(),
            audio_bytes = audio.len(),
            forwarded = cmd.forwarded,
            "Adding audio task to queue"
        );

        let job = PlaybackJob {
            audio,
            volumes: cmd.volumes,
            slice_length_ms: cmd.slice_length,
            display_text: cmd.display_text,
            expression: cmd.expressions.into_iter().next(),
            forwarded: cmd.forwarded,
            playback: self.playback.clone(),
            chat_history: self.chat_history.clone(),
            ai_state: self.ai_state.clone(),
            event_publisher: self.event_publisher.clone(),
        };
        self.task_queue.add_task(queue_task(move || job.run()));

        Ok(AddAudioTaskResponse {
            queued: true,
            pending: self.task_queue.status().pending,
        })
    }
}

/// Interrupt Handler - 打断播放
pub struct InterruptHandler {
    task_queue: Arc<dyn TaskQueuePort>,
    ai_state: Arc<dyn AiStatePort>,
    event_publisher: Arc<EventPublisher>,
}

impl InterruptHandler {
    pub fn new(
        task_queue: Arc<dyn TaskQueuePort>,
        ai_state: Arc<dyn AiStatePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            task_queue,
            ai_state,
            event_publisher,
        }
    }

    pub fn handle(&self, _cmd: InterruptCommand) -> InterruptResponse {
        if self.ai_state.set(AiState::Interrupted) != AiState::Interrupted {
            self.event_publisher.publish_ai_state(AiState::Interrupted);
        }
        let dropped = self.task_queue.clear_queue();

        tracing::info!(dropped = dropped, "Playback interrupted");
        InterruptResponse { dropped }
    }
}

/// SetAiState Handler - 设置 AI 状态
pub struct SetAiStateHandler {
    ai_state: Arc<dyn AiStatePort>,
    event_publisher: Arc<EventPublisher>,
}

impl SetAiStateHandler {
    pub fn new(ai_state: Arc<dyn AiStatePort>, event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            ai_state,
            event_publisher,
        }
    }

    pub fn handle(&self, cmd: SetAiStateCommand) -> SetAiStateResponse {
        let previous = self.ai_state.set(cmd.state);
        if previous != cmd.state {
            self.event_publisher.publish_ai_state(cmd.state);
        }
        SetAiStateResponse {
            previous,
            state: cmd.state,
        }
    }
}

/// BackendSynthComplete Handler - 播放排空后通知后端
#[derive(Clone)]
pub struct PlaybackCompleteHandler {
    task_queue: Arc<dyn TaskQueuePort>,
    ai_state: Arc<dyn AiStatePort>,
    event_publisher: Arc<EventPublisher>,
}

impl PlaybackCompleteHandler {
    pub fn new(
        task_queue: Arc<dyn TaskQueuePort>,
        ai_state: Arc<dyn AiStatePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            task_queue,
            ai_state,
            event_publisher,
        }
    }

    /// 后台等待，立即返回
    pub fn handle(&self, _cmd: BackendSynthCompleteCommand) -> tokio::task::JoinHandle<bool> {
        let handler = self.clone();
        tokio::spawn(async move { handler.wait_and_notify().await })
    }

    /// 等待队列排空后发布播放完成事件，返回是否已发布
    pub async fn wait_and_notify(&self) -> bool {
        self.task_queue.wait_for_completion().await;

        if self.ai_state.is_interrupted() {
            tracing::debug!("Playback complete suppressed: interrupted");
            return false;
        }

        self.event_publisher.publish_playback_complete();
        tracing::info!("Frontend playback complete");
        true
    }
}
