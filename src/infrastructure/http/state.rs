//! Application State
//!
//! 各 Port 与 Command/Query Handlers 的共享状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddAudioTaskHandler, InterruptHandler, PlaybackCompleteHandler, SetAiStateHandler,
    // Query handlers
    GetChatHistoryHandler, SplitMessageHandler,
    // Ports
    AiStatePort, ChatHistoryPort, PlaybackPort, TaskQueuePort,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub task_queue: Arc<dyn TaskQueuePort>,
    pub chat_history: Arc<dyn ChatHistoryPort>,
    pub ai_state: Arc<dyn AiStatePort>,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub add_audio_task_handler: AddAudioTaskHandler,
    pub interrupt_handler: InterruptHandler,
    pub set_ai_state_handler: SetAiStateHandler,
    pub playback_complete_handler: PlaybackCompleteHandler,

    // ========== Query Handlers ==========
    pub split_message_handler: SplitMessageHandler,
    pub get_chat_history_handler: GetChatHistoryHandler,
}

impl AppState {
    pub fn new(
        task_queue: Arc<dyn TaskQueuePort>,
        playback: Arc<dyn PlaybackPort>,
        chat_history: Arc<dyn ChatHistoryPort>,
        ai_state: Arc<dyn AiStatePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            // Command handlers
            add_audio_task_handler: AddAudioTaskHandler::new(
                task_queue.clone(),
                playback,
                chat_history.clone(),
                ai_state.clone(),
                event_publisher.clone(),
            ),
            interrupt_handler: InterruptHandler::new(
                task_queue.clone(),
                ai_state.clone(),
                event_publisher.clone(),
            ),
            set_ai_state_handler: SetAiStateHandler::new(ai_state.clone(), event_publisher.clone()),
            playback_complete_handler: PlaybackCompleteHandler::new(
                task_queue.clone(),
                ai_state.clone(),
                event_publisher.clone(),
            ),

            // Query handlers
            split_message_handler: SplitMessageHandler::new(),
            get_chat_history_handler: GetChatHistoryHandler::new(
                chat_history.clone(),
                ai_state.clone(),
                task_queue.clone(),
            ),

            // Ports
            task_queue,
            chat_history,
            ai_state,
            event_publisher,
        }
    }
}
