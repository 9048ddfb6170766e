//! Memory Layer - In-Memory State Management
//!
//! 顺序播放队列、聊天记录与 AI 状态的内存实现

mod ai_state;
mod chat_history;
mod task_queue;

pub use ai_state::InMemoryAiState;
pub use chat_history::InMemoryChatHistory;
pub use task_queue::{
    SequentialTaskQueue, SequentialTaskQueueConfig, DEFAULT_TASK_INTERVAL_MS,
    DEFAULT_TASK_TIMEOUT_MS,
};
