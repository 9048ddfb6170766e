//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod ai_state;
mod chat_history;
mod playback;
mod task_queue;

pub use ai_state::{AiState, AiStatePort};
pub use chat_history::ChatHistoryPort;
pub use playback::{PlaybackError, PlaybackPort, PlaybackRequest};
pub use task_queue::{queue_task, QueueStatus, QueueTask, TaskError, TaskQueuePort};
