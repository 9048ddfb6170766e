//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TaskQueue、Playback、ChatHistory、AiState）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    AddAudioTaskCommand,
    AddAudioTaskResponse,
    BackendSynthCompleteCommand,
    InterruptCommand,
    InterruptResponse,
    SetAiStateCommand,
    SetAiStateResponse,
    // Handlers
    handlers::{AddAudioTaskHandler, InterruptHandler, PlaybackCompleteHandler, SetAiStateHandler},
};

pub use error::ApplicationError;

pub use ports::{
    queue_task, AiState, AiStatePort, ChatHistoryPort, PlaybackError, PlaybackPort,
    PlaybackRequest, QueueStatus, QueueTask, TaskError, TaskQueuePort,
};

pub use queries::{
    ChatHistoryResponse,
    GetChatHistoryQuery,
    SplitMessageQuery,
    SplitMessageResponse,
    // Handlers
    handlers::{GetChatHistoryHandler, SplitMessageHandler},
};
