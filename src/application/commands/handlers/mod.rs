//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod audio_task_handlers;

pub use audio_task_handlers::*;
