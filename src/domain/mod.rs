//! Domain Layer - 领域层
//!
//! - Chat Context: 聊天消息与思考片段处理
//! - 内容分割器：流式文本的普通/特殊内容拆分
//! - 思考片段检测

pub mod chat;
pub mod content_splitter;
pub mod thinking;

pub use content_splitter::{split_message_content, subtitle_text, SplitContent};
pub use thinking::{filter_thinking_content, is_thinking};
