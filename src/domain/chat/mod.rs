//! Chat Context - 聊天记录上下文
//!
//! 职责:
//! - 聊天消息实体
//! - 显示文本与表情值对象
//! - 思考片段的消息级处理

mod entities;
mod processor;
mod value_objects;

pub use entities::{ChatMessage, Role};
pub use processor::{has_thinking_message, process_message, visible_messages};
pub use value_objects::{DisplayText, Expression};
