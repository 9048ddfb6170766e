//! Companion - 桌面伴侣的对话播放后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - content_splitter: 流式回复的普通文本 / 特殊内容分割
//! - thinking: 括号思考片段检测与过滤
//! - chat: 聊天消息与显示文本
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TaskQueue, Playback, ChatHistory, AiState）
//! - Commands: 音频任务、打断、合成完成、AI 状态
//! - Queries: 消息分割、聊天记录
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: 顺序任务队列、聊天记录、AI 状态内存实现
//! - Adapters: 播放器
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
