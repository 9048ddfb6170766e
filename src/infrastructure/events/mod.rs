//! Events Layer - 出站事件推送
//!
//! 通过 broadcast 通道把播放事件推送给 WebSocket 客户端

mod publisher;

pub use publisher::{EventPublisher, WsEvent};
