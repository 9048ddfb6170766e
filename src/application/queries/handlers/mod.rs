//! Query Handlers 实现

mod message_handlers;

pub use message_handlers::*;
