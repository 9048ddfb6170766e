//! HTTP Handlers

mod audio;
mod message;
mod ping;
mod websocket;

pub use audio::*;
pub use message::*;
pub use ping::*;
pub use websocket::*;
