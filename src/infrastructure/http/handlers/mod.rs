//! HTTP Handlers

mod catalog;
mod ping;
mod stats;
mod tts;

pub use catalog::*;
pub use ping::*;
pub use stats::*;
pub use tts::*;
