//! Transport Adapter - TTS HTTP 传输实现

mod fake_transport;
mod reqwest_transport;

pub use fake_transport::{FakeReply, FakeTransport, RecordedCall};
pub use reqwest_transport::*;
