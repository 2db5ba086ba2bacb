//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod settings;
pub mod transport;

pub use settings::*;
pub use transport::*;
