// Core business logic module

pub mod config;
pub mod status;

// Re-export commonly used items
pub use config::{Config, SinkKind};
pub use status::{CompositeLine, Compositor, Scheduler};
