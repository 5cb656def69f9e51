// Platform-specific code module

pub mod handshake;
pub mod signals;
pub mod sink;
pub mod xkb;

// Re-exports para imports limpios
pub use handshake::handshake;
pub use signals::{block_notifications_during, install_layout_handler, NanoSleeper};
pub use sink::{StdoutSink, XRootSink};
pub use xkb::SetxkbmapQuery;
