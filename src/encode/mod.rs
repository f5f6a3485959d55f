//! Frame sinks that turn rendered frames into files.

pub mod gif;
pub mod png;
pub mod sink;

pub use gif::GifSink;
pub use png::PngSink;
pub use sink::{FrameSink, InMemorySink, SinkConfig};
