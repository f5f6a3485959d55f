//! Documentation-diagram generator.
//!
//! `docviz` renders a small gallery of project documentation images from
//! hand-authored layout data: an animated architecture flow GIF and two
//! still PNG posters. Diagrams are plain data ([`model::Diagram`]) rendered
//! on the CPU and streamed frame by frame into encoder sinks.
//!
//! The common entry point is [`pipeline::generate_all`], which writes all
//! three images into an output directory. For custom diagrams, build a
//! [`model::Diagram`] and hand it to [`pipeline::render_to_file`] or drive a
//! [`encode::FrameSink`] yourself via [`pipeline::render_diagram`].

#![forbid(unsafe_code)]

mod foundation;

pub mod anim;
pub mod diagrams;
pub mod encode;
pub mod model;
pub mod pipeline;
pub mod render;

pub use anim::{DEFAULT_FADE_SCALE, Progress, reveal_opacity};
pub use encode::{FrameSink, GifSink, InMemorySink, PngSink, SinkConfig};
pub use foundation::core::{Canvas, Color, Point, Rect, Vec2};
pub use foundation::error::{DocvizError, DocvizResult};
pub use model::{
    Align, Connector, Diagram, Label, Node, Playback, StrokeKind, TextLine, TextStyle,
};
pub use pipeline::{
    ARCHITECTURE_FLOW_GIF, FEATURES_PNG, TECH_STACK_PNG, generate_all, render_diagram,
    render_to_file,
};
pub use render::{CpuRenderer, FrameRGBA};
