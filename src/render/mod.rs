//! CPU rasterization of a [`Diagram`](crate::model::Diagram) frame.

pub mod cpu;
pub(crate) mod text;

pub use cpu::CpuRenderer;

/// One rendered frame of RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixel bytes.
    pub data: Vec<u8>,
    /// `true` when the color channels are premultiplied by alpha.
    pub premultiplied: bool,
}
