use crate::foundation::error::DocvizResult;
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before any frames arrive.
#[derive(Clone, Copy, Debug)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Display duration of each frame in milliseconds; 0 for still output.
    pub frame_delay_ms: u32,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing
/// 0-based indices, `begin` exactly once before the first frame and `end`
/// exactly once after the last.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> DocvizResult<()>;
    /// Push one frame in order.
    fn push_frame(&mut self, index: u32, frame: &FrameRGBA) -> DocvizResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> DocvizResult<()>;
}

/// Convert premultiplied RGBA8 to straight alpha, in place.
pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((u16::from(px[1]) * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((u16::from(px[2]) * 255 + a / 2) / a).min(255) as u8;
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u32, FrameRGBA)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames in push order.
    pub fn frames(&self) -> &[(u32, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> DocvizResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, index: u32, frame: &FrameRGBA) -> DocvizResult<()> {
        self.frames.push((index, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> DocvizResult<()> {
        Ok(())
    }
}
