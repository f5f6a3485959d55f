use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig, unpremultiply_in_place};
use crate::foundation::error::{DocvizError, DocvizResult};
use crate::render::FrameRGBA;

/// Quantizer speed for the GIF palette (1 = best, 30 = fastest). The
/// diagrams use a small flat palette, so the fast end loses nothing visible.
const QUANTIZER_SPEED: i32 = 10;

/// Growable byte buffer shared between the sink and the encoder it feeds.
///
/// The encoder owns its writer, so the sink keeps a second handle to read
/// the encoded bytes back out after the encoder is dropped.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn take(&self) -> Vec<u8> {
        std::mem::take(&mut self.0.borrow_mut())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that streams frames into a looping animated GIF.
///
/// Frames are encoded as they arrive into an in-memory buffer; `end` writes
/// the finished GIF to disk in one shot, so trailer and flush failures
/// surface as errors instead of being lost in a writer drop. No per-frame
/// temporaries touch the filesystem.
pub struct GifSink {
    path: PathBuf,
    buffer: SharedBuffer,
    encoder: Option<GifEncoder<SharedBuffer>>,
    delay: image::Delay,
    frames_written: u32,
}

impl GifSink {
    /// Target the GIF at `path`; the file is written in `end`.
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buffer: SharedBuffer::default(),
            encoder: None,
            delay: image::Delay::from_numer_denom_ms(100, 1),
            frames_written: 0,
        }
    }

    /// Number of frames encoded so far.
    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> DocvizResult<()> {
        if cfg.frame_delay_ms == 0 {
            return Err(DocvizError::render(
                "gif sink requires a non-zero frame delay",
            ));
        }
        self.delay = image::Delay::from_numer_denom_ms(cfg.frame_delay_ms, 1);
        self.frames_written = 0;

        self.buffer = SharedBuffer::default();
        let mut encoder = GifEncoder::new_with_speed(self.buffer.clone(), QUANTIZER_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        self.encoder = Some(encoder);
        Ok(())
    }

    fn push_frame(&mut self, _index: u32, frame: &FrameRGBA) -> DocvizResult<()> {
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| DocvizError::render("gif sink received a frame before begin"))?;

        let mut straight = frame.data.clone();
        if frame.premultiplied {
            unpremultiply_in_place(&mut straight);
        }
        let buffer = image::RgbaImage::from_raw(frame.width, frame.height, straight)
            .ok_or_else(|| DocvizError::render("frame byte length does not match dimensions"))?;

        encoder.encode_frame(image::Frame::from_parts(buffer, 0, 0, self.delay))?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> DocvizResult<()> {
        if self.frames_written == 0 {
            return Err(DocvizError::render("gif sink received no frames"));
        }
        // Dropping the encoder writes the trailer into the shared buffer.
        self.encoder = None;
        std::fs::write(&self.path, self.buffer.take())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::AnimationDecoder;
    use std::fs::File;

    fn frame(shade: u8) -> FrameRGBA {
        FrameRGBA {
            width: 8,
            height: 8,
            data: vec![shade; 8 * 8 * 4],
            premultiplied: false,
        }
    }

    fn push_three(sink: &mut GifSink) -> DocvizResult<()> {
        sink.begin(SinkConfig {
            width: 8,
            height: 8,
            frame_delay_ms: 100,
        })?;
        for i in 0..3u32 {
            sink.push_frame(i, &frame(60 + (i as u8) * 60))?;
        }
        Ok(())
    }

    #[test]
    fn encodes_looping_gif_with_configured_delay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");

        let mut sink = GifSink::create(&path);
        push_three(&mut sink).unwrap();
        sink.end().unwrap();
        assert_eq!(sink.frames_written(), 3);

        let decoder =
            image::codecs::gif::GifDecoder::new(std::io::BufReader::new(File::open(&path).unwrap()))
                .unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 3);
        let (num, den) = frames[0].delay().numer_denom_ms();
        assert_eq!(f64::from(num) / f64::from(den), 100.0);
    }

    #[test]
    fn rejects_zero_delay_and_empty_animations() {
        let dir = tempfile::tempdir().unwrap();

        let mut sink = GifSink::create(dir.path().join("bad.gif"));
        assert!(
            sink.begin(SinkConfig {
                width: 8,
                height: 8,
                frame_delay_ms: 0,
            })
            .is_err()
        );

        let mut sink = GifSink::create(dir.path().join("empty.gif"));
        sink.begin(SinkConfig {
            width: 8,
            height: 8,
            frame_delay_ms: 100,
        })
        .unwrap();
        assert!(sink.end().is_err());
    }

    #[test]
    fn end_surfaces_write_failures() {
        let dir = tempfile::tempdir().unwrap();

        // The target directory does not exist, so persisting the GIF fails.
        let mut sink = GifSink::create(dir.path().join("missing").join("anim.gif"));
        push_three(&mut sink).unwrap();
        assert!(sink.end().is_err());
    }

    // /dev/full accepts opens but fails every write with ENOSPC.
    #[cfg(target_os = "linux")]
    #[test]
    fn end_surfaces_enospc() {
        let mut sink = GifSink::create("/dev/full");
        push_three(&mut sink).unwrap();
        assert!(sink.end().is_err());
    }
}
