use std::path::PathBuf;

use crate::encode::sink::{FrameSink, SinkConfig, unpremultiply_in_place};
use crate::foundation::error::{DocvizError, DocvizResult};
use crate::render::FrameRGBA;

/// Sink that writes a single frame as a PNG file.
#[derive(Debug)]
pub struct PngSink {
    path: PathBuf,
    frames_written: u32,
}

impl PngSink {
    /// Target the PNG at `path`; nothing is written until a frame arrives.
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frames_written: 0,
        }
    }
}

impl FrameSink for PngSink {
    fn begin(&mut self, _cfg: SinkConfig) -> DocvizResult<()> {
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, _index: u32, frame: &FrameRGBA) -> DocvizResult<()> {
        if self.frames_written > 0 {
            return Err(DocvizError::render(
                "png sink accepts exactly one frame per render",
            ));
        }

        let mut straight = frame.data.clone();
        if frame.premultiplied {
            unpremultiply_in_place(&mut straight);
        }

        image::save_buffer_with_format(
            &self.path,
            &straight,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        self.frames_written = 1;
        Ok(())
    }

    fn end(&mut self) -> DocvizResult<()> {
        if self.frames_written == 0 {
            return Err(DocvizError::render("png sink received no frame"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> FrameRGBA {
        FrameRGBA {
            width: 4,
            height: 3,
            data: vec![200; 4 * 3 * 4],
            premultiplied: true,
        }
    }

    #[test]
    fn writes_one_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.png");

        let mut sink = PngSink::create(&path);
        sink.begin(SinkConfig {
            width: 4,
            height: 3,
            frame_delay_ms: 0,
        })
        .unwrap();
        sink.push_frame(0, &frame()).unwrap();
        sink.end().unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (4, 3));
    }

    #[test]
    fn rejects_a_second_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::create(dir.path().join("two.png"));
        sink.begin(SinkConfig {
            width: 4,
            height: 3,
            frame_delay_ms: 0,
        })
        .unwrap();
        sink.push_frame(0, &frame()).unwrap();
        assert!(sink.push_frame(1, &frame()).is_err());
    }

    #[test]
    fn end_without_frame_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::create(dir.path().join("none.png"));
        sink.begin(SinkConfig {
            width: 4,
            height: 3,
            frame_delay_ms: 0,
        })
        .unwrap();
        assert!(sink.end().is_err());
    }
}
