//! The diagram model: an immutable table of labeled rectangles, directional
//! connectors, and free-standing text, plus playback parameters.
//!
//! A [`Diagram`] is constructed once, validated, and rendered one or more
//! times; nothing mutates it afterwards.

use kurbo::{Point, Rect, Vec2};

use crate::foundation::{
    core::{Canvas, Color},
    error::{DocvizError, DocvizResult},
};

/// One complete diagram description.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Diagram {
    /// Pixel dimensions of the drawing surface.
    pub canvas: Canvas,
    /// Solid background color.
    pub background: Color,
    /// Labeled rectangles, drawn first in order.
    pub nodes: Vec<Node>,
    /// Directional arrows, drawn over the nodes.
    pub connectors: Vec<Connector>,
    /// Free-standing text, drawn last.
    pub labels: Vec<Label>,
    /// Still image or looping animation.
    pub playback: Playback,
}

/// A labeled rectangle.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Position and size in pixel space.
    pub rect: Rect,
    /// Corner rounding radius in pixels.
    pub corner_radius: f64,
    /// Border color.
    pub border: Color,
    /// Border stroke width in pixels.
    pub border_width: f64,
    /// Border stroke pattern.
    pub border_style: StrokeKind,
    /// Interior fill; `None` draws an outline only.
    pub fill: Option<Color>,
    /// Text lines positioned relative to the rectangle center.
    pub lines: Vec<TextLine>,
}

/// A line of text attached to a node.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextLine {
    /// Text content.
    pub text: String,
    /// Font styling.
    pub style: TextStyle,
    /// Anchor offset from the node center, y positive downward.
    pub offset: Vec2,
    /// Horizontal alignment around the anchor.
    pub align: Align,
    /// Optional wrap width in pixels.
    pub max_width: Option<f64>,
}

/// Free-standing text with its own reveal timing.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Label {
    /// Text content.
    pub text: String,
    /// Font styling.
    pub style: TextStyle,
    /// Anchor point in pixel space (vertical center of the text).
    pub pos: Point,
    /// Horizontal alignment around the anchor.
    pub align: Align,
    /// Optional wrap width in pixels.
    pub max_width: Option<f64>,
    /// Activation threshold in `[0,1]`; 0.0 is always visible.
    pub reveal_at: f64,
    /// Opacity ramp steepness once past the threshold.
    pub fade_scale: f64,
}

/// Font styling for one run of text.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f64,
    /// Fill color.
    pub color: Color,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
}

/// A directional arrow between two points.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Connector {
    /// Tail of the arrow.
    pub from: Point,
    /// Tip of the arrow.
    pub to: Point,
    /// Stroke and head color.
    pub color: Color,
    /// Shaft stroke width in pixels.
    pub width: f64,
    /// Shaft stroke pattern.
    pub style: StrokeKind,
    /// Activation threshold in `[0,1]`.
    pub reveal_at: f64,
    /// Opacity ramp steepness once past the threshold.
    pub fade_scale: f64,
}

/// Stroke dash pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StrokeKind {
    Solid,
    Dashed,
    Dotted,
}

/// Horizontal text alignment around an anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Still image or looping animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Playback {
    /// A single frame rendered with everything revealed.
    Still,
    /// A looping animation revealing connectors and labels over time.
    Animated {
        /// Total frame count.
        frames: u32,
        /// Display duration of each frame in milliseconds.
        frame_delay_ms: u32,
    },
}

impl Diagram {
    /// Check the table's invariants: everything inside the canvas, thresholds
    /// in `[0,1]`, strictly positive widths and fade scales.
    pub fn validate(&self) -> DocvizResult<()> {
        // Canvas limits are re-checked here so hand-built values of the plain
        // struct fail early rather than at the raster surface.
        Canvas::new(self.canvas.width, self.canvas.height)?;

        for (i, node) in self.nodes.iter().enumerate() {
            if node.rect.width() <= 0.0 || node.rect.height() <= 0.0 {
                return Err(DocvizError::validation(format!(
                    "node {i} has an empty rectangle"
                )));
            }
            if !self.canvas.contains(Point::new(node.rect.x0, node.rect.y0))
                || !self.canvas.contains(Point::new(node.rect.x1, node.rect.y1))
            {
                return Err(DocvizError::validation(format!(
                    "node {i} rectangle exceeds the canvas"
                )));
            }
            if !(node.border_width > 0.0 && node.border_width.is_finite()) {
                return Err(DocvizError::validation(format!(
                    "node {i} border_width must be finite and > 0"
                )));
            }
            if node.corner_radius < 0.0 {
                return Err(DocvizError::validation(format!(
                    "node {i} corner_radius must be >= 0"
                )));
            }
            for line in &node.lines {
                line.style.validate()?;
                validate_wrap_width(line.max_width)?;
            }
        }

        for (i, c) in self.connectors.iter().enumerate() {
            if !self.canvas.contains(c.from) || !self.canvas.contains(c.to) {
                return Err(DocvizError::validation(format!(
                    "connector {i} endpoint exceeds the canvas"
                )));
            }
            if c.from == c.to {
                return Err(DocvizError::validation(format!(
                    "connector {i} endpoints must differ"
                )));
            }
            if !(c.width > 0.0 && c.width.is_finite()) {
                return Err(DocvizError::validation(format!(
                    "connector {i} width must be finite and > 0"
                )));
            }
            validate_reveal(c.reveal_at, c.fade_scale)
                .map_err(|e| DocvizError::validation(format!("connector {i}: {e}")))?;
        }

        for (i, label) in self.labels.iter().enumerate() {
            if !self.canvas.contains(label.pos) {
                return Err(DocvizError::validation(format!(
                    "label {i} anchor exceeds the canvas"
                )));
            }
            label.style.validate()?;
            validate_wrap_width(label.max_width)?;
            validate_reveal(label.reveal_at, label.fade_scale)
                .map_err(|e| DocvizError::validation(format!("label {i}: {e}")))?;
        }

        if let Playback::Animated {
            frames,
            frame_delay_ms,
        } = self.playback
        {
            if frames == 0 {
                return Err(DocvizError::validation("animation frames must be > 0"));
            }
            if frame_delay_ms == 0 {
                return Err(DocvizError::validation("frame_delay_ms must be > 0"));
            }
        }

        Ok(())
    }
}

impl TextStyle {
    fn validate(&self) -> DocvizResult<()> {
        if !(self.size_px > 0.0 && self.size_px.is_finite()) {
            return Err(DocvizError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        Ok(())
    }
}

fn validate_reveal(reveal_at: f64, fade_scale: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&reveal_at) {
        return Err("reveal_at must be within [0,1]".to_string());
    }
    if !(fade_scale > 0.0 && fade_scale.is_finite()) {
        return Err("fade_scale must be finite and > 0".to_string());
    }
    Ok(())
}

fn validate_wrap_width(max_width: Option<f64>) -> DocvizResult<()> {
    if let Some(w) = max_width {
        if !(w > 0.0 && w.is_finite()) {
            return Err(DocvizError::validation("max_width must be finite and > 0"));
        }
    }
    Ok(())
}
