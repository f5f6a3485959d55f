use std::collections::HashMap;

use kurbo::{Affine, BezPath, Cap, Point, Shape, Stroke, StrokeOpts, Vec2};

use crate::{
    anim::{Progress, reveal_opacity},
    foundation::core::Color,
    foundation::error::{DocvizError, DocvizResult},
    model::{Align, Connector, Diagram, Label, Node, StrokeKind, TextLine},
    render::FrameRGBA,
    render::text::TextShaper,
};

/// Arrowhead length grows with the shaft width; a 4 px shaft gets a 30 px
/// head.
fn arrow_head_len(width: f64) -> f64 {
    10.0 + 5.0 * width
}

/// Dash pattern for a stroke kind, in pixels.
fn dash_pattern(kind: StrokeKind) -> &'static [f64] {
    match kind {
        StrokeKind::Solid => &[],
        StrokeKind::Dashed => &[12.0, 8.0],
        StrokeKind::Dotted => &[3.0, 7.0],
    }
}

/// Renders diagram frames on the CPU.
///
/// Holds the text shaper and a font cache across frames; the diagram itself
/// is borrowed immutably per call.
pub struct CpuRenderer {
    shaper: TextShaper,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl Default for CpuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuRenderer {
    /// Create a renderer with fresh shaping contexts.
    pub fn new() -> Self {
        Self {
            shaper: TextShaper::new(),
            font_cache: HashMap::new(),
        }
    }

    /// Draw one frame of `diagram` at `progress`.
    ///
    /// Deterministic: the same diagram and progress produce identical bytes.
    /// Returns premultiplied RGBA8.
    #[tracing::instrument(skip(self, diagram))]
    pub fn render(&mut self, diagram: &Diagram, progress: Progress) -> DocvizResult<FrameRGBA> {
        let width: u16 = diagram
            .canvas
            .width
            .try_into()
            .map_err(|_| DocvizError::render("canvas width exceeds u16"))?;
        let height: u16 = diagram
            .canvas
            .height
            .try_into()
            .map_err(|_| DocvizError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        let bg = diagram.background;
        clear_pixmap(&mut pixmap, premul_rgba8(bg.r, bg.g, bg.b, bg.a));

        let mut ctx = vello_cpu::RenderContext::new(width, height);

        for node in &diagram.nodes {
            self.draw_node_shape(&mut ctx, node);
        }
        for connector in &diagram.connectors {
            self.draw_connector(&mut ctx, connector, progress);
        }
        for node in &diagram.nodes {
            for line in &node.lines {
                self.draw_node_line(&mut ctx, node, line);
            }
        }
        for label in &diagram.labels {
            self.draw_label(&mut ctx, label, progress);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: diagram.canvas.width,
            height: diagram.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_node_shape(&mut self, ctx: &mut vello_cpu::RenderContext, node: &Node) {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let rounded = kurbo::RoundedRect::from_rect(node.rect, node.corner_radius);
        let outline = rounded.to_path(0.1);

        if let Some(fill) = node.fill {
            set_solid_paint(ctx, fill);
            ctx.fill_path(&bezpath_to_cpu(&outline));
        }

        let border = expand_stroke(&outline, node.border_width, node.border_style);
        set_solid_paint(ctx, node.border);
        ctx.fill_path(&bezpath_to_cpu(&border));
    }

    fn draw_connector(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        connector: &Connector,
        progress: Progress,
    ) {
        let opacity = reveal_opacity(progress, connector.reveal_at, connector.fade_scale);
        if opacity <= 0.0 {
            return;
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        set_solid_paint(ctx, connector.color);
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity as f32);
        }

        let (shaft, head) = arrow_paths(connector.from, connector.to, connector.width);
        let shaft = expand_stroke(&shaft, connector.width, connector.style);
        ctx.fill_path(&bezpath_to_cpu(&shaft));
        ctx.fill_path(&bezpath_to_cpu(&head));

        if opacity < 1.0 {
            ctx.pop_layer();
        }
    }

    fn draw_node_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        node: &Node,
        line: &TextLine,
    ) {
        let anchor = node.rect.center() + line.offset;
        self.draw_text(
            ctx,
            &line.text,
            &line.style,
            anchor,
            line.align,
            line.max_width,
            1.0,
        );
    }

    fn draw_label(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        label: &Label,
        progress: Progress,
    ) {
        let opacity = reveal_opacity(progress, label.reveal_at, label.fade_scale);
        if opacity <= 0.0 {
            return;
        }
        self.draw_text(
            ctx,
            &label.text,
            &label.style,
            label.pos,
            label.align,
            label.max_width,
            opacity,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        style: &crate::model::TextStyle,
        anchor: Point,
        align: Align,
        max_width: Option<f64>,
        opacity: f64,
    ) {
        if text.is_empty() {
            return;
        }

        let layout = self.shaper.shape(text, style, max_width);
        let width = f64::from(layout.width());
        let height = f64::from(layout.height());
        let x = match align {
            Align::Left => anchor.x,
            Align::Center => anchor.x - width / 2.0,
            Align::Right => anchor.x - width,
        };
        let origin = Point::new(x, anchor.y - height / 2.0);

        ctx.set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity as f32);
        }

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let font = run.run().font();
                let key = (font.data.id(), font.index);
                let cpu_font = self
                    .font_cache
                    .entry(key)
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(font.data.as_ref().to_vec()),
                            font.index,
                        )
                    })
                    .clone();

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&cpu_font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        if opacity < 1.0 {
            ctx.pop_layer();
        }
    }
}

/// Shaft and head paths for an arrow from `from` to `to`.
///
/// The shaft stops where the head begins so dashed shafts do not poke through
/// the tip.
fn arrow_paths(from: Point, to: Point, width: f64) -> (BezPath, BezPath) {
    let dir = (to - from).normalize();
    let head_len = arrow_head_len(width);
    let base = to - dir * head_len;
    let perp = Vec2::new(-dir.y, dir.x) * (head_len * 0.4);

    let mut shaft = BezPath::new();
    shaft.move_to(from);
    shaft.line_to(base);

    let mut head = BezPath::new();
    head.move_to(to);
    head.line_to(base + perp);
    head.line_to(base - perp);
    head.close_path();

    (shaft, head)
}

/// Expand a stroked outline (dash pattern included) into a fill path; the
/// raster backend is fill-only.
fn expand_stroke(path: &BezPath, width: f64, kind: StrokeKind) -> BezPath {
    let mut style = Stroke::new(width).with_caps(Cap::Round);
    let pattern = dash_pattern(kind);
    if !pattern.is_empty() {
        style = style.with_dashes(0.0, pattern.iter().copied());
    }
    kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), 0.25)
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = u16::from(a) + 1;
    let premul = |c: u8| -> u8 { ((u16::from(c) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn set_solid_paint(ctx: &mut vello_cpu::RenderContext, color: Color) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_head_tip_sits_at_destination() {
        let (shaft, head) = arrow_paths(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 4.0);
        let head_box = head.bounding_box();
        assert!((head_box.x1 - 100.0).abs() < 1e-9);

        // Shaft stops where the head begins.
        let shaft_box = shaft.bounding_box();
        assert!(shaft_box.x1 < 100.0);
        assert!((shaft_box.x1 + arrow_head_len(4.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn arrow_head_is_symmetric_about_the_axis() {
        let (_, head) = arrow_paths(Point::new(0.0, 50.0), Point::new(200.0, 50.0), 4.0);
        let b = head.bounding_box();
        assert!(((b.y0 + b.y1) / 2.0 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn expand_stroke_produces_area() {
        let mut line = BezPath::new();
        line.move_to(Point::new(0.0, 0.0));
        line.line_to(Point::new(50.0, 0.0));

        let solid = expand_stroke(&line, 4.0, StrokeKind::Solid);
        assert!(solid.bounding_box().area() > 0.0);

        // A dash pattern shortens the inked length but keeps the extent.
        let dashed = expand_stroke(&line, 4.0, StrokeKind::Dashed);
        assert!(dashed.bounding_box().width() > 0.0);
        assert!(dashed.elements().len() > solid.elements().len());
    }

    #[test]
    fn premul_is_identity_at_full_alpha_for_white() {
        assert_eq!(premul_rgba8(255, 255, 255, 255), [255, 255, 255, 255]);
        assert_eq!(premul_rgba8(10, 20, 30, 0), [0, 0, 0, 0]);
    }
}
