use crate::model::TextStyle;

/// RGBA8 brush color carried through Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Stateful helper for building Parley text layouts.
///
/// Diagrams carry no font assets; text resolves against the system sans-serif
/// generic family, with bold/italic handled by Parley's font selection.
pub(crate) struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl TextShaper {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out a run of plain text.
    ///
    /// With a wrap width the text breaks into left-aligned lines; without one
    /// it stays on a single line.
    pub(crate) fn shape(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width_px: Option<f64>,
    ) -> parley::Layout<TextBrushRgba8> {
        let brush = TextBrushRgba8 {
            r: style.color.r,
            g: style.color.g,
            b: style.color.b,
            a: style.color.a,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Single(parley::style::FontFamily::Generic(
                parley::style::GenericFamily::SansSerif,
            )),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if style.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if style.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w as f32));
            layout.align(
                Some(w as f32),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }

        layout
    }
}
