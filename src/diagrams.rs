//! The built-in layout tables for the three documentation images.
//!
//! Geometry is authored in the layout units the artwork was designed in
//! (origin bottom-left, y up) and mapped to pixel space by [`Grid`]; all
//! colors, copy, and reveal thresholds are literal data.

use kurbo::{Point, Rect, Vec2};

use crate::{
    anim::DEFAULT_FADE_SCALE,
    foundation::core::{Canvas, Color},
    model::{
        Align, Connector, Diagram, Label, Node, Playback, StrokeKind, TextLine, TextStyle,
    },
};

/// Dark theme palette shared by all three diagrams, matching the app UI.
mod palette {
    use crate::foundation::core::Color;

    /// Page background `#18181b`.
    pub(super) const BG: Color = Color::rgb8(0x18, 0x18, 0x1b);
    /// Card fill `#27272a`.
    pub(super) const CARD: Color = Color::rgb8(0x27, 0x27, 0x2a);
    /// Hairline border `#3f3f46`.
    pub(super) const BORDER: Color = Color::rgb8(0x3f, 0x3f, 0x46);
    /// Primary purple `#a855f7`.
    pub(super) const PURPLE: Color = Color::rgb8(0xa8, 0x55, 0xf7);
    /// Pink accent `#ec4899`.
    pub(super) const PINK: Color = Color::rgb8(0xec, 0x48, 0x99);
    /// Violet accent `#8b5cf6`.
    pub(super) const ACCENT: Color = Color::rgb8(0x8b, 0x5c, 0xf6);
    /// Foreground text `#f4f4f5`.
    pub(super) const TEXT: Color = Color::rgb8(0xf4, 0xf4, 0xf5);
    /// Muted text `#71717a`.
    pub(super) const MUTED: Color = Color::rgb8(0x71, 0x71, 0x7a);
}

/// Maps layout-table coordinates (origin bottom-left, y up) to pixel space
/// (origin top-left, y down) at a fixed scale.
struct Grid {
    scale: f64,
    height_units: f64,
}

impl Grid {
    fn new(scale: f64, height_units: f64) -> Self {
        Self {
            scale,
            height_units,
        }
    }

    fn pt(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.scale, (self.height_units - y) * self.scale)
    }

    /// Rectangle from its bottom-left corner and size, in layout units.
    fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(
            x * self.scale,
            (self.height_units - y - h) * self.scale,
            (x + w) * self.scale,
            (self.height_units - y) * self.scale,
        )
    }

    /// Vertical offset in layout units converted to a pixel offset, y down.
    fn dy(&self, units: f64) -> Vec2 {
        Vec2::new(0.0, units * self.scale)
    }
}

fn style(size_px: f64, color: Color) -> TextStyle {
    TextStyle {
        size_px,
        color,
        bold: false,
        italic: false,
    }
}

fn bold(size_px: f64, color: Color) -> TextStyle {
    TextStyle {
        bold: true,
        ..style(size_px, color)
    }
}

fn italic(size_px: f64, color: Color) -> TextStyle {
    TextStyle {
        italic: true,
        ..style(size_px, color)
    }
}

fn center_line(text: &str, style: TextStyle, offset: Vec2) -> TextLine {
    TextLine {
        text: text.to_string(),
        style,
        offset,
        align: Align::Center,
        max_width: None,
    }
}

fn title_label(text: &str, style: TextStyle, pos: Point) -> Label {
    Label {
        text: text.to_string(),
        style,
        pos,
        align: Align::Center,
        max_width: None,
        reveal_at: 0.0,
        fade_scale: DEFAULT_FADE_SCALE,
    }
}

/// The animated request-flow diagram: browser, frontend, API bridge, and the
/// external data source, with arrows revealed as the animation progresses.
pub fn architecture_flow() -> Diagram {
    let g = Grid::new(100.0, 8.0);
    use palette::*;

    let card = |rect: Rect, border: Color, border_style: StrokeKind, lines: Vec<TextLine>| Node {
        rect,
        corner_radius: 12.0,
        border,
        border_width: 3.0,
        border_style,
        fill: Some(CARD),
        lines,
    };

    let arrow = |from: Point, to: Point, color: Color, width: f64, style: StrokeKind, reveal_at: f64| {
        Connector {
            from,
            to,
            color,
            width,
            style,
            reveal_at,
            fade_scale: DEFAULT_FADE_SCALE,
        }
    };

    let flow_label = |text: &str, pos: Point, color: Color, reveal_at: f64, fade_scale: f64| Label {
        text: text.to_string(),
        style: style(13.0, color),
        pos,
        align: Align::Center,
        max_width: None,
        reveal_at,
        fade_scale,
    };

    Diagram {
        canvas: Canvas {
            width: 1400,
            height: 800,
        },
        background: BG,
        nodes: vec![
            card(
                g.rect(1.0, 5.0, 2.0, 1.5),
                PURPLE,
                StrokeKind::Solid,
                vec![
                    center_line("Browser", bold(19.0, TEXT), g.dy(0.0)),
                    center_line("User Interface", style(13.0, MUTED), g.dy(0.35)),
                ],
            ),
            card(
                g.rect(5.0, 5.0, 2.5, 1.5),
                ACCENT,
                StrokeKind::Solid,
                vec![
                    center_line("Next.js 16", bold(19.0, TEXT), g.dy(-0.1)),
                    center_line("Server Components", style(13.0, MUTED), g.dy(0.25)),
                    center_line("Port: 3000", italic(11.0, PURPLE), g.dy(0.55)),
                ],
            ),
            card(
                g.rect(9.0, 5.0, 2.5, 1.5),
                PINK,
                StrokeKind::Solid,
                vec![
                    center_line("Express", bold(19.0, TEXT), g.dy(-0.1)),
                    center_line("API Bridge", style(13.0, MUTED), g.dy(0.25)),
                    center_line("Port: 4000", italic(11.0, PINK), g.dy(0.55)),
                ],
            ),
            card(
                g.rect(5.75, 2.0, 3.5, 1.5),
                PURPLE,
                StrokeKind::Dashed,
                vec![
                    center_line("JSONPlaceholder", bold(19.0, TEXT), g.dy(-0.1)),
                    center_line("External Data Source", style(13.0, MUTED), g.dy(0.25)),
                    center_line("typicode.com/albums", italic(11.0, PURPLE), g.dy(0.55)),
                ],
            ),
            // Container outline around the browser/frontend/API row.
            Node {
                rect: g.rect(0.5, 4.5, 11.5, 2.5),
                corner_radius: 0.0,
                border: BORDER,
                border_width: 3.0,
                border_style: StrokeKind::Dotted,
                fill: None,
                lines: vec![],
            },
        ],
        connectors: vec![
            arrow(g.pt(3.0, 5.75), g.pt(5.0, 5.75), PURPLE, 4.0, StrokeKind::Solid, 0.1),
            arrow(g.pt(7.5, 5.75), g.pt(9.0, 5.75), ACCENT, 4.0, StrokeKind::Solid, 0.3),
            arrow(g.pt(10.25, 5.0), g.pt(7.5, 3.5), PINK, 4.0, StrokeKind::Solid, 0.5),
            arrow(g.pt(7.5, 3.5), g.pt(10.25, 5.0), PINK, 3.0, StrokeKind::Dashed, 0.7),
            arrow(g.pt(9.0, 5.4), g.pt(7.5, 5.4), ACCENT, 3.0, StrokeKind::Dashed, 0.85),
        ],
        labels: vec![
            title_label(
                "Album Collection - Architecture",
                bold(33.0, TEXT),
                g.pt(7.0, 7.4),
            ),
            Label {
                text: "Docker Container".to_string(),
                style: italic(15.0, MUTED),
                pos: g.pt(0.7, 6.8),
                align: Align::Left,
                max_width: None,
                reveal_at: 0.0,
                fade_scale: DEFAULT_FADE_SCALE,
            },
            title_label(
                "Bridge Pattern Architecture | Full Stack Microservices",
                italic(15.0, MUTED),
                g.pt(7.0, 0.5),
            ),
            flow_label("HTTP Request", g.pt(4.0, 6.1), PURPLE, 0.15, DEFAULT_FADE_SCALE),
            flow_label("Fetch Albums", g.pt(8.25, 6.1), ACCENT, 0.35, DEFAULT_FADE_SCALE),
            flow_label("Proxy", g.pt(9.5, 4.0), PINK, 0.55, DEFAULT_FADE_SCALE),
            flow_label("JSON Data", g.pt(8.25, 5.1), ACCENT, 0.9, 10.0),
        ],
        playback: Playback::Animated {
            frames: 40,
            frame_delay_ms: 100,
        },
    }
}

/// The technology-stack poster: three labeled layers of tech cards plus a row
/// of stat boxes.
pub fn tech_stack() -> Diagram {
    let g = Grid::new(150.0, 10.0);
    use palette::*;

    struct Layer {
        y: f64,
        title: &'static str,
        color: Color,
        items: [(&'static str, &'static str); 4],
    }

    let layers = [
        Layer {
            y: 7.5,
            title: "FRONTEND",
            color: PURPLE,
            items: [
                ("Next.js 16", "React Server Components"),
                ("React 19", "Modern UI Library"),
                ("Tailwind CSS v4", "Utility-First Styling"),
                ("TypeScript 5", "Type Safety"),
            ],
        },
        Layer {
            y: 5.0,
            title: "BACKEND",
            color: PINK,
            items: [
                ("Express 4.21", "Node.js Framework"),
                ("TypeScript", "Backend Type Safety"),
                ("REST API", "Bridge Pattern"),
                ("CORS Enabled", "Cross-Origin Support"),
            ],
        },
        Layer {
            y: 2.5,
            title: "DEVOPS",
            color: ACCENT,
            items: [
                ("Docker", "Containerization"),
                ("Docker Compose", "Multi-Service"),
                ("Multi-Stage Builds", "Optimized Images"),
                ("Dev + Prod Configs", "Environment Management"),
            ],
        },
    ];

    let stats = [
        ("100%", "Type Safety"),
        ("0", "Runtime Errors"),
        ("2", "Microservices"),
        ("Multi-Stage", "Docker Build"),
    ];

    let mut nodes = Vec::new();
    let mut labels = vec![title_label(
        "Technology Stack",
        bold(54.0, TEXT),
        g.pt(6.0, 9.4),
    )];

    for layer in &layers {
        labels.push(Label {
            text: layer.title.to_string(),
            style: bold(29.0, layer.color),
            pos: g.pt(1.0, layer.y + 0.5),
            align: Align::Left,
            max_width: None,
            reveal_at: 0.0,
            fade_scale: DEFAULT_FADE_SCALE,
        });

        for (idx, (tech, desc)) in layer.items.iter().enumerate() {
            let x = 2.5 + ((idx % 2) as f64) * 4.5;
            let y = layer.y - ((idx / 2) as f64) * 0.6;
            nodes.push(Node {
                rect: g.rect(x, y - 0.25, 3.5, 0.4),
                corner_radius: 8.0,
                border: layer.color,
                border_width: 4.0,
                border_style: StrokeKind::Solid,
                fill: Some(CARD),
                lines: vec![
                    center_line(tech, bold(23.0, TEXT), g.dy(-0.1)),
                    center_line(desc, style(17.0, MUTED), g.dy(0.1)),
                ],
            });
        }
    }

    for (idx, (value, caption)) in stats.iter().enumerate() {
        let x = 1.5 + (idx as f64) * 2.5;
        nodes.push(Node {
            rect: g.rect(x, 0.3, 2.0, 1.0),
            corner_radius: 12.0,
            border: PURPLE,
            border_width: 4.0,
            border_style: StrokeKind::Solid,
            fill: Some(CARD),
            lines: vec![
                center_line(value, bold(33.0, PURPLE), g.dy(-0.15)),
                center_line(caption, style(19.0, MUTED), g.dy(0.25)),
            ],
        });
    }

    Diagram {
        canvas: Canvas {
            width: 1800,
            height: 1500,
        },
        background: BG,
        nodes,
        connectors: vec![],
        labels,
        playback: Playback::Still,
    }
}

/// The features showcase: four highlight cards and a bottom banner.
pub fn features_showcase() -> Diagram {
    let g = Grid::new(150.0, 8.0);
    use palette::*;

    let features = [
        (
            "Server-Side Rendering",
            "Next.js App Router with React 19 Server Components for optimal performance",
            (2.0, 5.5),
        ),
        (
            "Modern UI/UX",
            "Dark gradient theme with glassmorphism, smooth animations, and responsive design",
            (7.5, 5.5),
        ),
        (
            "Bridge Pattern",
            "Secure API proxy layer between frontend and external services",
            (2.0, 3.0),
        ),
        (
            "Production Ready",
            "Fully dockerized with separate dev and production configurations",
            (7.5, 3.0),
        ),
    ];

    let mut nodes: Vec<Node> = features
        .iter()
        .map(|(feat_title, desc, (x, y))| Node {
            // The card's bottom-left corner sits at (x - 0.2, y - 0.5); text
            // is left-aligned 1.7 units in from that edge.
            rect: g.rect(x - 0.2, y - 0.5, 5.0, 1.8),
            corner_radius: 20.0,
            border: PURPLE,
            border_width: 4.0,
            border_style: StrokeKind::Solid,
            fill: Some(CARD),
            lines: vec![
                TextLine {
                    text: feat_title.to_string(),
                    style: bold(27.0, TEXT),
                    offset: Vec2::new(-0.8 * 150.0, -0.45 * 150.0),
                    align: Align::Left,
                    max_width: None,
                },
                TextLine {
                    text: desc.to_string(),
                    style: style(19.0, MUTED),
                    offset: Vec2::new(-0.8 * 150.0, 0.1 * 150.0),
                    align: Align::Left,
                    max_width: Some(3.2 * 150.0),
                },
            ],
        })
        .collect();

    nodes.push(Node {
        rect: g.rect(1.0, 0.5, 12.0, 1.0),
        corner_radius: 16.0,
        border: ACCENT,
        border_width: 4.0,
        border_style: StrokeKind::Solid,
        fill: Some(CARD),
        lines: vec![center_line(
            "Built for the MUBITE Testing Challenge",
            bold(29.0, TEXT),
            g.dy(0.0),
        )],
    });

    Diagram {
        canvas: Canvas {
            width: 2100,
            height: 1200,
        },
        background: BG,
        nodes,
        connectors: vec![],
        labels: vec![title_label("Key Features", bold(54.0, TEXT), g.pt(7.0, 7.4))],
        playback: Playback::Still,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_builtin_diagrams_validate() {
        architecture_flow().validate().unwrap();
        tech_stack().validate().unwrap();
        features_showcase().validate().unwrap();
    }

    #[test]
    fn architecture_flow_is_animated_with_forty_frames() {
        let d = architecture_flow();
        assert_eq!(
            d.playback,
            Playback::Animated {
                frames: 40,
                frame_delay_ms: 100
            }
        );
        assert_eq!(d.canvas.width, 1400);
        assert_eq!(d.canvas.height, 800);
    }

    #[test]
    fn architecture_flow_thresholds_are_sorted() {
        let d = architecture_flow();
        assert_eq!(d.connectors.len(), 5);
        assert!(
            d.connectors
                .windows(2)
                .all(|w| w[0].reveal_at <= w[1].reveal_at)
        );
    }

    #[test]
    fn posters_are_still() {
        assert_eq!(tech_stack().playback, Playback::Still);
        assert_eq!(features_showcase().playback, Playback::Still);
        assert!(tech_stack().connectors.is_empty());
        assert!(features_showcase().connectors.is_empty());
    }

    #[test]
    fn grid_maps_bottom_left_units_to_top_left_pixels() {
        let g = Grid::new(100.0, 8.0);
        assert_eq!(g.pt(0.0, 8.0), Point::new(0.0, 0.0));
        assert_eq!(g.pt(7.0, 0.5), Point::new(700.0, 750.0));
        let r = g.rect(1.0, 5.0, 2.0, 1.5);
        assert_eq!(r, Rect::new(100.0, 150.0, 300.0, 300.0));
    }
}
