use docviz::{
    Align, Canvas, Color, Connector, Diagram, InMemorySink, Label, Node, Playback, Point, Progress,
    Rect, StrokeKind, TextStyle, render_diagram,
};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

/// A small text-free diagram so pixel assertions do not depend on host fonts.
fn test_diagram(playback: Playback) -> Diagram {
    Diagram {
        canvas: Canvas {
            width: 64,
            height: 64,
        },
        background: Color::rgb8(0x18, 0x18, 0x1b),
        nodes: vec![Node {
            rect: Rect::new(8.0, 8.0, 28.0, 24.0),
            corner_radius: 4.0,
            border: Color::rgb8(0xa8, 0x55, 0xf7),
            border_width: 2.0,
            border_style: StrokeKind::Solid,
            fill: Some(Color::rgb8(0x27, 0x27, 0x2a)),
            lines: vec![],
        }],
        connectors: vec![Connector {
            from: Point::new(28.0, 32.0),
            to: Point::new(28.0, 52.0),
            color: Color::rgb8(0xec, 0x48, 0x99),
            width: 2.0,
            style: StrokeKind::Solid,
            reveal_at: 0.5,
            fade_scale: 5.0,
        }],
        labels: vec![],
        playback,
    }
}

#[test]
fn still_frame_has_expected_shape_and_background() {
    let mut sink = InMemorySink::new();
    render_diagram(&test_diagram(Playback::Still), &mut sink).unwrap();

    assert_eq!(sink.frames().len(), 1);
    let (_, frame) = &sink.frames()[0];
    assert_eq!(frame.width, 64);
    assert_eq!(frame.height, 64);
    assert_eq!(frame.data.len(), 64 * 64 * 4);
    assert!(frame.premultiplied);

    // Top-left corner is untouched background. The background is opaque, so
    // premultiplied and straight bytes agree.
    assert_eq!(&frame.data[..4], &[0x18, 0x18, 0x1b, 0xff]);
}

#[test]
fn rendering_is_deterministic() {
    let diagram = test_diagram(Playback::Animated {
        frames: 8,
        frame_delay_ms: 100,
    });

    let mut a = InMemorySink::new();
    render_diagram(&diagram, &mut a).unwrap();
    let mut b = InMemorySink::new();
    render_diagram(&diagram, &mut b).unwrap();

    assert_eq!(a.frames().len(), 8);
    for ((idx_a, fa), (idx_b, fb)) in a.frames().iter().zip(b.frames().iter()) {
        assert_eq!(idx_a, idx_b);
        assert_eq!(digest_u64(&fa.data), digest_u64(&fb.data));
    }
}

#[test]
fn connector_stays_hidden_until_its_threshold() {
    let diagram = test_diagram(Playback::Animated {
        frames: 8,
        frame_delay_ms: 100,
    });

    let mut sink = InMemorySink::new();
    render_diagram(&diagram, &mut sink).unwrap();

    // The connector reveals at progress 0.5, i.e. frame 4 of 8. Frames before
    // that must match frame 0 exactly since nothing else animates.
    let frames = sink.frames();
    let base = digest_u64(&frames[0].1.data);
    for (_, frame) in &frames[..4] {
        assert_eq!(digest_u64(&frame.data), base);
    }
    assert_ne!(digest_u64(&frames[5].1.data), base);

    // Opacity ramps up between consecutive partially-revealed frames.
    assert_ne!(
        digest_u64(&frames[5].1.data),
        digest_u64(&frames[6].1.data)
    );
}

#[test]
fn label_is_invisible_at_its_threshold() {
    let mut diagram = test_diagram(Playback::Still);
    diagram.labels.push(Label {
        text: "ready".to_string(),
        style: TextStyle {
            size_px: 12.0,
            color: Color::rgb8(0xf4, 0xf4, 0xf5),
            bold: false,
            italic: false,
        },
        pos: Point::new(32.0, 58.0),
        align: Align::Center,
        max_width: None,
        reveal_at: 0.9,
        fade_scale: 10.0,
    });
    diagram.validate().unwrap();

    // At exactly the threshold the label contributes nothing yet, so the
    // output matches the label-free diagram pixel for pixel. No assertion on
    // the revealed glyphs themselves, those depend on the host fonts.
    let mut renderer = docviz::CpuRenderer::new();
    let hidden = renderer.render(&diagram, Progress::new(0.9)).unwrap();
    let bare = renderer
        .render(&test_diagram(Playback::Still), Progress::new(0.9))
        .unwrap();
    assert_eq!(digest_u64(&hidden.data), digest_u64(&bare.data));
}
