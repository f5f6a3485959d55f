//! Orchestration: frame loop, file sinks, and the built-in gallery.

use std::path::{Path, PathBuf};

use crate::{
    anim::Progress,
    diagrams,
    encode::{FrameSink, GifSink, PngSink, SinkConfig},
    foundation::error::DocvizResult,
    model::{Diagram, Playback},
    render::CpuRenderer,
};

/// File name of the animated architecture diagram.
pub const ARCHITECTURE_FLOW_GIF: &str = "architecture-flow.gif";
/// File name of the technology-stack poster.
pub const TECH_STACK_PNG: &str = "tech-stack.png";
/// File name of the features showcase.
pub const FEATURES_PNG: &str = "features.png";

/// Render `diagram` into `sink`.
///
/// Still diagrams push a single fully-revealed frame; animated diagrams push
/// one frame per tick with progress `frame / frames`. Frames arrive at the
/// sink in order, bracketed by `begin`/`end`.
pub fn render_diagram(diagram: &Diagram, sink: &mut dyn FrameSink) -> DocvizResult<()> {
    diagram.validate()?;
    let mut renderer = CpuRenderer::new();

    match diagram.playback {
        Playback::Still => {
            sink.begin(SinkConfig {
                width: diagram.canvas.width,
                height: diagram.canvas.height,
                frame_delay_ms: 0,
            })?;
            let frame = renderer.render(diagram, Progress::COMPLETE)?;
            sink.push_frame(0, &frame)?;
        }
        Playback::Animated {
            frames,
            frame_delay_ms,
        } => {
            sink.begin(SinkConfig {
                width: diagram.canvas.width,
                height: diagram.canvas.height,
                frame_delay_ms,
            })?;
            for index in 0..frames {
                let frame = renderer.render(diagram, Progress::from_frame(index, frames))?;
                sink.push_frame(index, &frame)?;
            }
        }
    }

    sink.end()
}

/// Render `diagram` to `path`, choosing the sink from its playback: animated
/// diagrams become looping GIFs, still ones PNGs.
pub fn render_to_file(diagram: &Diagram, path: &Path) -> DocvizResult<()> {
    match diagram.playback {
        Playback::Still => render_diagram(diagram, &mut PngSink::create(path)),
        Playback::Animated { .. } => render_diagram(diagram, &mut GifSink::create(path)),
    }
}

/// Generate the three documentation images under `out_dir`, creating the
/// directory if it does not exist. Returns the written paths in generation
/// order.
///
/// Idempotent: every run overwrites the same three files.
pub fn generate_all(out_dir: &Path) -> DocvizResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let outputs: [(&str, Diagram); 3] = [
        (ARCHITECTURE_FLOW_GIF, diagrams::architecture_flow()),
        (TECH_STACK_PNG, diagrams::tech_stack()),
        (FEATURES_PNG, diagrams::features_showcase()),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (name, diagram) in &outputs {
        let path = out_dir.join(name);
        tracing::info!(file = %path.display(), "rendering diagram");
        render_to_file(diagram, &path)?;
        written.push(path);
    }
    Ok(written)
}
