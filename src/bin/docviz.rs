use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "docviz", version, about = "Generate project documentation images")]
struct Cli {
    /// Directory the images are written to (created if absent).
    #[arg(long, default_value = "assets")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let written = docviz::generate_all(&cli.out_dir)
        .with_context(|| format!("generate images in '{}'", cli.out_dir.display()))?;

    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
