//! Command-line tool for scene documents.
//!
//! ```text
//! sketchboard inspect <scene.json>
//! sketchboard normalize <in.json> <out.json>
//! ```
//!
//! Both commands accept `--config <file>` to load a session config.
//! Set `RUST_LOG=sketchboard=debug` for detailed logs.

use anyhow::{bail, Context, Result};
use sketchboard::{CanvasSession, MemorySurface, SessionConfig, ShapeKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sketchboard=info")),
        )
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = take_config(&mut args)?;

    match args.as_slice() {
        [cmd, input] if cmd == "inspect" => inspect(Path::new(input), config),
        [cmd, input, output] if cmd == "normalize" => {
            normalize(Path::new(input), Path::new(output), config)
        }
        _ => bail!(
            "usage: sketchboard [--config <file>] inspect <scene.json>\n       \
             sketchboard [--config <file>] normalize <in.json> <out.json>"
        ),
    }
}

fn take_config(args: &mut Vec<String>) -> Result<SessionConfig> {
    let Some(pos) = args.iter().position(|a| a == "--config") else {
        return Ok(SessionConfig::default());
    };
    if pos + 1 >= args.len() {
        bail!("--config needs a file path");
    }
    let path = PathBuf::from(args.remove(pos + 1));
    args.remove(pos);
    SessionConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
}

fn load(path: &Path, config: SessionConfig) -> Result<CanvasSession<MemorySurface>> {
    let mut session = CanvasSession::with_config(MemorySurface::new(), config);
    session
        .load_scene(path)
        .with_context(|| format!("importing {}", path.display()))?;
    Ok(session)
}

fn inspect(path: &Path, config: SessionConfig) -> Result<()> {
    let session = load(path, config)?;
    let scene = session.scene();

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for shape in scene.shapes() {
        *counts.entry(shape.kind().label()).or_default() += 1;
    }

    println!("{}: {} shapes", path.display(), scene.len());
    for kind in ShapeKind::all() {
        if let Some(count) = counts.get(kind.label()) {
            println!("  {:<10} {}", kind.label(), count);
        }
    }
    let erasers = scene.shapes().iter().filter(|s| s.is_eraser()).count();
    if erasers > 0 {
        println!("  ({} eraser strokes)", erasers);
    }
    Ok(())
}

fn normalize(input: &Path, output: &Path, config: SessionConfig) -> Result<()> {
    let session = load(input, config)?;
    session
        .save_scene(output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Wrote {} shapes to {}", session.scene().len(), output.display());
    Ok(())
}
