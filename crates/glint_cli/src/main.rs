//! glint - offline ray tracing renderer.
//!
//! Renders a JSON scene description (or a built-in demo scene) to a PNG.

mod demo;
mod scene_file;

use anyhow::{bail, Context, Result};
use glint_renderer::{ImageBuffer, Renderer};
use std::path::PathBuf;
use std::time::Instant;

struct Args {
    scene: Option<PathBuf>,
    output: PathBuf,
}

const USAGE: &str = "usage: glint [SCENE.json] [-o OUTPUT.png]";

fn parse_args() -> Result<Args> {
    let mut scene = None;
    let mut output = PathBuf::from("render.png");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                output = match args.next() {
                    Some(path) => PathBuf::from(path),
                    None => bail!("{arg} needs a path\n{USAGE}"),
                };
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if arg.starts_with('-') => bail!("unknown option {arg}\n{USAGE}"),
            _ => {
                if scene.replace(PathBuf::from(&arg)).is_some() {
                    bail!("more than one scene file given\n{USAGE}");
                }
            }
        }
    }

    Ok(Args { scene, output })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;

    let setup = match &args.scene {
        Some(path) => {
            log::info!("loading scene {}", path.display());
            scene_file::load(path)?
        }
        None => {
            log::info!("no scene file given, using the built-in demo scene");
            demo::setup()
        }
    };

    log::info!(
        "rendering {}x{} ({} primitives, interpolation {})",
        setup.viewport.width,
        setup.viewport.height,
        setup.scene.len(),
        setup.config.interpolation,
    );

    let renderer = Renderer::new(setup.viewport).with_config(setup.config);
    let mut frame = ImageBuffer::new(setup.viewport.width, setup.viewport.height);

    let start = Instant::now();
    renderer.render_with_progress(&setup.scene, &mut frame, |row| {
        log::trace!("scanline {row} done");
    });
    log::info!("rendered in {:?}", start.elapsed());

    let (width, height) = (frame.width, frame.height);
    let png = image::RgbaImage::from_raw(width, height, frame.into_rgba())
        .context("image buffer does not match its dimensions")?;
    png.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("wrote {}", args.output.display());
    Ok(())
}
