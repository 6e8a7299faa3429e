use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{RenderConfig, Raytracer};

mod cli;
mod logger;
mod output;
mod scenes;

use cli::Args;
use logger::init_logger;
use output::{default_output_path, save_png};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.debug_level.into());

    log::info!("Starting glint");

    let aspect = args.width as f32 / args.height as f32;
    let scene = scenes::build(args.scene, aspect).context("failed to build scene")?;

    let config = RenderConfig::default()
        .with_max_depth(args.max_depth)
        .with_progress_interval((args.height / 10).max(1));
    let mut raytracer = Raytracer::new(&scene, args.width, args.height)?.with_config(config);

    let start = Instant::now();
    match args.budget_ms {
        None => {
            raytracer.advance(None);
        }
        Some(ms) => {
            let budget = Duration::from_millis(ms);
            let mut slices = 0u32;
            while !raytracer.advance(Some(budget)) {
                slices += 1;
                log::info!(
                    "Slice {}: {}/{} rows",
                    slices,
                    raytracer.current_row(),
                    raytracer.height()
                );
            }
        }
    }
    log::info!(
        "Rendered {}x{} in {:.2?}",
        raytracer.width(),
        raytracer.height(),
        start.elapsed()
    );

    let path = args.output.unwrap_or_else(default_output_path);
    save_png(raytracer.image(), &path)?;

    Ok(())
}
