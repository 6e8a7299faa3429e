//! PNG export of rendered images.
//!
//! The render buffer starts at the bottom row of the picture; PNG starts
//! at the top, so rows are flipped on the way out. Colors are clamped and
//! scaled linearly, with no gamma curve.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use glint_renderer::ImageBuffer;
use image::RgbaImage;

/// Convert a render buffer to an 8-bit image with the top row first.
pub fn to_rgba_image(image: &ImageBuffer) -> Result<RgbaImage> {
    let bytes = image.to_rgba8();
    let row_len = image.width as usize * 4;

    let flipped: Vec<u8> = bytes
        .chunks_exact(row_len)
        .rev()
        .flatten()
        .copied()
        .collect();

    RgbaImage::from_raw(image.width, image.height, flipped)
        .context("pixel buffer does not match image dimensions")
}

/// Save a render buffer as PNG.
pub fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgba = to_rgba_image(image)?;
    rgba.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("Image saved as {}", path.display());
    Ok(())
}

/// Timestamped output name, `glint_<unix-secs>.png`.
pub fn default_output_path() -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    PathBuf::from(format!("glint_{secs}.png"))
}
