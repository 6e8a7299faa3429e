//! Render configuration and the image buffer the driver writes into.

use glint_core::Color;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Number of nested reflection/refraction levels below a camera ray
    pub max_depth: u32,
    /// Lower bound of every hit interval, keeps secondary rays off the
    /// surface they start on
    pub epsilon: f32,
    /// Upper bound of primary and secondary hit intervals
    pub max_distance: f32,
    /// Rows between progress log lines
    pub progress_interval: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            epsilon: 1e-3,
            max_distance: f32::INFINITY,
            progress_interval: 64,
        }
    }
}

impl RenderConfig {
    /// Set the recursion bound.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the self-intersection epsilon.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the progress log interval in rows.
    pub fn with_progress_interval(mut self, rows: u32) -> Self {
        self.progress_interval = rows.max(1);
        self
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
///
/// Channels are clamped to [0, 1] and scaled linearly; alpha is opaque.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

/// Row-major buffer of linear colors, row 0 first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes, four per pixel, in buffer order.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}
