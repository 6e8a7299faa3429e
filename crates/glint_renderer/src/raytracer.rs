//! Progressive, row-at-a-time render driver.
//!
//! A host either renders the whole image in one call or keeps calling
//! [`Raytracer::advance`] with a small time budget, interleaving partial
//! renders with its own work. The row cursor lives in the driver, so each
//! call resumes exactly where the previous one stopped.

use std::time::{Duration, Instant};

use glint_core::Scene;
use thiserror::Error;

use crate::camera::generate_ray;
use crate::renderer::{ImageBuffer, RenderConfig};
use crate::shader::shade;

/// Errors raised while setting up a render.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid image dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Where the driver is in its render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Initialized, no row rendered yet
    Idle,
    /// Some rows rendered
    Rendering,
    /// Every row rendered
    Done,
}

/// Renders a scene into an owned image buffer, one row at a time.
pub struct Raytracer<'s> {
    scene: &'s Scene,
    config: RenderConfig,
    image: ImageBuffer,
    current_row: u32,
    state: RenderState,
}

impl<'s> Raytracer<'s> {
    /// Create a driver for `scene` at the given resolution.
    pub fn new(scene: &'s Scene, width: u32, height: u32) -> Result<Self, RenderError> {
        validate(width, height)?;

        log::info!(
            "Raytracer initialized: '{}' at {}x{}, {} geometries, {} lights",
            scene.name,
            width,
            height,
            scene.geometry_count(),
            scene.light_count()
        );

        Ok(Self {
            scene,
            config: RenderConfig::default(),
            image: ImageBuffer::new(width, height),
            current_row: 0,
            state: RenderState::Idle,
        })
    }

    /// Replace the render configuration.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Start over with a new scene and resolution.
    ///
    /// On error the driver is left untouched.
    pub fn initialize(&mut self, scene: &'s Scene, width: u32, height: u32) -> Result<(), RenderError> {
        let config = self.config.clone();
        *self = Self::new(scene, width, height)?.with_config(config);
        Ok(())
    }

    /// Render more rows and report whether the image is complete.
    ///
    /// With `None` every remaining row is rendered. With a budget, whole
    /// rows are rendered until the budget has elapsed; at least one row is
    /// rendered per call so a tiny budget still makes progress. Calls after
    /// completion return `true` without doing anything.
    pub fn advance(&mut self, budget: Option<Duration>) -> bool {
        if self.state == RenderState::Done {
            return true;
        }
        self.state = RenderState::Rendering;

        let deadline = budget.map(|budget| Instant::now() + budget);
        let height = self.image.height;
        let log_every = self.config.progress_interval.max(1);

        while self.current_row < height {
            self.render_row(self.current_row);
            self.current_row += 1;

            if self.current_row % log_every == 0 {
                log::debug!(
                    "Rendered {}/{} rows ({:.0}%)",
                    self.current_row,
                    height,
                    self.progress() * 100.0
                );
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }
        }

        if self.current_row < height {
            return false;
        }

        self.state = RenderState::Done;
        log::info!("Render of '{}' complete", self.scene.name);
        true
    }

    fn render_row(&mut self, y: u32) {
        let (width, height) = (self.image.width, self.image.height);
        for x in 0..width {
            let ray = generate_ray(&self.scene.camera, x, y, width, height);
            let color = shade(self.scene, &ray, 0, &self.config);
            self.image.set(x, y, color);
        }
    }

    /// Current state of the render.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Next row to be rendered.
    pub fn current_row(&self) -> u32 {
        self.current_row
    }

    /// Fraction of rows rendered, in [0, 1].
    pub fn progress(&self) -> f32 {
        self.current_row as f32 / self.image.height as f32
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Configuration used for every ray.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The image rendered so far. Rows past the cursor are black.
    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// Take the image out of the driver.
    pub fn into_image(self) -> ImageBuffer {
        self.image
    }
}

fn validate(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(())
}
