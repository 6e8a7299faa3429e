use glint_math::Vec3;

/// Pinhole camera description.
///
/// `direction` and `up` are kept unit length and perpendicular to each
/// other by the constructors. `near_clip` doubles as the distance from
/// the eye to the image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Camera {
    /// Create a camera at `position` looking at `target`, with +Y as the
    /// reference up direction.
    pub fn new(position: Vec3, target: Vec3, aspect: f32) -> Self {
        Self::look_at(position, target, Vec3::Y).with_aspect(aspect)
    }

    /// Create a camera at `position` looking at `target`.
    ///
    /// `up` only needs to be roughly upward; it is re-orthogonalized
    /// against the viewing direction.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let direction = (target - position).normalize();
        let mut right = direction.cross(up);
        if right.length_squared() < 1e-12 {
            // Looking straight along `up`
            right = direction.cross(Vec3::Z);
        }
        let up = right.normalize().cross(direction);

        Self {
            position,
            direction,
            up,
            ..Default::default()
        }
    }

    /// Set the vertical field of view, in degrees.
    pub fn with_fov_degrees(mut self, degrees: f32) -> Self {
        self.fov_y = degrees.to_radians();
        self
    }

    /// Set the aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Update aspect ratio (e.g., when the output resolution changes)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Unit vector pointing to the right of the view.
    pub fn right(&self) -> Vec3 {
        self.direction.cross(self.up).normalize()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y: 45.0_f32.to_radians(),
            aspect: 4.0 / 3.0,
            near_clip: 0.1,
            far_clip: 100.0,
        }
    }
}
