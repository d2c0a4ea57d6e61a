use glam::Vec3;

/// Pitch never reaches the poles, so the basis cannot degenerate.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Snapshot of the camera's position and orthonormal basis.
///
/// `w` points toward the look direction, `u` right, `v` up — the right-handed
/// frame ray generation consumes (ray = u*x + v*y + w).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub origin: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

/// First-person camera: world position plus yaw/pitch orientation.
///
/// Angles are stored in radians. The basis is derived from the angles on
/// demand, so every observer sees vectors consistent with the current
/// orientation. World up is +Y.
#[derive(Debug, Clone, Copy)]
pub struct FirstPersonCamera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl FirstPersonCamera {
    /// Create a camera at `position` with yaw/pitch in radians.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Create a camera at `origin` looking toward `target`.
    ///
    /// The up hint orients the world frame; the yaw/pitch parameterization
    /// admits only +Y.
    pub fn look_at(origin: Vec3, target: Vec3, up: Vec3) -> Self {
        debug_assert!(up.dot(Vec3::Y) > 0.0);
        let dir = (target - origin).normalize();
        let yaw = dir.z.atan2(dir.x);
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        Self::new(origin, yaw, pitch)
    }

    /// Current yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in radians, always within (-90, 90) degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Look direction (`w` in the basis).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Right vector (`u` in the basis).
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Up vector (`v` in the basis).
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Translate along the look direction. Orientation is untouched.
    pub fn move_forward(&mut self, amount: f32) {
        self.position += self.forward() * amount;
    }

    /// Translate along the right vector.
    pub fn move_right(&mut self, amount: f32) {
        self.position += self.right() * amount;
    }

    /// Translate along the up vector.
    pub fn move_up(&mut self, amount: f32) {
        self.position += self.up() * amount;
    }

    /// Apply yaw/pitch deltas in radians. Pitch is clamped away from the poles.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Snapshot the position and orthonormal basis. Pure; repeated calls
    /// return identical values until the next mutation.
    pub fn basis(&self) -> CameraBasis {
        let w = self.forward();
        let u = self.right();
        let v = u.cross(w);
        CameraBasis {
            origin: self.position,
            u,
            v,
            w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(basis: &CameraBasis) {
        assert_relative_eq!(basis.u.length(), 1.0, epsilon = EPS);
        assert_relative_eq!(basis.v.length(), 1.0, epsilon = EPS);
        assert_relative_eq!(basis.w.length(), 1.0, epsilon = EPS);
        assert_relative_eq!(basis.u.dot(basis.v), 0.0, epsilon = EPS);
        assert_relative_eq!(basis.u.dot(basis.w), 0.0, epsilon = EPS);
        assert_relative_eq!(basis.v.dot(basis.w), 0.0, epsilon = EPS);
    }

    #[test]
    fn look_at_negative_z() {
        let cam = FirstPersonCamera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        let basis = cam.basis();
        assert_relative_eq!(basis.w.x, 0.0, epsilon = EPS);
        assert_relative_eq!(basis.w.y, 0.0, epsilon = EPS);
        assert_relative_eq!(basis.w.z, -1.0, epsilon = EPS);
        assert_relative_eq!(basis.u.x, 1.0, epsilon = EPS);
        assert_relative_eq!(basis.u.y, 0.0, epsilon = EPS);
        assert_relative_eq!(basis.u.z, 0.0, epsilon = EPS);
        assert_relative_eq!(basis.v.x, 0.0, epsilon = EPS);
        assert_relative_eq!(basis.v.y, 1.0, epsilon = EPS);
        assert_relative_eq!(basis.v.z, 0.0, epsilon = EPS);
    }

    #[test]
    fn basis_stays_orthonormal_under_rotation() {
        let mut cam = FirstPersonCamera::new(Vec3::ZERO, -1.2, 0.3);
        let deltas = [
            (0.7, -0.4),
            (-2.1, 0.9),
            (0.01, -0.02),
            (3.5, 1.8),
            (-0.6, -2.4),
            (10.0, 0.5),
        ];
        for (dy, dp) in deltas {
            cam.rotate(dy, dp);
            assert_orthonormal(&cam.basis());
        }
    }

    #[test]
    fn pitch_clamped_to_open_interval() {
        let mut cam = FirstPersonCamera::new(Vec3::ZERO, 0.0, 0.0);
        cam.rotate(0.0, 10.0);
        assert_relative_eq!(cam.pitch(), PITCH_LIMIT, epsilon = EPS);
        cam.rotate(0.0, -100.0);
        assert_relative_eq!(cam.pitch(), -PITCH_LIMIT, epsilon = EPS);
        // Constructor clamps the same way
        let cam = FirstPersonCamera::new(Vec3::ZERO, 0.0, 2.0);
        assert!(cam.pitch() < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn move_forward_translates_without_rotating() {
        let mut cam = FirstPersonCamera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        let yaw = cam.yaw();
        let pitch = cam.pitch();
        cam.move_forward(3.0);
        assert_relative_eq!(cam.position.z, -3.0, epsilon = EPS);
        assert_relative_eq!(cam.position.x, 0.0, epsilon = EPS);
        assert_relative_eq!(cam.position.y, 0.0, epsilon = EPS);
        assert_eq!(cam.yaw(), yaw);
        assert_eq!(cam.pitch(), pitch);
    }

    #[test]
    fn basis_is_pure() {
        let cam = FirstPersonCamera::new(Vec3::new(1.0, 2.0, 3.0), 0.4, -0.2);
        assert_eq!(cam.basis(), cam.basis());
    }
}
