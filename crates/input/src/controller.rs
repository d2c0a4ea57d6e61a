use crate::event::Key;
use daedalus_render::FirstPersonCamera;
use glam::Vec3;

/// Converts discrete input events into continuous per-axis velocity state,
/// consumed once per frame to advance the camera.
///
/// Held keys contribute a constant 1.0 on their axis until released.
/// Pointer and scroll deltas accumulate between frames and are zeroed by
/// [`CameraController::update`].
#[derive(Debug)]
pub struct CameraController {
    amount_forward: f32,
    amount_backward: f32,
    amount_left: f32,
    amount_right: f32,
    amount_up: f32,
    amount_down: f32,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    scroll: f32,
    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// `speed` in world units per second; `sensitivity` scales rotation and
    /// dolly rate.
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_left: 0.0,
            amount_right: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            scroll: 0.0,
            speed,
            sensitivity,
        }
    }

    /// Record a key transition on its movement axis. Axes are independent;
    /// opposing keys held together cancel in [`CameraController::update`].
    pub fn process_key(&mut self, key: Key, pressed: bool) {
        let amount = if pressed { 1.0 } else { 0.0 };
        tracing::trace!(?key, amount, "movement key");
        match key {
            Key::KeyW | Key::ArrowUp => self.amount_forward = amount,
            Key::KeyS | Key::ArrowDown => self.amount_backward = amount,
            Key::KeyA | Key::ArrowLeft => self.amount_left = amount,
            Key::KeyD | Key::ArrowRight => self.amount_right = amount,
            Key::Space => self.amount_up = amount,
            Key::ShiftLeft => self.amount_down = amount,
            Key::Escape => {}
        }
    }

    /// Accumulate a relative pointer delta into the pending rotation.
    pub fn process_pointer(&mut self, dx: f32, dy: f32) {
        self.rotate_horizontal += dx;
        self.rotate_vertical += dy;
    }

    /// Accumulate a scroll delta into the pending dolly.
    pub fn process_scroll(&mut self, delta: f32) {
        self.scroll += delta;
    }

    /// Advance the camera by one frame's worth of velocity.
    ///
    /// Translation happens in the camera's horizontal plane so that holding
    /// forward stays level even while looking up or down; the scroll dolly
    /// alone moves along the full 3D view direction. Pending pointer and
    /// scroll deltas are consumed and zeroed. `delta_time` is not clamped
    /// here; callers bound it upstream.
    pub fn update(&mut self, camera: &mut FirstPersonCamera, delta_time: f32) {
        let (yaw_sin, yaw_cos) = camera.yaw().sin_cos();
        let forward = Vec3::new(yaw_cos, 0.0, yaw_sin);
        let right = Vec3::new(-yaw_sin, 0.0, yaw_cos);

        camera.position +=
            forward * (self.amount_forward - self.amount_backward) * self.speed * delta_time;
        camera.position +=
            right * (self.amount_right - self.amount_left) * self.speed * delta_time;

        // Dolly in/out along the view direction, consuming the pending scroll.
        camera.position +=
            camera.forward() * self.scroll * self.speed * self.sensitivity * delta_time;
        self.scroll = 0.0;

        camera.position.y += (self.amount_up - self.amount_down) * self.speed * delta_time;

        // Consume the pending rotation; pitch is clamped inside rotate().
        camera.rotate(
            self.rotate_horizontal * self.sensitivity * delta_time,
            -self.rotate_vertical * self.sensitivity * delta_time,
        );
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f32 = 1e-4;

    fn camera_facing_negative_z() -> FirstPersonCamera {
        FirstPersonCamera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
    }

    #[test]
    fn forward_held_one_second() {
        let mut camera = camera_facing_negative_z();
        let mut controller = CameraController::new(5.0, 1.0);
        controller.process_key(Key::KeyW, true);
        controller.update(&mut camera, 1.0);
        assert_relative_eq!(camera.position.z, -5.0, epsilon = EPS);
        assert_relative_eq!(camera.position.x, 0.0, epsilon = EPS);
        assert_relative_eq!(camera.position.y, 0.0, epsilon = EPS);
    }

    #[test]
    fn forward_stays_level_while_pitched() {
        let mut camera = FirstPersonCamera::new(
            Vec3::ZERO,
            -std::f32::consts::FRAC_PI_2,
            45.0_f32.to_radians(),
        );
        let mut controller = CameraController::new(5.0, 1.0);
        controller.process_key(Key::KeyW, true);
        controller.update(&mut camera, 1.0);
        assert_relative_eq!(camera.position.y, 0.0, epsilon = EPS);
        assert_relative_eq!(camera.position.z, -5.0, epsilon = EPS);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut camera = camera_facing_negative_z();
        let mut controller = CameraController::new(5.0, 1.0);
        controller.process_key(Key::KeyW, true);
        controller.process_key(Key::KeyS, true);
        controller.update(&mut camera, 1.0);
        assert_relative_eq!(camera.position.length(), 0.0, epsilon = EPS);
    }

    #[test]
    fn release_stops_motion() {
        let mut camera = camera_facing_negative_z();
        let mut controller = CameraController::new(5.0, 1.0);
        controller.process_key(Key::KeyD, true);
        controller.process_key(Key::KeyD, false);
        controller.update(&mut camera, 1.0);
        assert_relative_eq!(camera.position.length(), 0.0, epsilon = EPS);
    }

    #[test]
    fn zero_delta_time_is_a_no_op() {
        let mut camera = camera_facing_negative_z();
        let before = camera.basis();
        let mut controller = CameraController::new(5.0, 1.0);
        controller.process_key(Key::KeyW, true);
        controller.process_pointer(40.0, -25.0);
        controller.process_scroll(3.0);
        controller.update(&mut camera, 0.0);
        assert_eq!(camera.basis(), before);
    }

    #[test]
    fn scroll_dolly_consumed_after_one_update() {
        let mut camera = camera_facing_negative_z();
        let mut controller = CameraController::new(5.0, 2.0);
        controller.process_scroll(10.0);
        controller.update(&mut camera, 0.1);
        // 10 * 5 * 2 * 0.1 along the view direction (-z)
        assert_relative_eq!(camera.position.z, -10.0, epsilon = EPS);

        let after_first = camera.position;
        controller.update(&mut camera, 0.1);
        assert_eq!(camera.position, after_first);
    }

    #[test]
    fn scroll_deltas_accumulate_between_updates() {
        let mut camera = camera_facing_negative_z();
        let mut controller = CameraController::new(1.0, 1.0);
        controller.process_scroll(2.0);
        controller.process_scroll(3.0);
        controller.update(&mut camera, 1.0);
        assert_relative_eq!(camera.position.z, -5.0, epsilon = EPS);
    }

    #[test]
    fn pointer_rotation_consumed_after_one_update() {
        let mut camera = camera_facing_negative_z();
        let yaw_before = camera.yaw();
        let mut controller = CameraController::new(5.0, 1.0);
        controller.process_pointer(0.1, 0.0);
        controller.process_pointer(0.2, 0.0);
        controller.update(&mut camera, 1.0);
        assert_relative_eq!(camera.yaw(), yaw_before + 0.3, epsilon = EPS);

        let yaw_after = camera.yaw();
        controller.update(&mut camera, 1.0);
        assert_relative_eq!(camera.yaw(), yaw_after, epsilon = EPS);
    }

    #[test]
    fn pointer_down_pitches_down() {
        let mut camera = camera_facing_negative_z();
        let mut controller = CameraController::new(5.0, 1.0);
        controller.process_pointer(0.0, 0.5);
        controller.update(&mut camera, 1.0);
        assert!(camera.pitch() < 0.0);
    }
}
