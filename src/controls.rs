use crate::types::*;

const EPS: f32 = 1e-6;
/// Margin keeping the polar angle strictly away from the poles.
const POLE_MARGIN: f32 = 1e-6;

/// Spherical coordinates of the camera offset, Y-up: `phi` is the polar
/// angle from +Y, `theta` the azimuth measured from +Z toward +X.
#[derive(Clone, Copy, Debug, Default)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_vec3(v: &Vec3) -> Self {
        let radius = v.norm();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    fn to_vec3(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(POLE_MARGIN, std::f32::consts::PI - POLE_MARGIN);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseAction {
    Rotate,
    Dolly,
    Pan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Button→action table. The default is the CAD-style mapping of the
/// visualizer: left drag dollies, middle drag pans, right drag rotates.
#[derive(Clone, Copy, Debug)]
pub struct MouseButtons {
    pub left: Option<MouseAction>,
    pub middle: Option<MouseAction>,
    pub right: Option<MouseAction>,
}

impl Default for MouseButtons {
    fn default() -> Self {
        Self {
            left: Some(MouseAction::Dolly),
            middle: Some(MouseAction::Pan),
            right: Some(MouseAction::Rotate),
        }
    }
}

impl MouseButtons {
    fn action_for(&self, button: MouseButton) -> Option<MouseAction> {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Rotating,
    Panning,
    Dollying,
}

/// Orbit/pan/dolly camera controller.
///
/// Pointer events feed per-frame accumulators (angle deltas, pan offset,
/// zoom scale); `update()` applies them to the camera pose and resets them
/// to identity, so every frame's motion comes only from that frame's
/// pointer delta — there is no velocity or momentum.
pub struct OrbitControls {
    pub enabled: bool,
    pub position: Vec3,
    pub target: Vec3,

    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_azimuth_angle: f32,
    pub max_azimuth_angle: f32,

    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,

    /// Vertical field of view of the driven camera, used to scale pans.
    pub fov_y: f32,
    pub mouse_buttons: MouseButtons,

    state: ControlState,
    pointer_last: Vec2,
    viewport_height: f32,

    theta_delta: f32,
    phi_delta: f32,
    pan_offset: Vec3,
    scale: f32,

    home_position: Vec3,
    home_target: Vec3,

    last_position: Vec3,
    last_orientation: Quat,
}

impl OrbitControls {
    pub fn new(position: Vec3, target: Vec3, fov_y: f32) -> Self {
        Self {
            enabled: true,
            position,
            target,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: std::f32::consts::PI,
            min_azimuth_angle: f32::NEG_INFINITY,
            max_azimuth_angle: f32::INFINITY,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            fov_y,
            mouse_buttons: MouseButtons::default(),
            state: ControlState::Idle,
            pointer_last: Vec2::zeros(),
            viewport_height: 1.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            pan_offset: Vec3::zeros(),
            scale: 1.0,
            home_position: position,
            home_target: target,
            last_position: position,
            last_orientation: orientation_toward(&position, &target),
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// The controller scales pointer deltas by the viewport height; the
    /// host must keep this current as the viewport is resized.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    pub fn pointer_down(&mut self, button: MouseButton, pos: Vec2) {
        if !self.enabled {
            return;
        }
        let Some(action) = self.mouse_buttons.action_for(button) else {
            return;
        };
        self.state = match action {
            MouseAction::Rotate => ControlState::Rotating,
            MouseAction::Dolly => ControlState::Dollying,
            MouseAction::Pan => ControlState::Panning,
        };
        self.pointer_last = pos;
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if !self.enabled {
            return;
        }
        let delta = pos - self.pointer_last;
        match self.state {
            ControlState::Idle => return,
            ControlState::Rotating => {
                let d = delta * self.rotate_speed;
                self.rotate_left(std::f32::consts::TAU * d.x / self.viewport_height);
                self.rotate_up(std::f32::consts::TAU * d.y / self.viewport_height);
            }
            ControlState::Panning => {
                let d = delta * self.pan_speed;
                self.pan(d.x, d.y);
            }
            ControlState::Dollying => {
                if delta.y > 0.0 {
                    self.dolly_in(self.zoom_step());
                } else if delta.y < 0.0 {
                    self.dolly_out(self.zoom_step());
                }
            }
        }
        self.pointer_last = pos;
    }

    pub fn pointer_up(&mut self) {
        self.state = ControlState::Idle;
    }

    /// Wheel dolly, applied only while no drag is in progress.
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.enabled || self.state != ControlState::Idle {
            return;
        }
        if delta_y < 0.0 {
            self.dolly_out(self.zoom_step());
        } else if delta_y > 0.0 {
            self.dolly_in(self.zoom_step());
        }
    }

    fn zoom_step(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    fn rotate_left(&mut self, angle: f32) {
        self.theta_delta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.phi_delta -= angle;
    }

    fn dolly_in(&mut self, step: f32) {
        self.scale /= step;
    }

    fn dolly_out(&mut self, step: f32) {
        self.scale *= step;
    }

    /// Translates the look-at target in camera-relative screen space.
    fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let offset = self.position - self.target;
        let target_distance = offset.norm() * (self.fov_y / 2.0).tan();
        let (right, up) = camera_basis(&self.position, &self.target);
        self.pan_offset -= right * (2.0 * delta_x * target_distance / self.viewport_height);
        self.pan_offset += up * (2.0 * delta_y * target_distance / self.viewport_height);
    }

    /// Applies the accumulated deltas to the camera pose and resets them.
    /// Returns whether the pose moved by more than a small epsilon since
    /// the previous call; the visualizer redraws every frame regardless.
    pub fn update(&mut self) -> bool {
        let offset = self.position - self.target;
        let mut spherical = Spherical::from_vec3(&offset);

        spherical.theta += self.theta_delta;
        spherical.phi += self.phi_delta;

        spherical.theta = spherical
            .theta
            .clamp(self.min_azimuth_angle, self.max_azimuth_angle);
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle);
        spherical.make_safe();

        spherical.radius *= self.scale;
        spherical.radius = spherical.radius.clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset;
        self.position = self.target + spherical.to_vec3();

        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.pan_offset = Vec3::zeros();
        self.scale = 1.0;

        let orientation = orientation_toward(&self.position, &self.target);
        let moved = (self.last_position - self.position).norm_squared() > EPS
            || 8.0 * (1.0 - self.last_orientation.coords.dot(&orientation.coords)) > EPS;
        if moved {
            self.last_position = self.position;
            self.last_orientation = orientation;
        }
        moved
    }

    /// Restores the initial pose recorded at construction time.
    pub fn reset(&mut self) {
        self.position = self.home_position;
        self.target = self.home_target;
        self.state = ControlState::Idle;
        self.update();
    }
}

/// Camera-space right and up axes for a Y-up look-at camera.
fn camera_basis(position: &Vec3, target: &Vec3) -> (Vec3, Vec3) {
    let back = position - target;
    let right = Vec3::y().cross(&back);
    let right = if right.norm_squared() > 0.0 {
        right.normalize()
    } else {
        Vec3::x()
    };
    let up = back.normalize().cross(&right);
    (right, up)
}

fn orientation_toward(position: &Vec3, target: &Vec3) -> Quat {
    let dir = target - position;
    if dir.norm_squared() > 0.0 {
        Quat::face_towards(&dir, &Vec3::y())
    } else {
        Quat::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> OrbitControls {
        let mut c = OrbitControls::new(Vec3::new(6.0, 5.0, 8.0), Vec3::zeros(), 1.0);
        c.set_viewport_height(720.0);
        c.update();
        c
    }

    #[test]
    fn button_table_selects_the_state() {
        let mut c = controls();
        c.pointer_down(MouseButton::Right, Vec2::zeros());
        assert_eq!(c.state(), ControlState::Rotating);
        c.pointer_up();
        assert_eq!(c.state(), ControlState::Idle);

        c.pointer_down(MouseButton::Middle, Vec2::zeros());
        assert_eq!(c.state(), ControlState::Panning);
        c.pointer_up();

        c.pointer_down(MouseButton::Left, Vec2::zeros());
        assert_eq!(c.state(), ControlState::Dollying);
    }

    #[test]
    fn unmapped_button_is_ignored() {
        let mut c = controls();
        c.mouse_buttons.left = None;
        c.pointer_down(MouseButton::Left, Vec2::zeros());
        assert_eq!(c.state(), ControlState::Idle);
    }

    #[test]
    fn rotation_preserves_radius_and_target() {
        let mut c = controls();
        let radius = c.position.norm();
        c.pointer_down(MouseButton::Right, Vec2::zeros());
        c.pointer_move(Vec2::new(120.0, 0.0));
        c.pointer_up();
        assert!(c.update());
        assert!((c.position.norm() - radius).abs() < 1e-4);
        assert!(c.target.norm() < 1e-6);
        assert!((c.position - Vec3::new(6.0, 5.0, 8.0)).norm() > 0.1);
    }

    #[test]
    fn vertical_rotation_stays_off_the_poles() {
        let mut c = controls();
        c.pointer_down(MouseButton::Right, Vec2::zeros());
        c.pointer_move(Vec2::new(0.0, 1e5));
        c.pointer_up();
        c.update();
        let offset = c.position - c.target;
        // Polar angle clamped strictly inside (0, pi).
        let phi = (offset.y / offset.norm()).acos();
        assert!(phi > 0.0 && phi < std::f32::consts::PI);
        assert!(offset.x.hypot(offset.z) > 0.0);
    }

    #[test]
    fn dolly_respects_distance_clamp() {
        let mut c = controls();
        c.min_distance = 2.0;
        c.max_distance = 50.0;
        for _ in 0..500 {
            c.wheel(-1.0);
            c.update();
        }
        assert!((c.position.norm() - 2.0).abs() < 1e-3);
        for _ in 0..500 {
            c.wheel(1.0);
            c.update();
        }
        assert!((c.position.norm() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn wheel_is_ignored_while_dragging() {
        let mut c = controls();
        let radius = c.position.norm();
        c.pointer_down(MouseButton::Middle, Vec2::zeros());
        c.wheel(1.0);
        c.update();
        assert!((c.position.norm() - radius).abs() < 1e-5);
    }

    #[test]
    fn pan_moves_the_target_without_changing_the_offset() {
        let mut c = controls();
        let offset = c.position - c.target;
        c.pointer_down(MouseButton::Middle, Vec2::zeros());
        c.pointer_move(Vec2::new(60.0, -40.0));
        c.pointer_up();
        assert!(c.update());
        assert!(c.target.norm() > 1e-3);
        let new_offset = c.position - c.target;
        assert!((new_offset - offset).norm() < 1e-4);
    }

    #[test]
    fn accumulators_reset_after_apply() {
        let mut c = controls();
        c.pointer_down(MouseButton::Right, Vec2::zeros());
        c.pointer_move(Vec2::new(50.0, 20.0));
        c.pointer_up();
        assert!(c.update());
        let settled = c.position;
        // With no new input the next frame must not keep moving.
        assert!(!c.update());
        assert!((c.position - settled).norm() < 1e-4);
    }

    #[test]
    fn reset_restores_home_pose() {
        let mut c = controls();
        c.pointer_down(MouseButton::Right, Vec2::zeros());
        c.pointer_move(Vec2::new(200.0, 80.0));
        c.pointer_up();
        c.update();
        c.wheel(1.0);
        c.update();
        c.reset();
        assert_eq!(c.state(), ControlState::Idle);
        assert!((c.position - Vec3::new(6.0, 5.0, 8.0)).norm() < 1e-4);
        assert!(c.target.norm() < 1e-6);
    }

    #[test]
    fn azimuth_clamp_applies_when_configured() {
        let mut c = controls();
        c.min_azimuth_angle = -0.5;
        c.max_azimuth_angle = 0.5;
        c.pointer_down(MouseButton::Right, Vec2::zeros());
        c.pointer_move(Vec2::new(1e4, 0.0));
        c.pointer_up();
        c.update();
        let offset = c.position - c.target;
        let theta = offset.x.atan2(offset.z);
        assert!(theta >= -0.5 - 1e-4 && theta <= 0.5 + 1e-4);
    }
}
