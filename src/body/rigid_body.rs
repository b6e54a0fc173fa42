use glam::Vec3;

/// Per-step velocity corrections of a body, in its center-of-mass frame.
///
/// The solver is the only writer of these fields during a solve call. The
/// external stepper reads them when integrating and clears them afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigidBody {
    pub delta_linear_velocity: Vec3,
    pub delta_angular_velocity: Vec3,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deltas(linear: Vec3, angular: Vec3) -> Self {
        Self {
            delta_linear_velocity: linear,
            delta_angular_velocity: angular,
        }
    }

    pub fn apply_impulse_response(&mut self, linear: Vec3, angular: Vec3, delta_lambda: f32) {
        self.delta_linear_velocity += linear * delta_lambda;
        self.delta_angular_velocity += angular * delta_lambda;
    }

    pub fn clear_deltas(&mut self) {
        self.delta_linear_velocity = Vec3::ZERO;
        self.delta_angular_velocity = Vec3::ZERO;
    }

    pub fn has_deltas(&self) -> bool {
        self.delta_linear_velocity != Vec3::ZERO || self.delta_angular_velocity != Vec3::ZERO
    }
}
