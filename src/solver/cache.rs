use crate::body::BodyHandle;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// In-progress velocity correction of one body during a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct VelocityDelta {
    pub linear: Vec3,
    pub angular: Vec3,
}

impl VelocityDelta {
    pub const ZERO: Self = Self {
        linear: Vec3::ZERO,
        angular: Vec3::ZERO,
    };

    pub fn apply(&mut self, linear: Vec3, angular: Vec3, delta_lambda: f32) {
        self.linear += linear * delta_lambda;
        self.angular += angular * delta_lambda;
    }

    pub fn is_zero(&self) -> bool {
        self.linear == Vec3::ZERO && self.angular == Vec3::ZERO
    }
}

/// Per-solve scratch deltas, densely indexed by [`BodyHandle`].
///
/// Slots are created the first time a body is seen and kept across solves so
/// the storage is reused; [`reset`](Self::reset) zeroes their values.
#[derive(Debug, Clone, Default)]
pub struct BodyVelocityCache {
    deltas: Vec<VelocityDelta>,
    present: Vec<bool>,
}

impl BodyVelocityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bodies: usize) -> Self {
        Self {
            deltas: Vec::with_capacity(bodies),
            present: Vec::with_capacity(bodies),
        }
    }

    pub fn reset(&mut self) {
        for delta in &mut self.deltas {
            *delta = VelocityDelta::zeroed();
        }
    }

    pub fn get(&mut self, body: BodyHandle) -> &mut VelocityDelta {
        let index = body.index();
        if index >= self.deltas.len() {
            self.deltas.resize(index + 1, VelocityDelta::ZERO);
            self.present.resize(index + 1, false);
        }
        self.present[index] = true;
        &mut self.deltas[index]
    }

    pub fn peek(&self, body: BodyHandle) -> Option<&VelocityDelta> {
        let index = body.index();
        match self.present.get(index) {
            Some(true) => self.deltas.get(index),
            _ => None,
        }
    }

    pub fn for_each(&self, mut f: impl FnMut(BodyHandle, &VelocityDelta)) {
        for (index, delta) in self.deltas.iter().enumerate() {
            if self.present[index] {
                f(BodyHandle::from_index(index), delta);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.present.iter().any(|&p| p)
    }
}
