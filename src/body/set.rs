use super::rigid_body::RigidBody;

/// Stable index of a body inside a [`BodySet`].
///
/// Handles are handed out once, in insertion order, and never reused, so the
/// solver can key dense scratch storage on them. Only [`BodySet::insert`]
/// creates them, which keeps every index below the number of bodies ever
/// registered and bounds the solver's scratch allocation by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: Vec<RigidBody>,
}

impl BodySet {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle::from_index(self.bodies.len());
        self.bodies.push(body);
        handle
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.index())
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        handle.index() < self.bodies.len()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyHandle::from_index(i), body))
    }

    pub fn clear_velocity_deltas(&mut self) {
        for body in &mut self.bodies {
            body.clear_deltas();
        }
    }
}

impl std::ops::Index<BodyHandle> for BodySet {
    type Output = RigidBody;

    fn index(&self, handle: BodyHandle) -> &RigidBody {
        &self.bodies[handle.index()]
    }
}

impl std::ops::IndexMut<BodyHandle> for BodySet {
    fn index_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.index()]
    }
}
