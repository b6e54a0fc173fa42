//! Rigid bodies as seen by the velocity solver
//!
//! The solver only touches the velocity-delta accumulators of a body. Bodies
//! live in a [`BodySet`] and are referenced by a stable [`BodyHandle`].

mod rigid_body;
mod set;

pub use rigid_body::RigidBody;
pub use set::{BodyHandle, BodySet};
