//! # velocity-solver
//!
//! A constraint-based rigid-body velocity solver. Given scalar constraint rows
//! (contacts, joints, friction) coupling pairs of bodies, it computes per-row
//! impulses that keep each row within its bounds and writes the resulting
//! velocity corrections into the bodies.
//!
//! ## Features
//! - Projected Gauss-Seidel solver with warm starting and early exit
//! - Friction rows bounded by their normal row's impulse
//! - Single-pass bound projection as a cheap alternative
//! - Dense, handle-indexed body and row storage
//!
//! ## Example
//! ```rust
//! use velocity_solver::{BodySet, ConstraintBatch, ConstraintRow, ProjectedGaussSeidel, RigidBody};
//! use glam::Vec3;
//!
//! let mut bodies = BodySet::new();
//! let box_body = bodies.insert(RigidBody::new());
//! let ground = bodies.insert(RigidBody::new());
//!
//! // Non-penetration along +Y, unit effective mass
//! let mut batch = ConstraintBatch::new();
//! let normal = batch.push(
//!     ConstraintRow::new(box_body, ground)
//!         .with_jacobian(Vec3::Y, Vec3::ZERO, Vec3::ZERO, Vec3::ZERO)
//!         .with_response(Vec3::Y, Vec3::ZERO, Vec3::ZERO, Vec3::ZERO)
//!         .with_diagonal(1.0)
//!         .with_target(2.0)
//!         .with_bounds(0.0, f32::INFINITY),
//! );
//!
//! let mut solver = ProjectedGaussSeidel::new();
//! let outcome = solver.solve(&mut batch, &mut bodies);
//! assert!(outcome.converged);
//! assert_eq!(batch[normal].lambda, 2.0);
//! assert_eq!(bodies[box_body].delta_linear_velocity, Vec3::new(0.0, 2.0, 0.0));
//! ```

pub mod body;
pub mod constraint;
pub mod error;
pub mod solver;

pub use body::{BodyHandle, BodySet, RigidBody};
pub use constraint::{
    ConstraintBatch, ConstraintRow, ImpulseSnapshot, RowBounds, RowHandle,
    DEFAULT_FRICTION_COEFFICIENT,
};
pub use error::SolverError;
pub use solver::{
    BodyVelocityCache, BoundProjection, ConstraintSolver, ProjectedGaussSeidel, SolveOutcome,
    SolverConfig, VelocityDelta,
};
