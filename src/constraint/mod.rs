//! Constraint rows
//!
//! A [`ConstraintRow`] is one scalar velocity constraint between two bodies,
//! already linearized by the caller. Rows are grouped in a [`ConstraintBatch`]
//! whose order is the solve order; friction rows point at their normal row
//! through a [`RowHandle`] into the same batch.

mod batch;
mod row;
mod snapshot;

pub use batch::ConstraintBatch;
pub use row::{ConstraintRow, RowBounds, RowHandle, DEFAULT_FRICTION_COEFFICIENT};
pub use snapshot::ImpulseSnapshot;

pub(crate) use row::project;
