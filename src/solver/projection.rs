use super::outcome::SolveOutcome;
use crate::body::{BodyHandle, BodySet};
use crate::constraint::{project, ConstraintBatch, ConstraintRow};
use glam::Vec3;

/// Single pass that only clamps the resident impulses into their bounds.
///
/// This is the projection step of [`ProjectedGaussSeidel`](super::ProjectedGaussSeidel)
/// with the unconstrained update forced to zero: `target`, `diagonal` and the
/// Jacobian are never read. Any clamping is pushed straight into the bodies'
/// deltas, with no intermediate cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundProjection;

impl BoundProjection {
    pub fn new() -> Self {
        Self
    }

    pub fn solve(&self, batch: &mut ConstraintBatch, bodies: &mut BodySet) -> SolveOutcome {
        self.solve_rows(batch.rows_mut(), bodies)
    }

    pub fn solve_rows(&self, rows: &mut [ConstraintRow], bodies: &mut BodySet) -> SolveOutcome {
        if rows.is_empty() {
            return SolveOutcome::EMPTY;
        }

        let mut projected = false;
        let mut residual = 0.0;

        for i in 0..rows.len() {
            let (lower, upper) = rows[i].effective_bounds(rows);
            rows[i].debug_assert_well_formed(i, rows);
            let row = &mut rows[i];

            let lambda0 = row.lambda;
            row.lambda = project(lambda0, lower, upper);
            let applied = row.lambda - lambda0;

            if applied == 0.0 {
                continue;
            }
            projected = true;
            residual += applied.abs();

            apply_to_body(bodies, row.body1, row.b1, row.b2, applied);
            apply_to_body(bodies, row.body2, row.b3, row.b4, applied);
        }

        log::debug!(
            "projection over {} rows (changed: {})",
            rows.len(),
            projected
        );

        SolveOutcome {
            converged: !projected,
            iterations: 1,
            residual,
            total_residual: residual,
            changed: projected,
        }
    }
}

fn apply_to_body(
    bodies: &mut BodySet,
    handle: BodyHandle,
    linear: Vec3,
    angular: Vec3,
    delta: f32,
) {
    match bodies.get_mut(handle) {
        Some(body) => body.apply_impulse_response(linear, angular, delta),
        None => log::warn!(
            "projection: dropping velocity delta for unknown body {}",
            handle.index()
        ),
    }
}
