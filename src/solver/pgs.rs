use super::cache::BodyVelocityCache;
use super::config::{check_iterations, check_tolerance, SolverConfig};
use super::outcome::SolveOutcome;
use crate::body::BodySet;
use crate::constraint::{project, ConstraintBatch, ConstraintRow};
use crate::error::SolverError;

/// Projected Gauss-Seidel relaxation over a batch of constraint rows.
///
/// Each sweep visits the rows in batch order. A row reads the body deltas as
/// left by the rows before it in the same sweep, takes the unconstrained
/// impulse step, projects the accumulated impulse onto its bounds and pushes
/// the applied change back into the deltas straight away. Sweeping stops when
/// every row of a sweep moved by at most `error_tolerance` (measured as
/// `|Δλ · diagonal|`) or after `maximum_iterations` sweeps.
///
/// Row impulses are warm starts: they are read as the initial guess and left
/// in place for the next call. Body deltas are accumulated in a private cache
/// and only copied to the bodies at the end, and only for bodies whose delta
/// ended up non-zero.
#[derive(Debug, Clone, Default)]
pub struct ProjectedGaussSeidel {
    config: SolverConfig,
    cache: BodyVelocityCache,
}

impl ProjectedGaussSeidel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(Self {
            config,
            cache: BodyVelocityCache::new(),
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn error_tolerance(&self) -> f32 {
        self.config.error_tolerance
    }

    pub fn maximum_iterations(&self) -> u32 {
        self.config.maximum_iterations
    }

    pub fn set_error_tolerance(&mut self, epsilon: f32) -> Result<(), SolverError> {
        check_tolerance(epsilon)?;
        self.config.error_tolerance = epsilon;
        Ok(())
    }

    pub fn set_maximum_iterations(&mut self, n: u32) -> Result<(), SolverError> {
        check_iterations(n)?;
        self.config.maximum_iterations = n;
        Ok(())
    }

    pub fn cache(&self) -> &BodyVelocityCache {
        &self.cache
    }

    pub fn solve(&mut self, batch: &mut ConstraintBatch, bodies: &mut BodySet) -> SolveOutcome {
        self.solve_rows(batch.rows_mut(), bodies)
    }

    pub fn solve_rows(&mut self, rows: &mut [ConstraintRow], bodies: &mut BodySet) -> SolveOutcome {
        self.cache.reset();

        if rows.is_empty() {
            return SolveOutcome::EMPTY;
        }

        let tolerance = self.config.error_tolerance;
        let max_iterations = self.config.maximum_iterations;

        let mut outcome = SolveOutcome {
            converged: false,
            ..SolveOutcome::EMPTY
        };

        for sweep in 0..max_iterations {
            let (residual, residual_low, changed) = self.sweep(rows, tolerance);

            outcome.iterations = sweep + 1;
            outcome.residual = residual;
            outcome.total_residual += residual;
            outcome.changed |= changed;

            log::trace!("pgs sweep {}: residual {:e}", sweep + 1, residual);

            if residual_low {
                outcome.converged = true;
                break;
            }
        }

        self.flush(bodies);

        log::debug!(
            "pgs solved {} rows in {} sweeps (converged: {}, residual: {:e})",
            rows.len(),
            outcome.iterations,
            outcome.converged,
            outcome.residual
        );

        outcome
    }

    /// One pass over `rows`. Returns the summed residual, whether every row
    /// stayed within `tolerance`, and whether any impulse changed.
    fn sweep(&mut self, rows: &mut [ConstraintRow], tolerance: f32) -> (f32, bool, bool) {
        let mut residual = 0.0;
        let mut residual_low = true;
        let mut changed = false;

        for i in 0..rows.len() {
            let (lower, upper) = rows[i].effective_bounds(rows);
            rows[i].debug_assert_well_formed(i, rows);
            let row = &mut rows[i];

            let d1 = *self.cache.get(row.body1);
            let d2 = *self.cache.get(row.body2);
            let a = row.relative_velocity(d1.linear, d1.angular, d2.linear, d2.angular);

            let delta_lambda = (row.target - a) / row.diagonal;
            let lambda0 = row.lambda;
            row.lambda = project(lambda0 + delta_lambda, lower, upper);
            let applied = row.lambda - lambda0;

            let error = (applied * row.diagonal).abs();
            residual += error;
            if error > tolerance {
                residual_low = false;
            }
            if applied != 0.0 {
                changed = true;
            }

            self.cache.get(row.body1).apply(row.b1, row.b2, applied);
            self.cache.get(row.body2).apply(row.b3, row.b4, applied);
        }

        (residual, residual_low, changed)
    }

    /// Overwrites the deltas of every body the cache holds a non-zero delta for.
    fn flush(&self, bodies: &mut BodySet) {
        self.cache.for_each(|handle, delta| {
            if delta.is_zero() {
                return;
            }
            match bodies.get_mut(handle) {
                Some(body) => {
                    body.delta_linear_velocity = delta.linear;
                    body.delta_angular_velocity = delta.angular;
                }
                None => log::warn!(
                    "pgs: dropping velocity delta for unknown body {}",
                    handle.index()
                ),
            }
        });
    }
}
