//! Velocity solvers
//!
//! Two strategies share one entry point, [`ConstraintSolver::solve`]:
//! - [`ProjectedGaussSeidel`]: iterative relaxation with warm starting,
//!   early exit on low residual and friction-box coupling.
//! - [`BoundProjection`]: one pass that only clamps the resident impulses.
//!
//! Both mutate row impulses in place and write velocity deltas into the
//! bodies they touch. A solve is single threaded and holds the batch and the
//! body set exclusively for its duration.

mod cache;
mod config;
mod outcome;
mod pgs;
mod projection;

pub use cache::{BodyVelocityCache, VelocityDelta};
pub use config::{SolverConfig, DEFAULT_ERROR_TOLERANCE, DEFAULT_MAXIMUM_ITERATIONS};
pub use outcome::SolveOutcome;
pub use pgs::ProjectedGaussSeidel;
pub use projection::BoundProjection;

use crate::body::BodySet;
use crate::constraint::{ConstraintBatch, ConstraintRow};
use crate::error::SolverError;

#[derive(Debug, Clone)]
pub enum ConstraintSolver {
    ProjectedGaussSeidel(ProjectedGaussSeidel),
    BoundProjection(BoundProjection),
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::ProjectedGaussSeidel(ProjectedGaussSeidel::new())
    }
}

impl ConstraintSolver {
    pub fn projected_gauss_seidel(config: SolverConfig) -> Result<Self, SolverError> {
        ProjectedGaussSeidel::with_config(config).map(Self::ProjectedGaussSeidel)
    }

    pub fn bound_projection() -> Self {
        Self::BoundProjection(BoundProjection::new())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ProjectedGaussSeidel(_) => "projected-gauss-seidel",
            Self::BoundProjection(_) => "bound-projection",
        }
    }

    /// Ignored by [`BoundProjection`], which has no tolerance.
    pub fn set_error_tolerance(&mut self, epsilon: f32) -> Result<(), SolverError> {
        match self {
            Self::ProjectedGaussSeidel(pgs) => pgs.set_error_tolerance(epsilon),
            Self::BoundProjection(_) => Ok(()),
        }
    }

    /// Ignored by [`BoundProjection`], which always makes a single pass.
    pub fn set_maximum_iterations(&mut self, n: u32) -> Result<(), SolverError> {
        match self {
            Self::ProjectedGaussSeidel(pgs) => pgs.set_maximum_iterations(n),
            Self::BoundProjection(_) => Ok(()),
        }
    }

    pub fn solve(&mut self, batch: &mut ConstraintBatch, bodies: &mut BodySet) -> SolveOutcome {
        self.solve_rows(batch.rows_mut(), bodies)
    }

    pub fn solve_rows(&mut self, rows: &mut [ConstraintRow], bodies: &mut BodySet) -> SolveOutcome {
        match self {
            Self::ProjectedGaussSeidel(pgs) => pgs.solve_rows(rows, bodies),
            Self::BoundProjection(projection) => projection.solve_rows(rows, bodies),
        }
    }
}

impl From<ProjectedGaussSeidel> for ConstraintSolver {
    fn from(solver: ProjectedGaussSeidel) -> Self {
        Self::ProjectedGaussSeidel(solver)
    }
}

impl From<BoundProjection> for ConstraintSolver {
    fn from(solver: BoundProjection) -> Self {
        Self::BoundProjection(solver)
    }
}
