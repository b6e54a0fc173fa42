use crate::error::SolverError;

pub const DEFAULT_ERROR_TOLERANCE: f32 = 1e-5;
pub const DEFAULT_MAXIMUM_ITERATIONS: u32 = 10;

/// Iteration budget of the Gauss-Seidel solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// A sweep converges when every row's `|Δλ · diagonal|` is at most this.
    pub error_tolerance: f32,
    pub maximum_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            error_tolerance: DEFAULT_ERROR_TOLERANCE,
            maximum_iterations: DEFAULT_MAXIMUM_ITERATIONS,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_tolerance(mut self, epsilon: f32) -> Self {
        self.error_tolerance = epsilon;
        self
    }

    pub fn maximum_iterations(mut self, n: u32) -> Self {
        self.maximum_iterations = n;
        self
    }

    pub fn validate(&self) -> Result<(), SolverError> {
        check_tolerance(self.error_tolerance)?;
        check_iterations(self.maximum_iterations)
    }
}

pub(crate) fn check_tolerance(epsilon: f32) -> Result<(), SolverError> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidConfiguration {
            reason: "error tolerance must be finite and positive",
        })
    }
}

pub(crate) fn check_iterations(n: u32) -> Result<(), SolverError> {
    if n >= 1 {
        Ok(())
    } else {
        Err(SolverError::InvalidConfiguration {
            reason: "maximum iterations must be at least 1",
        })
    }
}
