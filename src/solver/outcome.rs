/// What a solve call did. Purely diagnostic: the real results are the row
/// impulses and body deltas written in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOutcome {
    /// The last sweep stayed within tolerance (projection: nothing was clamped).
    pub converged: bool,
    /// Sweeps executed.
    pub iterations: u32,
    /// `Σ|Δλ · diagonal|` of the last sweep.
    pub residual: f32,
    /// `Σ|Δλ · diagonal|` over every sweep of the call.
    pub total_residual: f32,
    /// At least one row impulse changed.
    pub changed: bool,
}

impl SolveOutcome {
    pub(crate) const EMPTY: Self = Self {
        converged: true,
        iterations: 0,
        residual: 0.0,
        total_residual: 0.0,
        changed: false,
    };

    /// `1.0` if any impulse changed, `0.0` otherwise.
    pub fn signal(&self) -> f32 {
        if self.changed {
            1.0
        } else {
            0.0
        }
    }
}
