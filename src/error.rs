//! Solver error types
//!
//! `solve` itself never fails: malformed rows degrade silently and
//! non-convergence is reported through [`SolveOutcome`](crate::solver::SolveOutcome).
//! Only configuration, batch validation and impulse restore return
//! `Result<T, SolverError>`.

use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    /// A solver setting was outside its accepted range.
    InvalidConfiguration {
        reason: &'static str,
    },
    /// A row carries data the solver cannot use (bad diagonal, inverted bounds).
    InvalidRow {
        row: usize,
        reason: &'static str,
    },
    /// A friction row couples to a row that is not in the batch, or to itself.
    DanglingCoupling {
        row: usize,
        target: usize,
    },
    /// An impulse snapshot does not match the batch it is restored into.
    SnapshotMismatch {
        expected: usize,
        found: usize,
    },
    /// A byte image of impulses is not a whole number of `f32` values.
    MalformedSnapshot {
        len: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid solver configuration: {reason}")
            }
            Self::InvalidRow { row, reason } => write!(f, "invalid constraint row {row}: {reason}"),
            Self::DanglingCoupling { row, target } => {
                write!(f, "constraint row {row} couples to unusable row {target}")
            }
            Self::SnapshotMismatch { expected, found } => {
                write!(
                    f,
                    "impulse snapshot holds {found} values, batch has {expected} rows"
                )
            }
            Self::MalformedSnapshot { len } => {
                write!(f, "impulse byte image of length {len} is not a multiple of 4")
            }
        }
    }
}

impl std::error::Error for SolverError {}
