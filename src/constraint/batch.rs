use super::row::{ConstraintRow, RowBounds, RowHandle};
use super::snapshot::ImpulseSnapshot;
use crate::error::SolverError;

/// Ordered rows for one solve. Order is the Gauss-Seidel sweep order.
#[derive(Debug, Clone, Default)]
pub struct ConstraintBatch {
    rows: Vec<ConstraintRow>,
}

impl ConstraintBatch {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn from_rows(rows: Vec<ConstraintRow>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: ConstraintRow) -> RowHandle {
        let handle = RowHandle::from_index(self.rows.len());
        self.rows.push(row);
        handle
    }

    pub fn get(&self, handle: RowHandle) -> Option<&ConstraintRow> {
        self.rows.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: RowHandle) -> Option<&mut ConstraintRow> {
        self.rows.get_mut(handle.index())
    }

    pub fn rows(&self) -> &[ConstraintRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [ConstraintRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn effective_bounds(&self, handle: RowHandle) -> Option<(f32, f32)> {
        self.get(handle).map(|row| row.effective_bounds(&self.rows))
    }

    /// Checks the conditions the solvers assume but never test in release
    /// builds.
    ///
    /// A friction row must couple to an earlier row. The solvers still accept
    /// a later one, but then the normal impulse can drop after the friction
    /// row was clamped and the friction impulse ends the sweep outside its box.
    pub fn validate(&self) -> Result<(), SolverError> {
        for (index, row) in self.rows.iter().enumerate() {
            if !row.diagonal.is_finite() || row.diagonal <= 0.0 {
                return Err(SolverError::InvalidRow {
                    row: index,
                    reason: "diagonal must be finite and positive",
                });
            }
            match row.bounds {
                RowBounds::Static { min, max } => {
                    if min > max || min.is_nan() || max.is_nan() {
                        return Err(SolverError::InvalidRow {
                            row: index,
                            reason: "lower bound exceeds upper bound",
                        });
                    }
                }
                RowBounds::Coupled {
                    normal,
                    coefficient,
                } => {
                    if normal.index() >= index {
                        return Err(SolverError::DanglingCoupling {
                            row: index,
                            target: normal.index(),
                        });
                    }
                    if !coefficient.is_finite() || coefficient < 0.0 {
                        return Err(SolverError::InvalidRow {
                            row: index,
                            reason: "friction coefficient must be finite and non-negative",
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn impulses(&self) -> ImpulseSnapshot {
        ImpulseSnapshot::from_impulses(self.rows.iter().map(|row| row.lambda).collect())
    }

    /// Warm-starts every row from `snapshot`, which must come from a batch of
    /// the same length.
    pub fn restore_impulses(&mut self, snapshot: &ImpulseSnapshot) -> Result<(), SolverError> {
        let impulses = snapshot.impulses();
        if impulses.len() != self.rows.len() {
            return Err(SolverError::SnapshotMismatch {
                expected: self.rows.len(),
                found: impulses.len(),
            });
        }
        for (row, &lambda) in self.rows.iter_mut().zip(impulses) {
            row.lambda = lambda;
        }
        Ok(())
    }

    pub fn reset_impulses(&mut self) {
        for row in &mut self.rows {
            row.lambda = 0.0;
        }
    }
}

impl std::ops::Index<RowHandle> for ConstraintBatch {
    type Output = ConstraintRow;

    fn index(&self, handle: RowHandle) -> &ConstraintRow {
        &self.rows[handle.index()]
    }
}

impl std::ops::IndexMut<RowHandle> for ConstraintBatch {
    fn index_mut(&mut self, handle: RowHandle) -> &mut ConstraintRow {
        &mut self.rows[handle.index()]
    }
}
