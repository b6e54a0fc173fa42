use crate::body::BodyHandle;
use glam::Vec3;
use std::f32::consts::FRAC_1_SQRT_2;

/// Friction coefficient used by [`RowBounds::coupled_default`].
pub const DEFAULT_FRICTION_COEFFICIENT: f32 = 0.3;

/// Position of a row inside its [`ConstraintBatch`](super::ConstraintBatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(pub(crate) u32);

impl RowHandle {
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Admissible range of a row's accumulated impulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowBounds {
    /// Fixed `[min, max]`.
    Static { min: f32, max: f32 },
    /// Friction box tied to a normal row: `±normal.lambda · coefficient · √2/2`.
    ///
    /// The normal row's current impulse is read every time the bounds are
    /// evaluated, so the box follows it within a sweep.
    Coupled { normal: RowHandle, coefficient: f32 },
}

impl RowBounds {
    pub const UNBOUNDED: Self = Self::Static {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Non-penetration contact: the impulse may only push.
    pub const NON_NEGATIVE: Self = Self::Static {
        min: 0.0,
        max: f32::INFINITY,
    };

    pub fn fixed(min: f32, max: f32) -> Self {
        Self::Static { min, max }
    }

    pub fn coupled(normal: RowHandle, coefficient: f32) -> Self {
        Self::Coupled {
            normal,
            coefficient,
        }
    }

    pub fn coupled_default(normal: RowHandle) -> Self {
        Self::coupled(normal, DEFAULT_FRICTION_COEFFICIENT)
    }

    pub fn coupling(&self) -> Option<RowHandle> {
        match *self {
            Self::Static { .. } => None,
            Self::Coupled { normal, .. } => Some(normal),
        }
    }
}

impl Default for RowBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// One scalar velocity constraint between two bodies.
///
/// `j1..j4` are the Jacobian blocks against body 1 linear, body 1 angular,
/// body 2 linear and body 2 angular velocity. `b1..b4` are the matching
/// `M⁻¹Jᵀ` columns that turn an impulse change into velocity deltas.
/// `diagonal` is `JM⁻¹Jᵀ` and must be positive; only debug builds check it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintRow {
    pub body1: BodyHandle,
    pub body2: BodyHandle,
    pub j1: Vec3,
    pub j2: Vec3,
    pub j3: Vec3,
    pub j4: Vec3,
    pub b1: Vec3,
    pub b2: Vec3,
    pub b3: Vec3,
    pub b4: Vec3,
    pub diagonal: f32,
    pub target: f32,
    pub lambda: f32,
    pub bounds: RowBounds,
}

impl ConstraintRow {
    pub fn new(body1: BodyHandle, body2: BodyHandle) -> Self {
        Self {
            body1,
            body2,
            j1: Vec3::ZERO,
            j2: Vec3::ZERO,
            j3: Vec3::ZERO,
            j4: Vec3::ZERO,
            b1: Vec3::ZERO,
            b2: Vec3::ZERO,
            b3: Vec3::ZERO,
            b4: Vec3::ZERO,
            diagonal: 1.0,
            target: 0.0,
            lambda: 0.0,
            bounds: RowBounds::UNBOUNDED,
        }
    }

    pub fn with_jacobian(mut self, j1: Vec3, j2: Vec3, j3: Vec3, j4: Vec3) -> Self {
        self.j1 = j1;
        self.j2 = j2;
        self.j3 = j3;
        self.j4 = j4;
        self
    }

    pub fn with_response(mut self, b1: Vec3, b2: Vec3, b3: Vec3, b4: Vec3) -> Self {
        self.b1 = b1;
        self.b2 = b2;
        self.b3 = b3;
        self.b4 = b4;
        self
    }

    pub fn with_diagonal(mut self, diagonal: f32) -> Self {
        self.diagonal = diagonal;
        self
    }

    pub fn with_target(mut self, target: f32) -> Self {
        self.target = target;
        self
    }

    pub fn with_lambda(mut self, lambda: f32) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.bounds = RowBounds::fixed(min, max);
        self
    }

    pub fn with_coupling(mut self, normal: RowHandle, coefficient: f32) -> Self {
        self.bounds = RowBounds::coupled(normal, coefficient);
        self
    }

    /// Relative velocity of the row given the current body deltas.
    pub fn relative_velocity(&self, dv1: Vec3, dw1: Vec3, dv2: Vec3, dw2: Vec3) -> f32 {
        self.j1.dot(dv1) + self.j2.dot(dw1) + self.j3.dot(dv2) + self.j4.dot(dw2)
    }

    /// `(lower, upper)` against the current impulses of `rows`, the batch this
    /// row belongs to.
    pub fn effective_bounds(&self, rows: &[ConstraintRow]) -> (f32, f32) {
        match self.bounds {
            RowBounds::Static { min, max } => (min, max),
            RowBounds::Coupled {
                normal,
                coefficient,
            } => {
                let normal_lambda = rows.get(normal.index()).map_or(0.0, |row| row.lambda);
                let limit = normal_lambda * coefficient * FRAC_1_SQRT_2;
                (-limit, limit)
            }
        }
    }

    /// Debug-build check of what the solvers assume about row `index` of
    /// `rows`. Release builds skip it; see `ConstraintBatch::validate`.
    #[inline]
    pub(crate) fn debug_assert_well_formed(&self, index: usize, rows: &[ConstraintRow]) {
        debug_assert!(self.diagonal > 0.0, "row {index} has non-positive diagonal");
        match self.bounds {
            RowBounds::Static { min, max } => {
                debug_assert!(min <= max, "row {index} has inverted bounds [{min}, {max}]");
            }
            RowBounds::Coupled { normal, .. } => {
                debug_assert!(normal.index() != index, "row {index} couples to itself");
                debug_assert!(
                    normal.index() < rows.len(),
                    "friction row couples to missing row {}",
                    normal.index()
                );
            }
        }
    }

    pub fn effective_lower_bound(&self, rows: &[ConstraintRow]) -> f32 {
        self.effective_bounds(rows).0
    }

    pub fn effective_upper_bound(&self, rows: &[ConstraintRow]) -> f32 {
        self.effective_bounds(rows).1
    }
}

/// `max(lower, min(value, upper))`. Unlike `f32::clamp` this does not panic
/// on an inverted range; the lower bound wins.
#[inline]
pub(crate) fn project(value: f32, lower: f32, upper: f32) -> f32 {
    value.min(upper).max(lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn handles() -> (BodyHandle, BodyHandle) {
        (BodyHandle::from_index(0), BodyHandle::from_index(1))
    }

    #[test]
    fn static_bounds_are_returned_verbatim() {
        let (a, b) = handles();
        let row = ConstraintRow::new(a, b).with_bounds(-2.0, 3.5);
        assert_eq!(row.effective_bounds(&[]), (-2.0, 3.5));
        assert_eq!(row.effective_lower_bound(&[]), -2.0);
        assert_eq!(row.effective_upper_bound(&[]), 3.5);
    }

    #[test]
    fn coupled_bounds_follow_normal_lambda() {
        let (a, b) = handles();
        let normal = ConstraintRow::new(a, b).with_lambda(10.0);
        let friction = ConstraintRow::new(a, b).with_coupling(RowHandle::from_index(0), 0.3);
        let mut rows = [normal, friction];

        let (lo, hi) = rows[1].effective_bounds(&rows);
        assert_relative_eq!(hi, 10.0 * 0.3 * FRAC_1_SQRT_2, epsilon = 1e-6);
        assert_relative_eq!(lo, -hi);

        rows[0].lambda = 2.0;
        let (lo, hi) = rows[1].effective_bounds(&rows);
        assert_relative_eq!(hi, 2.0 * 0.3 * FRAC_1_SQRT_2, epsilon = 1e-6);
        assert_relative_eq!(lo, -hi);
    }

    #[test]
    fn coupled_default_uses_point_three() {
        let bounds = RowBounds::coupled_default(RowHandle::from_index(4));
        assert_eq!(
            bounds,
            RowBounds::Coupled {
                normal: RowHandle::from_index(4),
                coefficient: DEFAULT_FRICTION_COEFFICIENT,
            }
        );
        assert_eq!(bounds.coupling(), Some(RowHandle::from_index(4)));
        assert_eq!(RowBounds::UNBOUNDED.coupling(), None);
    }

    #[test]
    fn relative_velocity_sums_all_four_blocks() {
        let (a, b) = handles();
        let row = ConstraintRow::new(a, b).with_jacobian(Vec3::X, Vec3::Y, -Vec3::X, Vec3::Z);
        let v = row.relative_velocity(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        );
        assert_relative_eq!(v, 2.0 + 3.0 - 1.0 + 4.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "row 0 has inverted bounds")]
    fn inverted_static_bounds_trip_debug_check() {
        let (a, b) = handles();
        let rows = [ConstraintRow::new(a, b).with_bounds(1.0, -1.0)];
        rows[0].debug_assert_well_formed(0, &rows);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "row 1 couples to itself")]
    fn self_coupling_trips_debug_check() {
        let (a, b) = handles();
        let rows = [
            ConstraintRow::new(a, b),
            ConstraintRow::new(a, b).with_coupling(RowHandle::from_index(1), 0.3),
        ];
        rows[1].debug_assert_well_formed(1, &rows);
    }

    #[test]
    fn well_formed_rows_pass_debug_check() {
        let (a, b) = handles();
        let rows = [
            ConstraintRow::new(a, b).with_bounds(0.0, f32::INFINITY),
            ConstraintRow::new(a, b).with_coupling(RowHandle::from_index(0), 0.3),
        ];
        for (index, row) in rows.iter().enumerate() {
            row.debug_assert_well_formed(index, &rows);
        }
    }

    #[test]
    fn project_clamps_without_panicking_on_inverted_range() {
        assert_eq!(project(5.0, 0.0, 10.0), 5.0);
        assert_eq!(project(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(project(11.0, 0.0, 10.0), 10.0);
        assert_eq!(project(5.0, 1.0, -1.0), 1.0);
        assert_eq!(project(5.0, f32::NEG_INFINITY, f32::INFINITY), 5.0);
    }
}
