use glam::Vec3;
use velocity_solver::{
    BodyHandle, BodySet, ConstraintBatch, ConstraintRow, ImpulseSnapshot, ProjectedGaussSeidel,
    RigidBody, SolverConfig,
};

const GRAVITY: f32 = 9.81;
const TIME_STEP: f32 = 1.0 / 60.0;
const FRAMES: u32 = 90;
const FRICTION: f32 = 0.5;

/// Unit cube sliding on static ground. Integration lives here, not in the
/// library: the solver only produces velocity deltas.
struct SlidingBox {
    handle: BodyHandle,
    velocity: Vec3,
    angular_velocity: Vec3,
    position: Vec3,
    inverse_mass: f32,
    inverse_inertia: f32,
}

impl SlidingBox {
    fn contact_points() -> [Vec3; 4] {
        [
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, -0.5),
        ]
    }

    /// Row restricting the box's velocity along `direction` at contact `r`.
    fn row(&self, ground: BodyHandle, r: Vec3, direction: Vec3) -> ConstraintRow {
        let angular = r.cross(direction);
        let b1 = direction * self.inverse_mass;
        let b2 = angular * self.inverse_inertia;
        let diagonal = direction.dot(b1) + angular.dot(b2);
        let relative_velocity = direction.dot(self.velocity) + angular.dot(self.angular_velocity);

        ConstraintRow::new(self.handle, ground)
            .with_jacobian(direction, angular, Vec3::ZERO, Vec3::ZERO)
            .with_response(b1, b2, Vec3::ZERO, Vec3::ZERO)
            .with_diagonal(diagonal)
            .with_target(-relative_velocity)
    }

    fn build_contacts(&self, ground: BodyHandle) -> ConstraintBatch {
        let mut batch = ConstraintBatch::with_capacity(12);
        for r in Self::contact_points() {
            let normal = batch.push(self.row(ground, r, Vec3::Y).with_bounds(0.0, f32::INFINITY));
            batch.push(self.row(ground, r, Vec3::X).with_coupling(normal, FRICTION));
            batch.push(self.row(ground, r, Vec3::Z).with_coupling(normal, FRICTION));
        }
        batch
    }

    fn apply_impulses(&mut self, batch: &ConstraintBatch) {
        for row in batch.rows() {
            self.velocity += row.b1 * row.lambda;
            self.angular_velocity += row.b2 * row.lambda;
        }
    }

    fn apply_deltas(&mut self, bodies: &mut BodySet) {
        let body = &mut bodies[self.handle];
        self.velocity += body.delta_linear_velocity;
        self.angular_velocity += body.delta_angular_velocity;
        body.clear_deltas();
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut bodies = BodySet::with_capacity(2);
    let handle = bodies.insert(RigidBody::new());
    let ground = bodies.insert(RigidBody::new());

    let mut sliding = SlidingBox {
        handle,
        velocity: Vec3::new(3.0, 0.0, 0.0),
        angular_velocity: Vec3::ZERO,
        position: Vec3::new(0.0, 0.5, 0.0),
        inverse_mass: 1.0,
        inverse_inertia: 6.0,
    };

    let config = SolverConfig::new().error_tolerance(1e-5).maximum_iterations(20);
    let mut solver = match ProjectedGaussSeidel::with_config(config) {
        Ok(solver) => solver,
        Err(err) => {
            log::error!("{err}");
            return;
        }
    };

    let mut previous: Option<ConstraintBatch> = None;

    for frame in 0..FRAMES {
        sliding.velocity.y -= GRAVITY * TIME_STEP;

        // Contacts are the same every frame, so last frame's impulses line up.
        // They go into the velocity first; the solver then only adds the
        // correction on top of them.
        let warm_start = match &previous {
            Some(prev) => {
                sliding.apply_impulses(prev);
                prev.impulses()
            }
            None => ImpulseSnapshot::default(),
        };

        let mut batch = sliding.build_contacts(ground);
        if !warm_start.is_empty() {
            if let Err(err) = batch.restore_impulses(&warm_start) {
                log::warn!("frame {frame}: cold start, {err}");
            }
        }

        if let Err(err) = batch.validate() {
            log::error!("frame {frame}: {err}");
            return;
        }

        let outcome = solver.solve(&mut batch, &mut bodies);
        sliding.apply_deltas(&mut bodies);
        sliding.position += sliding.velocity * TIME_STEP;

        if frame % 10 == 0 || frame + 1 == FRAMES {
            log::info!(
                "frame {:3}: sweeps {:2} converged {:5} | x {:6.3} y {:6.3} | vx {:6.3} vy {:7.4}",
                frame,
                outcome.iterations,
                outcome.converged,
                sliding.position.x,
                sliding.position.y,
                sliding.velocity.x,
                sliding.velocity.y,
            );
        }

        previous = Some(batch);
    }
}
