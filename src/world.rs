//! Owns all simulation state and runs one fixed-size physics step.

use slotmap::SlotMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyDesc, BodyHandle};
use crate::bounds::{self, Bounds};
use crate::collision::{self, Manifold};
use crate::constraint::{Constraint, ConstraintDesc, ConstraintHandle};
use crate::forces::{self, ForceField, ForceFieldHandle, ForceFieldKind};
use crate::integrator;
use crate::sleep;
use crate::solver;
use crate::vector::Vec2;

/// World-wide tunables. `substeps` and `velocity_iterations` are clamped to
/// at least 1 and logged at [`World::new`] if a caller-supplied value needed
/// clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    pub gravity: Vec2,
    pub bounds: Option<Bounds>,
    pub substeps: u32,
    pub velocity_iterations: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::zero(),
            bounds: None,
            substeps: 4,
            velocity_iterations: 4,
        }
    }
}

pub struct World {
    bodies: SlotMap<BodyHandle, Body>,
    constraints: SlotMap<ConstraintHandle, Constraint>,
    force_fields: SlotMap<ForceFieldHandle, ForceField>,
    config: WorldConfig,
    manifolds: Vec<Manifold>,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let substeps = config.substeps.max(1);
        let velocity_iterations = config.velocity_iterations.max(1);
        if substeps != config.substeps {
            log::warn!(
                "world config substeps {} clamped to {}",
                config.substeps,
                substeps
            );
        }
        if velocity_iterations != config.velocity_iterations {
            log::warn!(
                "world config velocityIterations {} clamped to {}",
                config.velocity_iterations,
                velocity_iterations
            );
        }
        Self {
            bodies: SlotMap::with_key(),
            constraints: SlotMap::with_key(),
            force_fields: SlotMap::with_key(),
            config: WorldConfig {
                substeps,
                velocity_iterations,
                ..config
            },
            manifolds: Vec::with_capacity(64),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        self.bodies.insert(Body::from_desc(desc))
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.bodies.remove(handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter()
    }

    pub fn add_constraint(&mut self, desc: ConstraintDesc) -> ConstraintHandle {
        self.constraints.insert(Constraint::from_desc(desc))
    }

    pub fn remove_constraint(&mut self, handle: ConstraintHandle) -> Option<Constraint> {
        self.constraints.remove(handle)
    }

    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintHandle, &Constraint)> {
        self.constraints.iter()
    }

    pub fn add_force_field(&mut self, field: ForceField) -> ForceFieldHandle {
        self.force_fields.insert(field)
    }

    pub fn remove_force_field(&mut self, handle: ForceFieldHandle) -> Option<ForceField> {
        self.force_fields.remove(handle)
    }

    pub fn remove_force_fields(&mut self, kind: ForceFieldKind) {
        self.force_fields.retain(|_, field| field.kind() != kind);
    }

    /// Adds an instantaneous change in momentum (`impulse = mass * dv`).
    /// A no-op on static bodies. Wakes the body.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            if body.is_static() {
                return;
            }
            let inv_mass = body.inv_mass();
            body.velocity += impulse * inv_mass;
            sleep::wake(body);
        }
    }

    /// Teleports a body, resetting its previous position so interpolation
    /// does not draw a stale trail from before the jump. Wakes the body.
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.position = position;
            body.previous_position = position;
            sleep::wake(body);
        }
    }

    /// A no-op on static bodies. Wakes the body.
    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            if body.is_static() {
                return;
            }
            body.velocity = velocity;
            sleep::wake(body);
        }
    }

    /// Advances the simulation by exactly `dt`, split into
    /// `config.substeps` equal sub-steps. Each sub-step runs, in order:
    /// force accumulation, integration, `velocity_iterations` constraint
    /// solver passes, collision detection and resolution, bounds reflection,
    /// and sleep classification.
    pub fn step(&mut self, dt: f64) {
        let substeps = self.config.substeps.max(1);
        let sub_dt = dt / substeps as f64;
        let has_explicit_drag = self
            .force_fields
            .values()
            .any(|field| matches!(field, ForceField::Drag { .. }));

        for _ in 0..substeps {
            for (_, body) in self.bodies.iter_mut() {
                if body.is_static() {
                    continue;
                }
                forces::apply_world_gravity(body, self.config.gravity);
                forces::apply(body, &self.force_fields, self.config.gravity);
                if !has_explicit_drag {
                    forces::apply_implicit_drag(body);
                }
            }

            for (_, body) in self.bodies.iter_mut() {
                if body.is_static() {
                    continue;
                }
                integrator::integrate(body, sub_dt);
            }

            for _ in 0..self.config.velocity_iterations {
                solver::solve_pass(&mut self.bodies, &mut self.constraints);
            }

            collision::detect(&self.bodies, &mut self.manifolds);
            for index in 0..self.manifolds.len() {
                let manifold = self.manifolds[index];
                collision::resolve::resolve(&mut self.bodies, &manifold);
                wake_pair(&mut self.bodies, manifold.body_a, manifold.body_b);
            }

            if let Some(world_bounds) = self.config.bounds {
                for (_, body) in self.bodies.iter_mut() {
                    if body.is_static() {
                        continue;
                    }
                    bounds::reflect(body, &world_bounds);
                }
            }

            for (_, body) in self.bodies.iter_mut() {
                if body.is_static() {
                    continue;
                }
                sleep::update_sleep_state(body);
            }
        }
    }
}

fn wake_pair(bodies: &mut SlotMap<BodyHandle, Body>, a: BodyHandle, b: BodyHandle) {
    let (a_sleeping, a_static) = match bodies.get(a) {
        Some(body) => (body.is_sleeping(), body.is_static()),
        None => return,
    };
    let (b_sleeping, b_static) = match bodies.get(b) {
        Some(body) => (body.is_sleeping(), body.is_static()),
        None => return,
    };
    match (a_sleeping, b_sleeping) {
        (true, false) if !b_static => {
            if let Some(body) = bodies.get_mut(a) {
                sleep::wake(body);
            }
        }
        (false, true) if !a_static => {
            if let Some(body) = bodies.get_mut(b) {
                sleep::wake(body);
            }
        }
        _ => {}
    }
}
