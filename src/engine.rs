//! Fixed-timestep driver with render interpolation, wrapping [`World`].

use std::time::Duration;

use crate::body::{Body, BodyDesc, BodyHandle};
use crate::constraint::{Constraint, ConstraintDesc, ConstraintHandle};
use crate::devtools::{DevtoolsHook, DevtoolsSnapshot};
use crate::forces::{ForceField, ForceFieldHandle, ForceFieldKind};
use crate::vector::{self, Vec2};
use crate::world::{World, WorldConfig};

/// The simulation's fixed step size: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Frame times longer than this are clamped before being fed to the
/// accumulator, capping the number of fixed steps a single `update` call can
/// run and avoiding the "spiral of death" under a stalled host.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Facade combining a [`World`] with the fixed-timestep accumulator and
/// render-interpolation alpha needed to decouple physics from a variable
/// frame rate.
pub struct Engine {
    world: World,
    accumulator: f64,
    alpha: f64,
    devtools_hook: Option<Box<dyn DevtoolsHook>>,
}

impl Engine {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            world: World::new(config),
            accumulator: 0.0,
            alpha: 0.0,
            devtools_hook: None,
        }
    }

    /// Consumes `frame_time` seconds of wall-clock time, running as many
    /// fixed [`FIXED_DT`] steps as the accumulator allows. `frame_time` is
    /// clamped to [`MAX_FRAME_TIME`] first.
    ///
    /// If a devtools hook is installed and reports `paused`, the accumulator
    /// does not advance; a single fixed step still runs if the hook reports
    /// a one-shot step request.
    pub fn update(&mut self, frame_time: f64) {
        if let Some(hook) = &self.devtools_hook {
            if hook.paused() {
                let step_once = self
                    .devtools_hook
                    .as_mut()
                    .map(|hook| hook.step_once_requested())
                    .unwrap_or(false);
                if step_once {
                    self.world.step(FIXED_DT);
                }
                return;
            }
        }

        if frame_time > MAX_FRAME_TIME {
            log::debug!("frame time {frame_time} clamped to {MAX_FRAME_TIME}");
        }
        let clamped = frame_time.clamp(0.0, MAX_FRAME_TIME);

        self.accumulator += clamped;
        while self.accumulator >= FIXED_DT {
            self.world.step(FIXED_DT);
            self.accumulator -= FIXED_DT;
        }
        self.alpha = self.accumulator / FIXED_DT;
    }

    /// Fraction of a fixed step left over in the accumulator after the last
    /// `update` call, in `[0, 1)`. Used to interpolate render positions
    /// between the previous and current physics state.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn interpolated_position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.world
            .body(handle)
            .map(|body| vector::lerp(body.previous_position(), body.position(), self.alpha))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        self.world.add_body(desc)
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.world.remove_body(handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.world.body(handle)
    }

    pub fn bodies_iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.world.bodies()
    }

    pub fn add_constraint(&mut self, desc: ConstraintDesc) -> ConstraintHandle {
        self.world.add_constraint(desc)
    }

    pub fn remove_constraint(&mut self, handle: ConstraintHandle) -> Option<Constraint> {
        self.world.remove_constraint(handle)
    }

    pub fn constraints_iter(&self) -> impl Iterator<Item = (ConstraintHandle, &Constraint)> {
        self.world.constraints()
    }

    pub fn add_force_field(&mut self, field: ForceField) -> ForceFieldHandle {
        self.world.add_force_field(field)
    }

    pub fn remove_force_field(&mut self, handle: ForceFieldHandle) -> Option<ForceField> {
        self.world.remove_force_field(handle)
    }

    pub fn remove_force_fields(&mut self, kind: ForceFieldKind) {
        self.world.remove_force_fields(kind);
    }

    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2) {
        self.world.apply_impulse(handle, impulse);
    }

    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        self.world.set_position(handle, position);
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        self.world.set_velocity(handle, velocity);
    }

    pub fn install_devtools_hook(&mut self, hook: Box<dyn DevtoolsHook>) {
        log::trace!("devtools hook installed");
        self.devtools_hook = Some(hook);
    }

    pub fn uninstall_devtools_hook(&mut self) -> Option<Box<dyn DevtoolsHook>> {
        log::trace!("devtools hook uninstalled");
        self.devtools_hook.take()
    }

    pub fn devtools_snapshot(&self, timestamp: Duration) -> DevtoolsSnapshot {
        DevtoolsSnapshot {
            timestamp,
            bodies: self
                .world
                .bodies()
                .map(|(handle, body)| (handle, body.clone()))
                .collect(),
            constraints: self
                .world
                .constraints()
                .map(|(handle, constraint)| (handle, constraint.clone()))
                .collect(),
        }
    }
}
