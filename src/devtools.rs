//! Inspection and pause/step hooks for host tooling.
//!
//! The core has no clock of its own (see [`crate::engine::Engine::update`]),
//! so a snapshot's timestamp is supplied by the caller rather than read
//! from a wall clock here.

use std::time::Duration;

use crate::body::{Body, BodyHandle};
use crate::constraint::{Constraint, ConstraintHandle};

/// A point-in-time copy of the simulation state, handed to a
/// [`DevtoolsHook`] for external inspection (e.g. an editor overlay).
#[derive(Debug, Clone)]
pub struct DevtoolsSnapshot {
    pub timestamp: Duration,
    pub bodies: Vec<(BodyHandle, Body)>,
    pub constraints: Vec<(ConstraintHandle, Constraint)>,
}

/// Implemented by a host embedding the engine to observe and control
/// stepping without modifying the simulation's own update loop.
pub trait DevtoolsHook: Send {
    /// Receives a snapshot taken via [`crate::engine::Engine::devtools_snapshot`].
    /// The engine never calls this on its own; it is the host's job to pull a
    /// snapshot and hand it to the hook on whatever cadence it wants.
    fn on_snapshot(&mut self, snapshot: &DevtoolsSnapshot);

    /// While this returns `true`, the engine's accumulator stops advancing
    /// and no fixed steps run except via [`DevtoolsHook::step_once_requested`].
    fn paused(&self) -> bool {
        false
    }

    /// Polled once per `update` call while paused; returning `true` advances
    /// the simulation by exactly one fixed step and is expected to return to
    /// `false` afterward (edge-triggered, not level-triggered).
    fn step_once_requested(&mut self) -> bool {
        false
    }
}
