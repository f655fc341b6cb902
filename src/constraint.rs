//! Constraint storage: springs, distance joints, pins and hinges.

use slotmap::new_key_type;

use crate::body::BodyHandle;
use crate::vector::Vec2;

new_key_type! {
    /// Stable handle into a [`crate::world::World`]'s constraint storage.
    pub struct ConstraintHandle;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Hooke's-law force proportional to stretch, with velocity damping.
    Spring,
    /// Positional correction pulling the anchor distance toward a rest length.
    Distance,
    /// One-sided positional correction pulling body A's anchor toward body B's.
    Pin,
    /// Reserved for a future angular constraint; currently a no-op in the solver.
    Hinge,
}

/// A partial constraint description consumed by [`Constraint::from_desc`].
#[derive(Debug, Clone)]
pub struct ConstraintDesc {
    pub kind: ConstraintKind,
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub anchor_a: Vec2,
    pub anchor_b: Vec2,
    pub stiffness: f64,
    pub damping: f64,
    /// Rest length, or `None` to adopt the anchor distance measured at the
    /// constraint's first solver pass (spring and distance constraints only).
    pub length: Option<f64>,
}

impl ConstraintDesc {
    pub fn new(kind: ConstraintKind, body_a: BodyHandle, body_b: BodyHandle) -> Self {
        Self {
            kind,
            body_a,
            body_b,
            anchor_a: Vec2::zero(),
            anchor_b: Vec2::zero(),
            stiffness: 0.5,
            damping: 0.1,
            length: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub anchor_a: Vec2,
    pub anchor_b: Vec2,
    pub stiffness: f64,
    pub damping: f64,
    pub length: Option<f64>,
}

impl Constraint {
    pub(crate) fn from_desc(desc: ConstraintDesc) -> Self {
        Self {
            kind: desc.kind,
            body_a: desc.body_a,
            body_b: desc.body_b,
            anchor_a: desc.anchor_a,
            anchor_b: desc.anchor_b,
            stiffness: desc.stiffness,
            damping: desc.damping,
            length: desc.length,
        }
    }

    /// Returns the effective rest length, caching the current measured
    /// length as the permanent rest length on the first call where `length`
    /// was left unset.
    pub(crate) fn effective_rest_length(&mut self, measured: f64) -> f64 {
        match self.length {
            Some(length) => length,
            None => {
                self.length = Some(measured);
                measured
            }
        }
    }
}
