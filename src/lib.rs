//! A deterministic, headless 2D rigid-body physics core.
//!
//! The crate simulates circles, rectangles and (non-colliding) polygons
//! under gravity, drag, wind and attraction force fields, connected by
//! spring, distance and pin constraints, with brute-force collision
//! detection and impulse-based resolution. [`Engine`] is the usual entry
//! point: it wraps a [`World`] with a fixed-timestep accumulator so a host
//! running at any frame rate gets the same physics result.
//!
//! Nothing in this crate reads a wall clock, spawns a thread, or performs
//! file or network I/O; every observable output is a pure function of the
//! sequence of calls made against it, which is what lets two engines fed
//! the same inputs replay identically.

pub mod body;
pub mod bounds;
pub mod collision;
pub mod constraint;
pub mod devtools;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod sleep;
pub mod solver;
pub mod vector;
pub mod world;

pub use body::{Aabb, Body, BodyDesc, BodyHandle, Shape};
pub use bounds::Bounds;
pub use collision::Manifold;
pub use constraint::{Constraint, ConstraintDesc, ConstraintHandle, ConstraintKind};
pub use devtools::{DevtoolsHook, DevtoolsSnapshot};
pub use engine::{Engine, FIXED_DT, MAX_FRAME_TIME};
pub use forces::{Falloff, ForceField, ForceFieldHandle, ForceFieldKind};
pub use vector::Vec2;
pub use world::{World, WorldConfig};
