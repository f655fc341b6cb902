//! Brute-force narrow-phase collision detection and impulse resolution.

pub mod narrow;
pub mod resolve;

use slotmap::SlotMap;

use crate::body::{Body, BodyHandle};
use crate::vector::Vec2;

/// A detected overlap between two bodies. `normal` points from `body_a`
/// toward `body_b`.
#[derive(Debug, Clone, Copy)]
pub struct Manifold {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub normal: Vec2,
    pub penetration: f64,
}

impl Manifold {
    pub fn overlap(&self) -> Vec2 {
        self.normal * self.penetration
    }
}

/// Tests every pair of bodies for overlap, appending manifolds to `out`.
/// `out` is cleared first; callers are expected to reuse the same buffer
/// across steps to avoid reallocating every substep.
///
/// This is deliberately O(n^2): there is no broad phase. Pairs where both
/// bodies are static, or both are asleep, are skipped without testing.
pub fn detect(bodies: &SlotMap<BodyHandle, Body>, out: &mut Vec<Manifold>) {
    out.clear();
    let mut skip = 0;
    for (a_key, a) in bodies.iter() {
        skip += 1;
        for (b_key, b) in bodies.iter().skip(skip) {
            if (a.is_static() && b.is_static()) || (a.is_sleeping() && b.is_sleeping()) {
                continue;
            }
            if let Some((normal, penetration)) = narrow::test(a, b) {
                out.push(Manifold {
                    body_a: a_key,
                    body_b: b_key,
                    normal,
                    penetration,
                });
            }
        }
    }
}
