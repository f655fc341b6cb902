//! Impulse-based collision resolution: restitution, Coulomb friction and
//! Baumgarte positional correction.

use slotmap::SlotMap;

use super::Manifold;
use crate::body::{Body, BodyHandle};
use crate::vector::EPSILON;

/// Relative normal speeds below this are treated as a perfectly inelastic
/// impact (restitution forced to zero) to avoid jitter from bodies that
/// repeatedly "bounce" at a near-rest contact.
pub const RESTITUTION_SLOP: f64 = 0.5;

/// Penetration allowed to remain uncorrected, preventing positional
/// correction from fighting the collision detector over floating point noise.
pub const BAUMGARTE_SLOP: f64 = 0.5;

/// Fraction of the remaining penetration corrected per resolution pass.
pub const BAUMGARTE_FACTOR: f64 = 0.4;

/// Applies impulse and positional correction for a single manifold.
/// A no-op if the pair is separating, or if both bodies are immovable.
pub fn resolve(bodies: &mut SlotMap<BodyHandle, Body>, manifold: &Manifold) {
    let (a_vel, a_inv_mass, a_rest, a_fric, a_pos) = match bodies.get(manifold.body_a) {
        Some(body) => (body.velocity(), body.inv_mass(), body.restitution, body.friction, body.position()),
        None => return,
    };
    let (b_vel, b_inv_mass, b_rest, b_fric, b_pos) = match bodies.get(manifold.body_b) {
        Some(body) => (body.velocity(), body.inv_mass(), body.restitution, body.friction, body.position()),
        None => return,
    };

    let total_inv_mass = a_inv_mass + b_inv_mass;
    if total_inv_mass < EPSILON {
        return;
    }

    let normal = manifold.normal;
    let rel_vel = b_vel - a_vel;
    let normal_speed = rel_vel.dot(normal);
    if normal_speed > 0.0 {
        return;
    }

    let restitution = if normal_speed.abs() < RESTITUTION_SLOP {
        0.0
    } else {
        a_rest.min(b_rest)
    };

    let j = -(1.0 + restitution) * normal_speed / total_inv_mass;
    let mut a_vel = a_vel - normal * (j * a_inv_mass);
    let mut b_vel = b_vel + normal * (j * b_inv_mass);

    let tangent_raw = rel_vel - normal * rel_vel.dot(normal);
    let tangent_len_sq = tangent_raw.magnitude_squared();
    if tangent_len_sq >= EPSILON * EPSILON {
        let tangent = tangent_raw / tangent_len_sq.sqrt();
        let mu = (a_fric * b_fric).sqrt();
        let max_friction = mu * j.abs();
        let jt = (-rel_vel.dot(tangent) / total_inv_mass).clamp(-max_friction, max_friction);
        a_vel -= tangent * (jt * a_inv_mass);
        b_vel += tangent * (jt * b_inv_mass);
    }

    let correction_mag = (manifold.penetration - BAUMGARTE_SLOP).max(0.0) * BAUMGARTE_FACTOR / total_inv_mass;
    let a_pos = a_pos - normal * (correction_mag * a_inv_mass);
    let b_pos = b_pos + normal * (correction_mag * b_inv_mass);

    if let Some(body) = bodies.get_mut(manifold.body_a) {
        body.velocity = a_vel;
        body.position = a_pos;
    }
    if let Some(body) = bodies.get_mut(manifold.body_b) {
        body.velocity = b_vel;
        body.position = b_pos;
    }
}
