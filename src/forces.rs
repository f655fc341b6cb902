//! Force field registry applied to every dynamic body each substep.

use slotmap::{new_key_type, SlotMap};

use crate::body::Body;
use crate::vector::{self, Vec2};

new_key_type! {
    /// Stable handle into a [`crate::world::World`]'s force field registry.
    pub struct ForceFieldHandle;
}

/// Squared-distance floor applied to attraction fields so a body that
/// coincides with (or sits very close to) the attractor does not receive an
/// unbounded force.
pub const MIN_DIST_SQ: f64 = 100.0;

/// Drag coefficient applied implicitly when no explicit [`ForceField::Drag`]
/// is registered, matching the always-on air resistance bodies experience
/// by default.
pub const DEFAULT_DRAG_STRENGTH: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Falloff {
    None,
    Linear,
    Quadratic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceField {
    /// Constant acceleration. `None` falls back to the world's configured gravity.
    Gravity { vector: Option<Vec2> },
    /// Linear drag opposing velocity, scaled by `1/mass`. `None` uses [`DEFAULT_DRAG_STRENGTH`].
    Drag { strength: Option<f64> },
    /// Constant force in a fixed direction, scaled by `invMass`. Skipped
    /// entirely (no fallback) when `direction` is `None`.
    Wind { direction: Option<Vec2>, strength: f64 },
    /// Force toward (positive strength) or away from (negative) a point.
    /// Skipped entirely (no fallback) when `point` is `None`.
    Attraction {
        point: Option<Vec2>,
        strength: f64,
        falloff: Falloff,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceFieldKind {
    Gravity,
    Drag,
    Wind,
    Attraction,
}

impl ForceField {
    pub fn kind(&self) -> ForceFieldKind {
        match self {
            ForceField::Gravity { .. } => ForceFieldKind::Gravity,
            ForceField::Drag { .. } => ForceFieldKind::Drag,
            ForceField::Wind { .. } => ForceFieldKind::Wind,
            ForceField::Attraction { .. } => ForceFieldKind::Attraction,
        }
    }
}

/// Accumulates every registered field's contribution into `body.acceleration`.
/// Static bodies are skipped entirely; the caller is expected to have
/// filtered them out already, but this guards direct callers too.
pub fn apply(body: &mut Body, fields: &SlotMap<ForceFieldHandle, ForceField>, default_gravity: Vec2) {
    if body.is_static {
        return;
    }
    for field in fields.values() {
        apply_one(body, field, default_gravity);
    }
}

fn apply_one(body: &mut Body, field: &ForceField, default_gravity: Vec2) {
    match field {
        ForceField::Gravity { vector } => {
            body.acceleration += vector.unwrap_or(default_gravity);
        }
        ForceField::Drag { strength } => {
            apply_drag(body, strength.unwrap_or(DEFAULT_DRAG_STRENGTH));
        }
        ForceField::Wind { direction, strength } => {
            let Some(direction) = direction else { return };
            body.acceleration += *direction * (*strength * body.inv_mass);
        }
        ForceField::Attraction { point, strength, falloff } => {
            let Some(point) = point else { return };
            let delta = *point - body.position;
            let dist_sq = delta.magnitude_squared().max(MIN_DIST_SQ);
            let direction = vector::normalize(delta);
            let magnitude = match falloff {
                Falloff::None => *strength,
                Falloff::Linear => strength / dist_sq.sqrt(),
                Falloff::Quadratic => strength / dist_sq,
            };
            body.acceleration += direction * (magnitude * body.inv_mass);
        }
    }
}

fn apply_drag(body: &mut Body, strength: f64) {
    if body.mass > 0.0 {
        body.acceleration += body.velocity * -(strength / body.mass);
    }
}

/// Applies [`DEFAULT_DRAG_STRENGTH`] drag. Used by the world when no
/// explicit drag field is registered for the frame.
pub fn apply_implicit_drag(body: &mut Body) {
    apply_drag(body, DEFAULT_DRAG_STRENGTH);
}

/// Applies the world's configured gravity unconditionally, every substep,
/// regardless of what is registered in the force field registry. This is
/// the baseline `WorldConfig.gravity` acceleration; a registered
/// [`ForceField::Gravity`] is a separate, additive field on top of it (one
/// that happens to fall back to this same vector when given no vector of
/// its own).
pub fn apply_world_gravity(body: &mut Body, gravity: Vec2) {
    if body.is_static {
        return;
    }
    body.acceleration += gravity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDesc;

    #[test]
    fn gravity_field_overrides_world_default() {
        let mut body = Body::from_desc(BodyDesc::default());
        let mut fields = SlotMap::with_key();
        fields.insert(ForceField::Gravity {
            vector: Some(Vec2::new(0.0, 5.0)),
        });
        apply(&mut body, &fields, Vec2::new(0.0, 980.0));
        assert_eq!(body.acceleration, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn gravity_field_falls_back_to_world_default() {
        let mut body = Body::from_desc(BodyDesc::default());
        let mut fields = SlotMap::with_key();
        fields.insert(ForceField::Gravity { vector: None });
        apply(&mut body, &fields, Vec2::new(0.0, 980.0));
        assert_eq!(body.acceleration, Vec2::new(0.0, 980.0));
    }

    #[test]
    fn static_bodies_never_accumulate_force() {
        let mut body = Body::from_desc(BodyDesc {
            is_static: true,
            ..Default::default()
        });
        let mut fields = SlotMap::with_key();
        fields.insert(ForceField::Gravity {
            vector: Some(Vec2::new(0.0, 980.0)),
        });
        apply(&mut body, &fields, Vec2::zero());
        assert_eq!(body.acceleration, Vec2::zero());
    }

    #[test]
    fn attraction_distance_is_floored() {
        let mut body = Body::from_desc(BodyDesc::default());
        let field = ForceField::Attraction {
            point: Some(body.position()),
            strength: 100.0,
            falloff: Falloff::Quadratic,
        };
        apply_one(&mut body, &field, Vec2::zero());
        assert!(body.acceleration.magnitude() <= 1.0 + 1e-9);
    }

    #[test]
    fn wind_with_no_direction_is_skipped_entirely() {
        let mut body = Body::from_desc(BodyDesc::default());
        let field = ForceField::Wind {
            direction: None,
            strength: 100.0,
        };
        apply_one(&mut body, &field, Vec2::zero());
        assert_eq!(body.acceleration, Vec2::zero());
    }

    #[test]
    fn attraction_with_no_point_is_skipped_entirely() {
        let mut body = Body::from_desc(BodyDesc::default());
        let field = ForceField::Attraction {
            point: None,
            strength: 100.0,
            falloff: Falloff::None,
        };
        apply_one(&mut body, &field, Vec2::zero());
        assert_eq!(body.acceleration, Vec2::zero());
    }

    #[test]
    fn implicit_drag_opposes_velocity() {
        let mut body = Body::from_desc(BodyDesc {
            velocity: Vec2::new(10.0, 0.0),
            ..Default::default()
        });
        apply_implicit_drag(&mut body);
        assert!(body.acceleration.x < 0.0);
    }

    #[test]
    fn world_gravity_applies_with_an_empty_registry() {
        let mut body = Body::from_desc(BodyDesc::default());
        apply_world_gravity(&mut body, Vec2::new(0.0, 980.0));
        assert_eq!(body.acceleration, Vec2::new(0.0, 980.0));
    }

    #[test]
    fn world_gravity_is_a_no_op_on_static_bodies() {
        let mut body = Body::from_desc(BodyDesc {
            is_static: true,
            ..Default::default()
        });
        apply_world_gravity(&mut body, Vec2::new(0.0, 980.0));
        assert_eq!(body.acceleration, Vec2::zero());
    }
}
