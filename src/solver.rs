//! Gauss-Seidel constraint solver: one sequential pass over every
//! constraint, dispatched by kind. Constraints referencing a removed body
//! are silently skipped for that pass.

use slotmap::SlotMap;

use crate::body::{Body, BodyHandle};
use crate::constraint::{Constraint, ConstraintHandle, ConstraintKind};
use crate::vector::EPSILON;

/// Runs one solver pass over every constraint, in insertion order.
pub fn solve_pass(bodies: &mut SlotMap<BodyHandle, Body>, constraints: &mut SlotMap<ConstraintHandle, Constraint>) {
    for constraint in constraints.values_mut() {
        match constraint.kind {
            ConstraintKind::Spring => solve_spring(bodies, constraint),
            ConstraintKind::Distance => solve_distance(bodies, constraint),
            ConstraintKind::Pin => solve_pin(bodies, constraint),
            ConstraintKind::Hinge => {}
        }
    }
}

fn solve_spring(bodies: &mut SlotMap<BodyHandle, Body>, constraint: &mut Constraint) {
    let (a_pos, a_vel, a_inv_mass) = match bodies.get(constraint.body_a) {
        Some(body) => (body.position(), body.velocity(), body.inv_mass()),
        None => return,
    };
    let (b_pos, b_vel, b_inv_mass) = match bodies.get(constraint.body_b) {
        Some(body) => (body.position(), body.velocity(), body.inv_mass()),
        None => return,
    };

    let anchor_a = a_pos + constraint.anchor_a;
    let anchor_b = b_pos + constraint.anchor_b;
    let delta = anchor_b - anchor_a;
    let length = delta.magnitude();
    if length < EPSILON {
        return;
    }
    let direction = delta / length;
    let rest_length = constraint.effective_rest_length(length);
    let stretch = length - rest_length;
    let closing_speed = (b_vel - a_vel).dot(direction);
    let force = constraint.stiffness * stretch + constraint.damping * closing_speed;

    if let Some(body) = bodies.get_mut(constraint.body_a) {
        body.acceleration += direction * (force * a_inv_mass);
    }
    if let Some(body) = bodies.get_mut(constraint.body_b) {
        body.acceleration -= direction * (force * b_inv_mass);
    }
}

fn solve_distance(bodies: &mut SlotMap<BodyHandle, Body>, constraint: &mut Constraint) {
    let (a_pos, a_inv_mass, a_static) = match bodies.get(constraint.body_a) {
        Some(body) => (body.position(), body.inv_mass(), body.is_static()),
        None => return,
    };
    let (b_pos, b_inv_mass, b_static) = match bodies.get(constraint.body_b) {
        Some(body) => (body.position(), body.inv_mass(), body.is_static()),
        None => return,
    };

    let total_inv_mass = a_inv_mass + b_inv_mass;
    if total_inv_mass < EPSILON {
        return;
    }

    let anchor_a = a_pos + constraint.anchor_a;
    let anchor_b = b_pos + constraint.anchor_b;
    let delta = anchor_b - anchor_a;
    let length = delta.magnitude();
    if length < EPSILON {
        // Coincident anchors: direction is undefined, so leave positions
        // untouched rather than divide by zero.
        return;
    }
    let direction = delta / length;
    let target = constraint.effective_rest_length(length);
    let error = length - target;
    let correction = direction * (error * constraint.stiffness);

    if !a_static {
        if let Some(body) = bodies.get_mut(constraint.body_a) {
            body.position += correction * (a_inv_mass / total_inv_mass);
        }
    }
    if !b_static {
        if let Some(body) = bodies.get_mut(constraint.body_b) {
            body.position -= correction * (b_inv_mass / total_inv_mass);
        }
    }
}

fn solve_pin(bodies: &mut SlotMap<BodyHandle, Body>, constraint: &Constraint) {
    let a_static = match bodies.get(constraint.body_a) {
        Some(body) => body.is_static(),
        None => return,
    };
    if a_static {
        return;
    }
    let a_pos = bodies[constraint.body_a].position();
    let b_pos = match bodies.get(constraint.body_b) {
        Some(body) => body.position(),
        None => return,
    };

    let anchor = a_pos + constraint.anchor_a;
    let target = b_pos + constraint.anchor_b;
    let correction = (target - anchor) * constraint.stiffness;

    if let Some(body) = bodies.get_mut(constraint.body_a) {
        body.position += correction;
        body.velocity += correction * constraint.damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDesc;
    use crate::constraint::ConstraintDesc;
    use crate::vector::Vec2;

    #[test]
    fn coincident_distance_constraint_never_moves_or_produces_nan() {
        let mut bodies = SlotMap::with_key();
        let a = bodies.insert(Body::from_desc(BodyDesc::default()));
        let b = bodies.insert(Body::from_desc(BodyDesc::default()));
        let mut constraints = SlotMap::with_key();
        let mut desc = ConstraintDesc::new(ConstraintKind::Distance, a, b);
        desc.length = Some(0.0);
        constraints.insert(Constraint::from_desc(desc));

        for _ in 0..4 {
            solve_pass(&mut bodies, &mut constraints);
        }

        assert_eq!(bodies[a].position(), Vec2::zero());
        assert_eq!(bodies[b].position(), Vec2::zero());
        assert!(!bodies[a].velocity().x.is_nan());
    }

    #[test]
    fn distance_constraint_pulls_bodies_toward_rest_length() {
        let mut bodies = SlotMap::with_key();
        let a = bodies.insert(Body::from_desc(BodyDesc {
            position: Vec2::new(-10.0, 0.0),
            ..Default::default()
        }));
        let b = bodies.insert(Body::from_desc(BodyDesc {
            position: Vec2::new(10.0, 0.0),
            ..Default::default()
        }));
        let mut constraints = SlotMap::with_key();
        let mut desc = ConstraintDesc::new(ConstraintKind::Distance, a, b);
        desc.length = Some(10.0);
        desc.stiffness = 1.0;
        constraints.insert(Constraint::from_desc(desc));

        solve_pass(&mut bodies, &mut constraints);

        let separation = (bodies[b].position() - bodies[a].position()).magnitude();
        assert!(separation < 20.0);
    }

    #[test]
    fn pin_constraint_ignores_static_body_a() {
        let mut bodies = SlotMap::with_key();
        let a = bodies.insert(Body::from_desc(BodyDesc {
            is_static: true,
            position: Vec2::zero(),
            ..Default::default()
        }));
        let b = bodies.insert(Body::from_desc(BodyDesc {
            position: Vec2::new(5.0, 0.0),
            ..Default::default()
        }));
        let mut constraints = SlotMap::with_key();
        constraints.insert(Constraint::from_desc(ConstraintDesc::new(ConstraintKind::Pin, a, b)));

        solve_pass(&mut bodies, &mut constraints);

        assert_eq!(bodies[a].position(), Vec2::zero());
    }

    #[test]
    fn hinge_constraint_is_a_no_op() {
        let mut bodies = SlotMap::with_key();
        let a = bodies.insert(Body::from_desc(BodyDesc::default()));
        let b = bodies.insert(Body::from_desc(BodyDesc {
            position: Vec2::new(3.0, 0.0),
            ..Default::default()
        }));
        let mut constraints = SlotMap::with_key();
        constraints.insert(Constraint::from_desc(ConstraintDesc::new(ConstraintKind::Hinge, a, b)));

        solve_pass(&mut bodies, &mut constraints);

        assert_eq!(bodies[a].position(), Vec2::zero());
        assert_eq!(bodies[b].position(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn missing_body_is_skipped_without_panicking() {
        let mut bodies = SlotMap::with_key();
        let a = bodies.insert(Body::from_desc(BodyDesc::default()));
        let b = bodies.insert(Body::from_desc(BodyDesc::default()));
        bodies.remove(b);
        let mut constraints = SlotMap::with_key();
        constraints.insert(Constraint::from_desc(ConstraintDesc::new(ConstraintKind::Spring, a, b)));

        solve_pass(&mut bodies, &mut constraints);
    }
}
