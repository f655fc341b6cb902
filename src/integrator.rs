//! Semi-implicit (symplectic) Euler integration.

use crate::body::Body;
use crate::vector::Vec2;

/// Advances `body` by `dt` using semi-implicit Euler: velocity is updated
/// from the accumulated acceleration first, then position is updated from
/// the *new* velocity. This is what gives the integrator its energy-stable
/// "symplectic" behavior compared to naive (explicit) Euler.
///
/// Does not check `isStatic`; callers are responsible for skipping static
/// bodies before calling this.
pub fn integrate(body: &mut Body, dt: f64) {
    body.previous_position = body.position;
    body.velocity += body.acceleration * dt;
    body.position += body.velocity * dt;
    body.acceleration = Vec2::zero();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDesc;

    #[test]
    fn velocity_updates_before_position() {
        let mut body = Body::from_desc(BodyDesc::default());
        body.acceleration = Vec2::new(0.0, 10.0);
        integrate(&mut body, 1.0);
        // semi-implicit: position uses the *post-update* velocity (10.0), not 0.0
        assert_eq!(body.velocity(), Vec2::new(0.0, 10.0));
        assert_eq!(body.position(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn acceleration_resets_each_step() {
        let mut body = Body::from_desc(BodyDesc::default());
        body.acceleration = Vec2::new(1.0, 1.0);
        integrate(&mut body, 0.5);
        assert_eq!(body.acceleration, Vec2::zero());
    }

    #[test]
    fn previous_position_tracks_pre_step_position() {
        let mut body = Body::from_desc(BodyDesc {
            position: Vec2::new(3.0, 4.0),
            velocity: Vec2::new(1.0, 0.0),
            ..Default::default()
        });
        integrate(&mut body, 1.0);
        assert_eq!(body.previous_position(), Vec2::new(3.0, 4.0));
    }
}
