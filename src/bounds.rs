//! Optional world-bounds wall: clamps position and reflects velocity on exit.

use crate::body::Body;
use crate::sleep;
use crate::vector::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

/// Clamps `body` back inside `bounds` on any axis it has crossed, and
/// reflects that axis' velocity scaled by the body's own restitution.
/// Crossing a bound counts as an impact and wakes the body.
pub fn reflect(body: &mut Body, bounds: &Bounds) {
    let extent = body.shape.half_extents();
    let mut crossed = false;

    let min_x = bounds.min.x + extent.x;
    let max_x = bounds.max.x - extent.x;
    if body.position.x < min_x {
        body.position.x = min_x;
        body.velocity.x = -body.velocity.x * body.restitution;
        crossed = true;
    } else if body.position.x > max_x {
        body.position.x = max_x;
        body.velocity.x = -body.velocity.x * body.restitution;
        crossed = true;
    }

    let min_y = bounds.min.y + extent.y;
    let max_y = bounds.max.y - extent.y;
    if body.position.y < min_y {
        body.position.y = min_y;
        body.velocity.y = -body.velocity.y * body.restitution;
        crossed = true;
    } else if body.position.y > max_y {
        body.position.y = max_y;
        body.velocity.y = -body.velocity.y * body.restitution;
        crossed = true;
    }

    if crossed {
        sleep::wake(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDesc;

    #[test]
    fn clamps_position_and_reflects_velocity() {
        let mut body = Body::from_desc(BodyDesc {
            position: Vec2::new(-5.0, 0.0),
            velocity: Vec2::new(-10.0, 0.0),
            restitution: 0.5,
            shape: crate::body::Shape::circle(1.0),
            ..Default::default()
        });
        let bounds = Bounds {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(100.0, 100.0),
        };
        reflect(&mut body, &bounds);
        assert_eq!(body.position().x, 1.0);
        assert_eq!(body.velocity().x, 5.0);
    }

    #[test]
    fn within_bounds_is_untouched() {
        let mut body = Body::from_desc(BodyDesc {
            position: Vec2::new(50.0, 50.0),
            velocity: Vec2::new(1.0, 1.0),
            ..Default::default()
        });
        let bounds = Bounds {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(100.0, 100.0),
        };
        reflect(&mut body, &bounds);
        assert_eq!(body.position(), Vec2::new(50.0, 50.0));
        assert_eq!(body.velocity(), Vec2::new(1.0, 1.0));
    }
}
