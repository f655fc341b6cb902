//! Per-shape-pair overlap tests.

use crate::body::{Body, Shape};
use crate::vector::{Vec2, EPSILON};

/// Tests two bodies for overlap. Returns `(normal, penetration)` with
/// `normal` pointing from `a` toward `b`. Any pair involving a polygon is
/// unsupported and always returns `None`.
pub fn test(a: &Body, b: &Body) -> Option<(Vec2, f64)> {
    match (&a.shape, &b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.position(), *ra, b.position(), *rb)
        }
        (Shape::Circle { radius }, Shape::Rect { width, height }) => {
            circle_rect(a.position(), *radius, b.position(), width / 2.0, height / 2.0)
                .map(|(normal, penetration)| (-normal, penetration))
        }
        (Shape::Rect { width, height }, Shape::Circle { radius }) => {
            circle_rect(b.position(), *radius, a.position(), width / 2.0, height / 2.0)
        }
        (Shape::Rect { width: wa, height: ha }, Shape::Rect { width: wb, height: hb }) => {
            rect_rect(a.position(), *wa, *ha, b.position(), *wb, *hb)
        }
        _ => None,
    }
}

fn circle_circle(pos_a: Vec2, radius_a: f64, pos_b: Vec2, radius_b: f64) -> Option<(Vec2, f64)> {
    let delta = pos_b - pos_a;
    let radius_sum = radius_a + radius_b;
    let dist_sq = delta.magnitude_squared();
    if dist_sq >= radius_sum * radius_sum {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist < EPSILON {
        Vec2::new(0.0, 1.0)
    } else {
        delta / dist
    };
    Some((normal, radius_sum - dist))
}

/// Tests a circle against an axis-aligned rectangle. Returns a normal
/// pointing from the rectangle's center outward, toward the circle.
fn circle_rect(
    circle_pos: Vec2,
    radius: f64,
    rect_pos: Vec2,
    half_width: f64,
    half_height: f64,
) -> Option<(Vec2, f64)> {
    let delta = circle_pos - rect_pos;
    let clamped = Vec2::new(
        delta.x.clamp(-half_width, half_width),
        delta.y.clamp(-half_height, half_height),
    );

    if (delta.x - clamped.x).abs() < EPSILON && (delta.y - clamped.y).abs() < EPSILON {
        // Circle center lies inside the rectangle: push out along whichever
        // axis has the smaller remaining overlap.
        let overlap_x = half_width - delta.x.abs();
        let overlap_y = half_height - delta.y.abs();
        return Some(if overlap_x < overlap_y {
            (Vec2::new(axis_sign(delta.x), 0.0), overlap_x + radius)
        } else {
            (Vec2::new(0.0, axis_sign(delta.y)), overlap_y + radius)
        });
    }

    let closest_to_center = delta - clamped;
    let dist_sq = closest_to_center.magnitude_squared();
    if dist_sq >= radius * radius {
        return None;
    }
    let dist = dist_sq.sqrt();
    Some((closest_to_center / dist, radius - dist))
}

fn rect_rect(
    pos_a: Vec2,
    width_a: f64,
    height_a: f64,
    pos_b: Vec2,
    width_b: f64,
    height_b: f64,
) -> Option<(Vec2, f64)> {
    let half_a = Vec2::new(width_a / 2.0, height_a / 2.0);
    let half_b = Vec2::new(width_b / 2.0, height_b / 2.0);
    let delta = pos_b - pos_a;

    let overlap_x = half_a.x + half_b.x - delta.x.abs();
    let overlap_y = half_a.y + half_b.y - delta.y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    Some(if overlap_x < overlap_y {
        (Vec2::new(axis_sign(delta.x), 0.0), overlap_x)
    } else {
        (Vec2::new(0.0, axis_sign(delta.y)), overlap_y)
    })
}

fn axis_sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}
