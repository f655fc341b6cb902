//! Velocity-threshold sleep classification.

use crate::body::Body;
use crate::vector::Vec2;

/// Speed below which a body is considered "at rest" for sleep purposes.
pub const SLEEP_VELOCITY_THRESHOLD: f64 = 0.5;

/// Consecutive substeps a body must stay below the threshold before sleeping.
pub const SLEEP_FRAME_THRESHOLD: u32 = 30;

/// Re-evaluates a body's sleep timer and flag from its current velocity.
/// Call once per substep, after collisions and constraints have had a
/// chance to change the velocity.
pub fn update_sleep_state(body: &mut Body) {
    if body.velocity.magnitude_squared() < SLEEP_VELOCITY_THRESHOLD * SLEEP_VELOCITY_THRESHOLD {
        body.sleep_timer += 1;
        if body.sleep_timer >= SLEEP_FRAME_THRESHOLD {
            body.is_sleeping = true;
            body.velocity = Vec2::zero();
        }
    } else {
        body.sleep_timer = 0;
        body.is_sleeping = false;
    }
}

/// Immediately clears a body's sleep state, resetting its timer.
pub fn wake(body: &mut Body) {
    body.is_sleeping = false;
    body.sleep_timer = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDesc;

    fn at_rest_body() -> Body {
        Body::from_desc(BodyDesc {
            velocity: Vec2::zero(),
            ..Default::default()
        })
    }

    #[test]
    fn stays_awake_one_substep_before_threshold() {
        let mut body = at_rest_body();
        for _ in 0..(SLEEP_FRAME_THRESHOLD - 1) {
            update_sleep_state(&mut body);
        }
        assert!(!body.is_sleeping());
    }

    #[test]
    fn sleeps_once_threshold_reached() {
        let mut body = at_rest_body();
        for _ in 0..SLEEP_FRAME_THRESHOLD {
            update_sleep_state(&mut body);
        }
        assert!(body.is_sleeping());
        assert_eq!(body.velocity(), Vec2::zero());
    }

    #[test]
    fn motion_resets_timer() {
        let mut body = at_rest_body();
        for _ in 0..(SLEEP_FRAME_THRESHOLD - 1) {
            update_sleep_state(&mut body);
        }
        body.velocity = Vec2::new(100.0, 0.0);
        update_sleep_state(&mut body);
        assert_eq!(body.sleep_timer(), 0);
        assert!(!body.is_sleeping());
    }

    #[test]
    fn wake_clears_sleep_and_timer() {
        let mut body = at_rest_body();
        for _ in 0..SLEEP_FRAME_THRESHOLD {
            update_sleep_state(&mut body);
        }
        wake(&mut body);
        assert!(!body.is_sleeping());
        assert_eq!(body.sleep_timer(), 0);
    }
}
