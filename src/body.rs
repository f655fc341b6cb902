//! Rigid body storage and the shape tag used for narrow-phase dispatch.

use slotmap::new_key_type;

use crate::vector::Vec2;

new_key_type! {
    /// Stable handle into a [`crate::world::World`]'s body storage.
    pub struct BodyHandle;
}

/// Axis-aligned bounding box, used by the renderer for culling and by
/// [`crate::bounds::reflect`] for the optional world-bounds wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

/// The collision geometry attached to a body.
///
/// Polygons carry their vertices for the caller's own rendering/bookkeeping
/// purposes, but do not participate in narrow-phase detection: only
/// circle-circle, circle-rect and rect-rect pairs are tested.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    Rect { width: f64, height: f64 },
    Polygon { vertices: Vec<Vec2> },
}

impl Shape {
    pub fn circle(radius: f64) -> Self {
        Shape::Circle { radius }
    }

    pub fn rect(width: f64, height: f64) -> Self {
        Shape::Rect { width, height }
    }

    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        Shape::Polygon { vertices }
    }

    /// Half-extent of the shape along each axis, used for bounds reflection.
    /// Polygons have no collision support in this core and report zero extent.
    pub fn half_extents(&self) -> Vec2 {
        match self {
            Shape::Circle { radius } => Vec2::new(*radius, *radius),
            Shape::Rect { width, height } => Vec2::new(width / 2.0, height / 2.0),
            Shape::Polygon { .. } => Vec2::zero(),
        }
    }
}

/// A partial body description consumed by [`Body::from_desc`].
///
/// Fields are public so callers can use struct-update syntax against
/// [`Default::default`] to only override what they need.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    pub restitution: f64,
    pub friction: f64,
    pub is_static: bool,
    pub shape: Shape,
    /// Opaque payload for the embedder to correlate a body with its own
    /// entity id. The core never interprets this value.
    pub user_data: u128,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            mass: 1.0,
            restitution: 0.5,
            friction: 0.3,
            is_static: false,
            shape: Shape::circle(10.0),
            user_data: 0,
        }
    }
}

/// A simulated rigid body: a point mass plus a shape tag for collision.
///
/// `vek::Vec2` is `Copy`, so the positions stored here are independent
/// values the moment they are written; there is no aliasing between a
/// caller's vector and the one held by the body.
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) position: Vec2,
    pub(crate) previous_position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) acceleration: Vec2,
    pub(crate) mass: f64,
    pub(crate) inv_mass: f64,
    pub restitution: f64,
    pub friction: f64,
    pub(crate) is_static: bool,
    pub(crate) is_sleeping: bool,
    pub(crate) sleep_timer: u32,
    pub shape: Shape,
    pub user_data: u128,
}

impl Body {
    /// Builds a body from a description, deriving `mass`/`invMass` per the
    /// static/dynamic invariant: static bodies always carry `invMass == 0`,
    /// and a non-positive mass on a dynamic body also collapses to `invMass
    /// == 0` (effectively immovable) rather than dividing by zero or a
    /// negative number downstream.
    pub(crate) fn from_desc(desc: BodyDesc) -> Self {
        let is_static = desc.is_static;
        let (mass, inv_mass) = if is_static {
            (0.0, 0.0)
        } else if desc.mass > 0.0 {
            (desc.mass, 1.0 / desc.mass)
        } else {
            (desc.mass.max(0.0), 0.0)
        };
        let position = desc.position;
        Self {
            position,
            previous_position: position,
            velocity: if is_static { Vec2::zero() } else { desc.velocity },
            acceleration: Vec2::zero(),
            mass,
            inv_mass,
            restitution: desc.restitution.clamp(0.0, 1.0),
            friction: desc.friction.max(0.0),
            is_static,
            is_sleeping: false,
            sleep_timer: 0,
            shape: desc.shape,
            user_data: desc.user_data,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn previous_position(&self) -> Vec2 {
        self.previous_position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_sleeping(&self) -> bool {
        self.is_sleeping
    }

    pub fn sleep_timer(&self) -> u32 {
        self.sleep_timer
    }

    pub fn aabb(&self) -> Aabb {
        let half = self.shape.half_extents();
        Aabb {
            min: self.position - half,
            max: self.position + half,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_body_has_zero_inverse_mass_regardless_of_mass_field() {
        let body = Body::from_desc(BodyDesc {
            is_static: true,
            mass: 50.0,
            ..Default::default()
        });
        assert_eq!(body.mass(), 0.0);
        assert_eq!(body.inv_mass(), 0.0);
    }

    #[test]
    fn static_body_ignores_initial_velocity() {
        let body = Body::from_desc(BodyDesc {
            is_static: true,
            velocity: Vec2::new(5.0, 5.0),
            ..Default::default()
        });
        assert_eq!(body.velocity(), Vec2::zero());
    }

    #[test]
    fn dynamic_body_derives_inverse_mass() {
        let body = Body::from_desc(BodyDesc {
            mass: 4.0,
            ..Default::default()
        });
        assert_eq!(body.inv_mass(), 0.25);
    }

    #[test]
    fn non_positive_mass_collapses_to_immovable() {
        let body = Body::from_desc(BodyDesc {
            mass: 0.0,
            ..Default::default()
        });
        assert_eq!(body.inv_mass(), 0.0);
    }

    #[test]
    fn restitution_and_friction_are_clamped() {
        let body = Body::from_desc(BodyDesc {
            restitution: 3.0,
            friction: -1.0,
            ..Default::default()
        });
        assert_eq!(body.restitution, 1.0);
        assert_eq!(body.friction, 0.0);
    }
}
