//! Guarded 2-vector math on top of [`vek::Vec2<f64>`].
//!
//! Every operation here that would otherwise divide by a length follows the
//! engine-wide NaN contract: magnitudes below [`EPSILON`] are treated as zero
//! and a guarded fallback is returned instead of propagating NaN or infinity.

/// A 2D vector in world or local space.
pub type Vec2 = vek::Vec2<f64>;

/// Below this magnitude a vector is treated as zero for normalization and division.
pub const EPSILON: f64 = 1e-10;

/// Normalize `v`, returning the zero vector if `v` is shorter than [`EPSILON`].
pub fn normalize(v: Vec2) -> Vec2 {
    let len_sq = v.magnitude_squared();
    if len_sq < EPSILON * EPSILON {
        return Vec2::zero();
    }
    v / len_sq.sqrt()
}

/// Counter-clockwise perpendicular (rotate +90 degrees).
pub fn perp_left(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Clockwise perpendicular (rotate -90 degrees).
pub fn perp_right(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// 2D cross product of two vectors: the z component of the equivalent 3D cross product.
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Cross product of a scalar and a vector, producing a perpendicular vector.
pub fn cross_scalar_vec(s: f64, v: Vec2) -> Vec2 {
    Vec2::new(-s * v.y, s * v.x)
}

/// Cross product of a vector and a scalar, producing a perpendicular vector.
pub fn cross_vec_scalar(v: Vec2, s: f64) -> Vec2 {
    Vec2::new(s * v.y, -s * v.x)
}

/// Linear interpolation between `a` and `b` by `t`.
pub fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a + (b - a) * t
}

/// Clamp the magnitude of `v` to `max_len`; vectors already shorter are untouched.
pub fn clamp_length(v: Vec2, max_len: f64) -> Vec2 {
    let len_sq = v.magnitude_squared();
    if len_sq < EPSILON * EPSILON || len_sq <= max_len * max_len {
        return v;
    }
    v * (max_len / len_sq.sqrt())
}

/// Orthogonal projection of `v` onto `onto`. Returns zero if `onto` is degenerate.
pub fn project(v: Vec2, onto: Vec2) -> Vec2 {
    let denom = onto.magnitude_squared();
    if denom < EPSILON * EPSILON {
        return Vec2::zero();
    }
    onto * (v.dot(onto) / denom)
}

/// Reflect `v` across the plane with unit normal `n`: `v - 2(v . n)n`.
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - n * (2.0 * v.dot(n))
}

/// Rotate `v` by `radians` counter-clockwise around the origin.
pub fn rotate(v: Vec2, radians: f64) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Approximate equality with a caller-supplied epsilon, compared component-wise.
pub fn approx_eq(a: Vec2, b: Vec2, epsilon: f64) -> bool {
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon
}
