use crate::error::{GeometryError, Result};

use super::{Point2, Vector2, TOLERANCE};

/// Rotates a vector 90° counter-clockwise: `(-v.y, v.x)`.
///
/// Used throughout the curve algebra to derive offset/normal directions.
#[must_use]
pub fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Rescales a vector to the given length.
///
/// # Errors
///
/// Returns an error if the vector is zero-length.
pub fn normalize_to(v: &Vector2, length: f64) -> Result<Vector2> {
    let magnitude = v.norm();
    if magnitude < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v * (length / magnitude))
}

/// Signed angle from `a` to `b` in radians: `atan2(a × b, a · b)`.
///
/// Positive for counter-clockwise rotation, in `(-π, π]`.
#[must_use]
pub fn signed_angle(a: &Vector2, b: &Vector2) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    cross.atan2(a.dot(b))
}

/// Rotates a point about a pivot by `theta` radians (counter-clockwise).
#[must_use]
pub fn rotate_point(p: &Point2, center: &Point2, theta: f64) -> Point2 {
    let s = theta.sin();
    let c = theta.cos();
    let d = p - center;
    Point2::new(
        center.x + d.x * c - d.y * s,
        center.y + d.x * s + d.y * c,
    )
}

/// Rotates a vector about the origin by `theta` radians (counter-clockwise).
#[must_use]
pub fn rotate_vector(v: &Vector2, theta: f64) -> Vector2 {
    let s = theta.sin();
    let c = theta.cos();
    Vector2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Returns `origin + normalize(direction) * distance`.
///
/// The direction is always normalized; passing a non-unit vector is fine.
///
/// # Errors
///
/// Returns an error if the direction is zero-length.
pub fn point_along(origin: &Point2, direction: &Vector2, distance: f64) -> Result<Point2> {
    let dir = normalize_to(direction, 1.0)?;
    Ok(origin + dir * distance)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn perp_is_ccw_quarter_turn() {
        let v = Vector2::new(1.0, 0.0);
        let p = perp(&v);
        assert_relative_eq!(p, Vector2::new(0.0, 1.0), epsilon = TOL);
        // Applying perp twice negates the vector.
        assert_relative_eq!(perp(&p), -v, epsilon = TOL);
    }

    #[test]
    fn normalize_to_scales_magnitude() {
        let v = Vector2::new(3.0, 4.0);
        let n = normalize_to(&v, 10.0).unwrap();
        assert_relative_eq!(n.norm(), 10.0, epsilon = TOL);
        assert_relative_eq!(n, Vector2::new(6.0, 8.0), epsilon = TOL);
    }

    #[test]
    fn normalize_to_zero_vector_fails() {
        assert!(normalize_to(&Vector2::new(0.0, 0.0), 5.0).is_err());
    }

    #[test]
    fn signed_angle_orientation() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 1.0);
        assert_relative_eq!(signed_angle(&x, &y), FRAC_PI_2, epsilon = TOL);
        assert_relative_eq!(signed_angle(&y, &x), -FRAC_PI_2, epsilon = TOL);
        assert_relative_eq!(signed_angle(&x, &-x).abs(), PI, epsilon = TOL);
    }

    #[test]
    fn rotate_point_about_pivot() {
        let p = Point2::new(2.0, 1.0);
        let center = Point2::new(1.0, 1.0);
        let r = rotate_point(&p, &center, FRAC_PI_2);
        assert_relative_eq!(r, Point2::new(1.0, 2.0), epsilon = TOL);
    }

    #[test]
    fn point_along_normalizes_direction() {
        let origin = Point2::new(1.0, 1.0);
        let p = point_along(&origin, &Vector2::new(0.0, 25.0), 3.0).unwrap();
        assert_relative_eq!(p, Point2::new(1.0, 4.0), epsilon = TOL);
    }
}
