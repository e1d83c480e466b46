use crate::error::{GeometryError, Result};
use crate::math::vector_2d::{normalize_to, perp};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::quadratic::QuadraticBezier;
use crate::math::intersect_2d::line_line_intersect;

/// A cubic Bezier curve: `p0` start, `p1`/`p2` controls, `p3` end.
///
/// Used only as a rendering/offset intermediate; bend curves stay
/// quadratic in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezier {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

impl CubicBezier {
    /// Creates a curve from its four control points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Promotes a quadratic curve to an equivalent cubic by degree
    /// elevation: `cp = end + 2/3 * (mid − end)` from each side.
    #[must_use]
    pub fn from_quadratic(curve: &QuadraticBezier) -> Self {
        let cp1 = curve.p0 + (curve.p1 - curve.p0) * (2.0 / 3.0);
        let cp2 = curve.p2 + (curve.p1 - curve.p2) * (2.0 / 3.0);
        Self::new(curve.p0, cp1, cp2, curve.p2)
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let u = 1.0 - t;
        Point2::from(
            self.p0.coords * (u * u * u)
                + self.p1.coords * (3.0 * u * u * t)
                + self.p2.coords * (3.0 * u * t * t)
                + self.p3.coords * (t * t * t),
        )
    }

    /// Clamped Hermite endpoint tangents: `t0 = 3(P1−P0)`, `t1 = 3(P3−P2)`.
    ///
    /// This is the exact relation between Bezier control points and the
    /// spline tangents the rendering layer binds to.
    #[must_use]
    pub fn hermite_tangents(&self) -> (Vector2, Vector2) {
        ((self.p1 - self.p0) * 3.0, (self.p3 - self.p2) * 3.0)
    }

    /// Translates all control points by `offset`.
    #[must_use]
    pub fn translate(&self, offset: &Vector2) -> Self {
        Self::new(
            self.p0 + offset,
            self.p1 + offset,
            self.p2 + offset,
            self.p3 + offset,
        )
    }

    /// Constant-width approximate offset (Tiller–Hanson): each control
    /// polygon edge is displaced along its perpendicular by `offset`, and
    /// consecutive displaced edges are re-intersected for the interior
    /// control points. Exact only for low-curvature curves; corridor
    /// curvature is bounded by design.
    ///
    /// Positive offsets displace to the right of the traversal direction.
    ///
    /// # Errors
    ///
    /// Returns an error if any control polygon edge is zero-length.
    pub fn tiller_hanson(&self, offset: f64) -> Result<Self> {
        let v01 = self.p1 - self.p0;
        let v12 = self.p2 - self.p1;
        let v23 = self.p3 - self.p2;

        let n0 = normalize_to(&-perp(&v01), offset)?;
        let n1 = normalize_to(&-perp(&v12), offset)?;
        let n2 = normalize_to(&-perp(&v23), offset)?;

        let q0 = self.p0 + n0;
        let q1 = self.p1 + n1;
        let q2 = self.p2 + n1;
        let q3 = self.p3 + n2;

        // Collinear adjacent edges share their offset line; keep the
        // displaced point in that case.
        let p1 = line_line_intersect(&q0, &(q0 + v01), &q1, &(q1 + v12)).unwrap_or(q1);
        let p2 = line_line_intersect(&q1, &(q1 + v12), &q3, &(q3 - v23)).unwrap_or(q2);

        Ok(Self::new(q0, p1, p2, q3))
    }

    /// Cubic approximation of a circular arc from `p0` to `p3` about
    /// `center`, matching curvature at both endpoints via the closed-form
    /// `k2` factor derived from the radius-vector dot products.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints are collinear with the center
    /// (zero sweep or a half-turn, where the factor is undefined).
    pub fn arc_path(p0: &Point2, p3: &Point2, center: &Point2) -> Result<Self> {
        let a = p0 - center;
        let b = p3 - center;

        let q1 = a.dot(&a);
        let q2 = q1 + a.dot(&b);
        let denom = a.x * b.y - a.y * b.x;
        if denom.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "arc endpoints are collinear with the center".into(),
            )
            .into());
        }
        let k2 = 4.0 / 3.0 * ((2.0 * q1 * q2).sqrt() - q2) / denom;

        let p1 = Point2::new(center.x + a.x - k2 * a.y, center.y + a.y + k2 * a.x);
        let p2 = Point2::new(center.x + b.x + k2 * b.y, center.y + b.y - k2 * b.x);

        Ok(Self::new(*p0, p1, p2, *p3))
    }
}
