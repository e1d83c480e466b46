use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{line_line_intersect, nearest_point_parameter};
use crate::math::vector_2d::{normalize_to, perp, point_along};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::cubic::CubicBezier;

/// Strategy for constructing parallel offset curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetStrategy {
    /// Displaces the control polygon along the per-edge normals and
    /// re-intersects the tangent lines. One curve per side.
    #[default]
    Intersect,

    /// Splits the curve at its nearest point to the control vertex and
    /// offsets both halves, two curves per side. Intended for turns
    /// sharper than 90°, where the single intersection drifts far from
    /// the true offset; not selected automatically.
    SplitAtApex,
}

/// A quadratic Bezier curve: start `p0`, control `p1`, end `p2`.
///
/// The canonical in-memory representation of a corridor centerline.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticBezier {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
}

fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::from((a.coords + b.coords) * 0.5)
}

fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

impl QuadraticBezier {
    /// Creates a curve from its three control points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let u = 1.0 - t;
        Point2::from(
            self.p0.coords * (u * u) + self.p1.coords * (2.0 * u * t) + self.p2.coords * (t * t),
        )
    }

    /// First derivative at parameter `t`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector2 {
        (self.p1 - self.p0) * (2.0 * (1.0 - t)) + (self.p2 - self.p1) * (2.0 * t)
    }

    /// Returns the curve traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1, self.p0)
    }

    /// Translates all control points by `offset`.
    #[must_use]
    pub fn translate(&self, offset: &Vector2) -> Self {
        Self::new(self.p0 + offset, self.p1 + offset, self.p2 + offset)
    }

    /// Builds a quadratic approximation of a circular arc.
    ///
    /// The arc starts at `start` (assumed on the circle at angle 0),
    /// sweeps `angle_degrees` about `center`, and uses the tangent-length
    /// formula `b = (cos θ − 1)/sin θ` for the control point.
    ///
    /// # Errors
    ///
    /// Returns an error near the `sin θ = 0` singularity (sweeps close to
    /// 0° or 180°), where the tangent intersection is undefined.
    pub fn arc(start: Point2, center: &Point2, angle_degrees: f64, radius: f64) -> Result<Self> {
        let angle = angle_degrees.to_radians();
        let s = angle.sin();
        let c = angle.cos();
        if s.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "arc construction is singular when sin(angle) = 0".into(),
            )
            .into());
        }
        let b = (c - 1.0) / s;

        let control = Point2::new(
            center.x + radius * (c - b * s),
            center.y + radius * (s + b * c),
        );
        let end = Point2::new(center.x + radius * c, center.y + radius * s);

        Ok(Self::new(start, control, end))
    }

    /// Builds the bend curve for a reshaped corridor section.
    ///
    /// Given the original chord `start → end` and a target endpoint
    /// `new_end` with desired exit tangent `exit_dir`, places the control
    /// point at the intersection of the entry tangent ray (through the
    /// original chord) and the exit ray (through `new_end` along
    /// `exit_dir`).
    ///
    /// When the exit ray is parallel to the chord *and* `new_end` lies on
    /// the chord line (a zero-angle bend), the result degenerates to a
    /// straight curve with the control point at the chord midpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParallelLines`] when the rays are parallel
    /// but `new_end` is off the chord line (no finite control point), and
    /// [`GeometryError::ZeroVector`] for degenerate input directions.
    pub fn bend(start: &Point2, end: &Point2, new_end: &Point2, exit_dir: &Vector2) -> Result<Self> {
        let in_dir = normalize_to(&(end - start), 1.0)?;
        let exit = normalize_to(exit_dir, 1.0)?;

        let cross = in_dir.x * exit.y - in_dir.y * exit.x;
        if cross.abs() < TOLERANCE {
            let offset = new_end - start;
            let deviation = in_dir.x * offset.y - in_dir.y * offset.x;
            if deviation.abs() < TOLERANCE * offset.norm().max(1.0) {
                return Ok(Self::new(*start, midpoint(start, new_end), *new_end));
            }
            return Err(GeometryError::ParallelLines.into());
        }

        let exit_far = point_along(new_end, &exit, 1000.0)?;
        let cp = line_line_intersect(start, end, new_end, &exit_far)
            .ok_or(GeometryError::ParallelLines)?;

        Ok(Self::new(*start, cp, *new_end))
    }

    /// Builds a degenerate straight "curve" of the given length from
    /// `start` along `direction`, displaced laterally by `lateral_offset`
    /// along the direction's perpendicular. The control point is the
    /// segment midpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is zero-length.
    pub fn straight(
        start: &Point2,
        direction: &Vector2,
        length: f64,
        lateral_offset: f64,
    ) -> Result<Self> {
        let dir = normalize_to(direction, 1.0)?;
        let p0 = start + perp(&dir) * lateral_offset;
        let p2 = p0 + dir * length;
        Ok(Self::new(p0, midpoint(&p0, &p2), p2))
    }

    /// Arc length via the closed-form antiderivative of `|B'(t)|`.
    ///
    /// A control point at the chord midpoint makes the curve an exact
    /// straight segment; that degenerate case short-circuits to the chord
    /// length (the closed form divides by zero there). Any other
    /// non-finite evaluation falls back to Simpson integration.
    #[must_use]
    pub fn length(&self) -> f64 {
        let ax = self.p0.x - 2.0 * self.p1.x + self.p2.x;
        let ay = self.p0.y - 2.0 * self.p1.y + self.p2.y;
        let bx = 2.0 * self.p1.x - 2.0 * self.p0.x;
        let by = 2.0 * self.p1.y - 2.0 * self.p0.y;

        let big_a = 4.0 * (ax * ax + ay * ay);
        let big_b = 4.0 * (ax * bx + ay * by);
        let big_c = bx * bx + by * by;

        if big_a < TOLERANCE {
            return (self.p2 - self.p0).norm();
        }

        let sabc = 2.0 * (big_a + big_b + big_c).sqrt();
        let a2 = big_a.sqrt();
        let a32 = 2.0 * big_a * a2;
        let c2 = 2.0 * big_c.sqrt();
        let ba = big_b / a2;

        let closed = (a32 * sabc
            + a2 * big_b * (sabc - c2)
            + (4.0 * big_c * big_a - big_b * big_b)
                * ((2.0 * a2 + ba + sabc) / (ba + c2)).ln())
            / (4.0 * a32);

        if closed.is_finite() {
            closed
        } else {
            self.length_numeric(64)
        }
    }

    /// Simpson integration of `|B'(t)|` over `[0, 1]` with `2 * steps`
    /// intervals.
    fn length_numeric(&self, steps: usize) -> f64 {
        let n = steps * 2;
        #[allow(clippy::cast_precision_loss)]
        let h = 1.0 / n as f64;
        let mut sum = self.derivative_at(0.0).norm() + self.derivative_at(1.0).norm();
        for i in 1..n {
            let w = if i % 2 == 0 { 2.0 } else { 4.0 };
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 * h;
            sum += w * self.derivative_at(t).norm();
        }
        sum * h / 3.0
    }

    /// De Casteljau subdivision at parameter `t`, returning the two
    /// sub-curves covering `[0, t]` and `[t, 1]`.
    #[must_use]
    pub fn split_at(&self, t: f64) -> (Self, Self) {
        let q01 = lerp(&self.p0, &self.p1, t);
        let q12 = lerp(&self.p1, &self.p2, t);
        let q = lerp(&q01, &q12, t);
        (
            Self::new(self.p0, q01, q),
            Self::new(q, q12, self.p2),
        )
    }

    /// Inverts arc length by bisection: the parameter `t` at which the
    /// curve has covered `distance` of its length. Clamps to `[0, 1]`.
    #[must_use]
    pub fn parameter_at_distance(&self, distance: f64) -> f64 {
        let total = self.length();
        if distance <= 0.0 {
            return 0.0;
        }
        if distance >= total {
            return 1.0;
        }
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..48 {
            let mid = 0.5 * (lo + hi);
            if self.split_at(mid).0.length() < distance {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }

    /// Derives the two parallel wall curves at `±distance`.
    ///
    /// Quadratic adaptation of the Tiller–Hanson technique: the control
    /// points are displaced along the unit normals of the two tangent
    /// segments (scaled to `distance`) and the displaced tangent lines are
    /// re-intersected for the new control point. The first curve is the
    /// `+normal` side, the second the `−normal` side.
    ///
    /// Collinear control polygons (straight sections) have parallel
    /// displaced tangents; their offset sides are straight, with the
    /// control point at the displaced chord midpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if either tangent segment is zero-length.
    pub fn offset(&self, distance: f64) -> Result<(CubicBezier, CubicBezier)> {
        let v1 = self.p1 - self.p0;
        let v2 = self.p2 - self.p1;

        let n1 = perp(&normalize_to(&v1, distance)?);
        let n2 = perp(&normalize_to(&v2, distance)?);

        let p0a = self.p0 + n1;
        let p0b = self.p0 - n1;
        let p2a = self.p2 + n2;
        let p2b = self.p2 - n2;

        let c1a = self.p1 + n1;
        let c1b = self.p1 - n1;
        let c2a = self.p1 + n2;
        let c2b = self.p1 - n2;

        let ca = line_line_intersect(&p0a, &c1a, &p2a, &c2a).unwrap_or_else(|| midpoint(&p0a, &p2a));
        let cb = line_line_intersect(&p0b, &c1b, &p2b, &c2b).unwrap_or_else(|| midpoint(&p0b, &p2b));

        Ok((
            CubicBezier::from_quadratic(&Self::new(p0a, ca, p2a)),
            CubicBezier::from_quadratic(&Self::new(p0b, cb, p2b)),
        ))
    }

    /// Offsets with an explicit [`OffsetStrategy`].
    ///
    /// [`OffsetStrategy::Intersect`] yields two curves (`+`/`−` side);
    /// [`OffsetStrategy::SplitAtApex`] yields four (two per side, split at
    /// the curve's nearest point to the control vertex).
    ///
    /// # Errors
    ///
    /// Returns an error on degenerate control polygons, or when the split
    /// construction fails to intersect the displaced tangent lines.
    pub fn offset_with(&self, distance: f64, strategy: OffsetStrategy) -> Result<Vec<CubicBezier>> {
        match strategy {
            OffsetStrategy::Intersect => {
                let (a, b) = self.offset(distance)?;
                Ok(vec![a, b])
            }
            OffsetStrategy::SplitAtApex => self.offset_split(distance),
        }
    }

    fn offset_split(&self, distance: f64) -> Result<Vec<CubicBezier>> {
        let v1 = self.p1 - self.p0;
        let v2 = self.p2 - self.p1;

        let n1 = perp(&normalize_to(&v1, distance)?);
        let n2 = perp(&normalize_to(&v2, distance)?);

        let p0a = self.p0 + n1;
        let p0b = self.p0 - n1;
        let p2a = self.p2 + n2;
        let p2b = self.p2 - n2;

        let c1a = self.p1 + n1;
        let c1b = self.p1 - n1;
        let c2a = self.p1 + n2;
        let c2b = self.p1 - n2;

        // Split at the curve's nearest point to the control vertex; the
        // tangent there runs along the chord between the split legs.
        let t = nearest_point_parameter(&self.p0, &self.p1, &self.p2);
        let apex = self.point_at(t);
        let leg1 = lerp(&self.p0, &self.p1, t);
        let leg2 = lerp(&self.p1, &self.p2, t);
        let vt = perp(&normalize_to(&(leg2 - leg1), distance)?);

        let qa = apex + vt;
        let qb = apex - vt;
        let qa2 = qa + perp(&vt);
        let qb2 = qb + perp(&vt);

        let q1ac =
            line_line_intersect(&p0a, &c1a, &qa, &qa2).ok_or(GeometryError::ParallelLines)?;
        let q2ac =
            line_line_intersect(&p2a, &c2a, &qa, &qa2).ok_or(GeometryError::ParallelLines)?;
        let q1bc =
            line_line_intersect(&p0b, &c1b, &qb, &qb2).ok_or(GeometryError::ParallelLines)?;
        let q2bc =
            line_line_intersect(&p2b, &c2b, &qb, &qb2).ok_or(GeometryError::ParallelLines)?;

        Ok(vec![
            CubicBezier::from_quadratic(&Self::new(p0a, q1ac, qa)),
            CubicBezier::from_quadratic(&Self::new(qa, q2ac, p2a)),
            CubicBezier::from_quadratic(&Self::new(p0b, q1bc, qb)),
            CubicBezier::from_quadratic(&Self::new(qb, q2bc, p2b)),
        ])
    }
}
