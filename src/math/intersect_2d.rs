use super::{Point2, Vector2, TOLERANCE};

/// Intersection of two infinite lines, each given by two points.
///
/// Each line is rewritten in normal form `Ax + By = k` (the coefficients
/// are the components of the line's unit normal), and the resulting 2×2
/// system is solved directly.
///
/// Returns `None` when the lines are parallel (including coincident
/// lines, which have no *unique* intersection).
#[must_use]
pub fn line_line_intersect(
    a_start: &Point2,
    a_end: &Point2,
    b_start: &Point2,
    b_end: &Point2,
) -> Option<Point2> {
    let a_dir = (a_end - a_start).normalize();
    let b_dir = (b_end - b_start).normalize();

    let a_normal = Vector2::new(-a_dir.y, a_dir.x);
    let b_normal = Vector2::new(-b_dir.y, b_dir.x);

    let (a, b) = (a_normal.x, a_normal.y);
    let (c, d) = (b_normal.x, b_normal.y);

    let det = a * d - b * c;
    if det.abs() < TOLERANCE {
        return None;
    }

    let k1 = a * a_start.x + b * a_start.y;
    let k2 = c * b_start.x + d * b_start.y;

    Some(Point2::new(
        (d * k1 - b * k2) / det,
        (-c * k1 + a * k2) / det,
    ))
}

/// Parameter of the point on a quadratic Bezier nearest its control vertex.
///
/// Closed-form Cardano solve of the cubic that minimizes the distance from
/// `pc` to the curve `(p0, pc, p2)`. Only consumed by the sharp-turn offset
/// strategy, where the curve turns by more than 90° and the cubic has a
/// single real root.
#[must_use]
pub fn nearest_point_parameter(p0: &Point2, pc: &Point2, p2: &Point2) -> f64 {
    let v0 = pc - p0;
    let v1 = p2 - pc;

    let a = (v1 - v0).dot(&(v1 - v0));
    let b = 3.0 * (v1.dot(&v0) - v0.dot(&v0));
    let c = 3.0 * v0.dot(&v0) - v1.dot(&v0);
    let d = -v0.dot(&v0);

    let p = -b / (3.0 * a);
    let q = p * p * p + (b * c - 3.0 * a * d) / (6.0 * a * a);
    let r = c / (3.0 * a);

    let s = (q * q + (r - p * p).powi(3)).sqrt();
    (q + s).cbrt() + (q - s).cbrt() + p
}
