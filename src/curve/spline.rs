use crate::math::{to_3d, vec_to_3d, Point3, Vector3};

use super::cubic::CubicBezier;

/// Fixed-layout array of 8 vectors handed to the rendering layer per
/// update: for each of the two wall curves, `(start, start_tangent, end,
/// end_tangent)` in that order. Tangents are Hermite tangents, not raw
/// control-point deltas. Everything is lifted to 3D at `z = 0`; height
/// placement belongs to the consumer.
pub type CurveArray = [Vector3; 8];

/// Spline endpoint data for one curve: positions plus clamped Hermite
/// tangents.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineEndpoints {
    pub start: Point3,
    pub start_tangent: Vector3,
    pub end: Point3,
    pub end_tangent: Vector3,
}

impl SplineEndpoints {
    /// Extracts endpoint positions and Hermite tangents from a cubic.
    #[must_use]
    pub fn from_cubic(curve: &CubicBezier) -> Self {
        let (t0, t1) = curve.hermite_tangents();
        Self {
            start: to_3d(&curve.p0),
            start_tangent: vec_to_3d(&t0),
            end: to_3d(&curve.p3),
            end_tangent: vec_to_3d(&t1),
        }
    }
}

/// Packs the two wall curves into the flat [`CurveArray`] contract.
#[must_use]
pub fn pack_wall_curves(walls: &[CubicBezier; 2]) -> CurveArray {
    let mut array = [Vector3::zeros(); 8];
    for (i, curve) in walls.iter().enumerate() {
        let endpoints = SplineEndpoints::from_cubic(curve);
        array[i * 4] = endpoints.start.coords;
        array[i * 4 + 1] = endpoints.start_tangent;
        array[i * 4 + 2] = endpoints.end.coords;
        array[i * 4 + 3] = endpoints.end_tangent;
    }
    array
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::curve::QuadraticBezier;
    use crate::math::Point2;

    use super::*;

    #[test]
    fn pack_layout_matches_contract() {
        let q = QuadraticBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(10.0, 0.0),
        );
        let (plus, minus) = q.offset(2.0).unwrap();
        let array = pack_wall_curves(&[plus.clone(), minus.clone()]);

        let (t0, t1) = plus.hermite_tangents();
        assert!((array[0] - to_3d(&plus.p0).coords).norm() < 1e-12);
        assert!((array[1] - vec_to_3d(&t0)).norm() < 1e-12);
        assert!((array[2] - to_3d(&plus.p3).coords).norm() < 1e-12);
        assert!((array[3] - vec_to_3d(&t1)).norm() < 1e-12);

        let (m0, m1) = minus.hermite_tangents();
        assert!((array[4] - to_3d(&minus.p0).coords).norm() < 1e-12);
        assert!((array[5] - vec_to_3d(&m0)).norm() < 1e-12);
        assert!((array[6] - to_3d(&minus.p3).coords).norm() < 1e-12);
        assert!((array[7] - vec_to_3d(&m1)).norm() < 1e-12);

        // Everything stays in the z = 0 plane.
        assert!(array.iter().all(|v| v.z.abs() < 1e-12));
    }
}
