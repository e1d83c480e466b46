pub mod intersect_2d;
pub mod vector_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Lifts a 2D point into 3D at `z = 0`.
#[must_use]
pub fn to_3d(p: &Point2) -> Point3 {
    Point3::new(p.x, p.y, 0.0)
}

/// Lifts a 2D vector into 3D at `z = 0`.
#[must_use]
pub fn vec_to_3d(v: &Vector2) -> Vector3 {
    Vector3::new(v.x, v.y, 0.0)
}
