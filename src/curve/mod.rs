pub mod cubic;
pub mod quadratic;
pub mod spline;

pub use cubic::CubicBezier;
pub use quadratic::{OffsetStrategy, QuadraticBezier};
pub use spline::{pack_wall_curves, CurveArray, SplineEndpoints};
