use crate::curve::CurveArray;
use crate::grid::TileId;
use crate::math::Point3;

/// World position/yaw pair for a segment's crossing detector, recomputed
/// every step at the live curve's half-length point.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerPlacement {
    pub position: Point3,
    /// Yaw in degrees, rotated 90° from the curve tangent so the detector
    /// spans the corridor.
    pub yaw_degrees: f64,
}

/// One tile's geometry output for one simulation step.
#[derive(Debug, Clone)]
pub struct GeometryUpdate {
    pub tile: TileId,
    pub row: usize,
    pub column: usize,
    /// Wall curve endpoints/tangents in the fixed 8-vector layout.
    pub curves: CurveArray,
    pub trigger: TriggerPlacement,
    /// True on the finalizing step of the animation.
    pub complete: bool,
}

/// Capability the presentation layer injects to receive geometry.
///
/// The kernel never owns or constructs rendering primitives; it only
/// pushes curve arrays and trigger placements through this seam.
pub trait GeometrySink {
    fn apply(&mut self, update: GeometryUpdate);
}

/// Sink that buffers updates in a `Vec`, for tests and polling callers.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub updates: Vec<GeometryUpdate>,
}

impl GeometrySink for CollectSink {
    fn apply(&mut self, update: GeometryUpdate) {
        self.updates.push(update);
    }
}
