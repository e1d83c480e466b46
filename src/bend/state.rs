use crate::curve::QuadraticBezier;
use crate::grid::TileId;
use crate::math::Vector2;

/// The two animation kinds: a Bend rotates a segment toward a target
/// angle, a Straighten interpolates it back toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BendKind {
    Bend,
    Straighten,
}

/// Immutable snapshot of one bend/straighten operation.
///
/// Created by a bend request, consumed every simulation step by the
/// owning segment and the listed chain tiles, and discarded once it is no
/// longer the most recent state.
#[derive(Debug, Clone)]
pub struct BendState {
    /// Approach direction the bend was requested with (unit length).
    pub in_direction: Vector2,
    /// Exit tangent at full deflection: the approach rotated by `2θ`.
    pub exit_direction: Vector2,
    pub angle_radians: f64,
    pub angle_degrees: f64,
    /// Animation duration in seconds, `|θ| / ANIMATION_SPEED`.
    pub duration: f64,
    /// Ratio of pre-bend to post-bend curve length; keeps the angular
    /// animation speed visually constant despite the length change.
    pub scale: f64,
    /// The originating tile.
    pub from: TileId,
    /// The bend curve at full deflection.
    pub curve: QuadraticBezier,
    pub kind: BendKind,
    /// Tiles reachable from the origin along its original facing,
    /// nearest-first. Fixed for the lifetime of this state.
    pub after: Vec<TileId>,
    /// Tiles reachable along the opposite facing, nearest-first.
    pub before: Vec<TileId>,
}
