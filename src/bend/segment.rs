use std::collections::HashSet;

use crate::curve::{CubicBezier, QuadraticBezier};
use crate::error::Result;
use crate::grid::{TileData, TileId};
use crate::math::Point2;

use super::state::BendState;

/// Geometry parameters shared by every corridor segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentSpec {
    /// Centerline length of one segment.
    pub length: f64,
    /// Perpendicular distance from the centerline to each wall curve.
    pub width: f64,
}

impl Default for SegmentSpec {
    fn default() -> Self {
        Self {
            length: 200.0,
            width: 50.0,
        }
    }
}

/// Elapsed/duration pair for a running animation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AnimationClock {
    pub elapsed: f64,
    pub duration: f64,
}

/// Per-corridor-tile geometry context.
///
/// Owns the segment's base curve, the live curve rebuilt every animation
/// step, the two wall curves, and this segment's own stack of bend states
/// (last-pushed = currently animating).
#[derive(Debug)]
pub struct Segment {
    pub(crate) tile: TileId,
    pub(crate) length: f64,
    pub(crate) width: f64,
    /// Base centerline; re-based to the live curve on completion.
    pub(crate) section_curve: QuadraticBezier,
    /// Live centerline, rebuilt from the base every step.
    pub(crate) current_curve: QuadraticBezier,
    /// Wall curves, `+normal` side first.
    pub(crate) walls: [CubicBezier; 2],
    pub(crate) stack: Vec<BendState>,
    pub(crate) clock: Option<AnimationClock>,
    pub(crate) triggers: HashSet<TileId>,
}

impl Segment {
    /// Builds the neutral geometry for a corridor tile: a straight
    /// centerline of `spec.length` centred on the tile location along its
    /// facing, with walls at `±spec.width`.
    ///
    /// # Errors
    ///
    /// Propagates degenerate-geometry errors from curve construction.
    pub(crate) fn new(id: TileId, tile: &TileData, spec: &SegmentSpec) -> Result<Self> {
        let origin = Point2::new(tile.location().x, tile.location().y);
        let dir = tile.direction().unit();
        let start = origin - dir * (spec.length / 2.0);

        let center = QuadraticBezier::straight(&start, &dir, spec.length, 0.0)?;
        let walls = [
            CubicBezier::from_quadratic(&QuadraticBezier::straight(
                &start,
                &dir,
                spec.length,
                spec.width,
            )?),
            CubicBezier::from_quadratic(&QuadraticBezier::straight(
                &start,
                &dir,
                spec.length,
                -spec.width,
            )?),
        ];

        Ok(Self {
            tile: id,
            length: spec.length,
            width: spec.width,
            section_curve: center.clone(),
            current_curve: center,
            walls,
            stack: Vec::new(),
            clock: None,
            triggers: HashSet::new(),
        })
    }

    /// The tile this segment belongs to.
    #[must_use]
    pub fn tile(&self) -> TileId {
        self.tile
    }

    /// The segment's base centerline curve.
    #[must_use]
    pub fn section_curve(&self) -> &QuadraticBezier {
        &self.section_curve
    }

    /// The live centerline as of the last update.
    #[must_use]
    pub fn current_curve(&self) -> &QuadraticBezier {
        &self.current_curve
    }

    /// The wall curves as of the last update, `+normal` side first.
    #[must_use]
    pub fn walls(&self) -> &[CubicBezier; 2] {
        &self.walls
    }

    /// The most recent bend state, if any.
    #[must_use]
    pub fn active_state(&self) -> Option<&BendState> {
        self.stack.last()
    }

    /// Whether this segment's animation clock is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.clock.is_some()
    }
}
