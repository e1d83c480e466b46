pub mod segment;
pub mod sink;
pub mod state;

pub use segment::{Segment, SegmentSpec};
pub use sink::{CollectSink, GeometrySink, GeometryUpdate, TriggerPlacement};
pub use state::{BendKind, BendState};

use log::{debug, info};
use slotmap::SecondaryMap;

use crate::curve::{pack_wall_curves, CubicBezier, QuadraticBezier};
use crate::error::{BendError, GridError, Result};
use crate::grid::{BendPhase, Direction, Grid, TileId, TileKind};
use crate::math::vector_2d::{normalize_to, point_along, rotate_point, rotate_vector};
use crate::math::{Point2, Point3, Vector2, TOLERANCE};

use segment::AnimationClock;

/// Angular animation speed in radians per second.
pub const ANIMATION_SPEED: f64 = 1.5708;

/// Duration of a bend/straighten animation for the given deflection.
#[must_use]
pub fn animation_duration(theta_radians: f64) -> f64 {
    theta_radians.abs() / ANIMATION_SPEED
}

/// Computes the crossing-detector placement at `distance` along the live
/// centerline: world position plus a yaw rotated 90° from the tangent so
/// the detector spans the corridor.
fn trigger_placement(curve: &QuadraticBezier, distance: f64, z: f64) -> TriggerPlacement {
    let t = curve.parameter_at_distance(distance);
    let position = curve.point_at(t);
    let tangent = curve.derivative_at(t);
    TriggerPlacement {
        position: Point3::new(position.x, position.y, z),
        yaw_degrees: tangent.y.atan2(tangent.x).to_degrees() + 90.0,
    }
}

/// The corridor bend state machine.
///
/// Owns the tile grid and one [`Segment`] per corridor tile, and drives
/// all bend/straighten animations from an explicit [`BendEngine::advance`]
/// step function. Single-threaded and tick-driven: at most one segment
/// animates at a time, enforced as a precondition on new requests.
#[derive(Debug)]
pub struct BendEngine {
    grid: Grid,
    segments: SecondaryMap<TileId, Segment>,
    animating: Option<TileId>,
}

impl BendEngine {
    /// Builds an engine over a populated grid with default segment
    /// geometry.
    ///
    /// # Errors
    ///
    /// Propagates curve-construction errors from segment initialization.
    pub fn new(grid: Grid) -> Result<Self> {
        Self::with_spec(grid, SegmentSpec::default())
    }

    /// Builds an engine with explicit segment geometry.
    ///
    /// # Errors
    ///
    /// Propagates curve-construction errors from segment initialization.
    pub fn with_spec(grid: Grid, spec: SegmentSpec) -> Result<Self> {
        let mut segments = SecondaryMap::new();
        for (id, tile) in grid.tiles() {
            match tile.kind() {
                TileKind::Corridor => {
                    segments.insert(id, Segment::new(id, tile, &spec)?);
                }
            }
        }
        Ok(Self {
            grid,
            segments,
            animating: None,
        })
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The corridor segment for a tile.
    ///
    /// # Errors
    ///
    /// Fails if the tile has no segment.
    pub fn segment(&self, id: TileId) -> Result<&Segment> {
        self.segments.get(id).ok_or_else(|| BendError::NoSegment.into())
    }

    /// Whether any segment is mid-animation.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating.is_some()
    }

    /// Registers a detector-trigger association from one tile to another.
    ///
    /// # Errors
    ///
    /// Fails with a conflict if an association to the same target already
    /// exists; existing registrations are never silently overwritten.
    pub fn register_trigger(&mut self, from: TileId, to: TileId) -> Result<()> {
        let (row, column) = {
            let tile = self.grid.tile(to)?;
            (tile.row(), tile.column())
        };
        let seg = self.segments.get_mut(from).ok_or(BendError::NoSegment)?;
        if !seg.triggers.insert(to) {
            return Err(BendError::TriggerExists { row, column }.into());
        }
        Ok(())
    }

    /// Handles an agent crossing a tile boundary: classifies the agent's
    /// forward vector to a cardinal direction and, if the neighboring
    /// tile that way is bendable, starts a bend on it.
    ///
    /// Returns the tile that started bending, or `None` when there is no
    /// bendable neighbor in that direction.
    ///
    /// # Errors
    ///
    /// Propagates bend preconditions and geometry failures.
    pub fn handle_crossing(
        &mut self,
        tile_id: TileId,
        agent_forward: &Vector2,
        theta_degrees: f64,
    ) -> Result<Option<TileId>> {
        let direction = Direction::from_vector(agent_forward);
        let Some(next) = self.grid.adjacent(tile_id, direction) else {
            return Ok(None);
        };
        if !self.grid.tile(next)?.is_bendable() {
            return Ok(None);
        }
        self.bend_to(next, theta_degrees, &direction.unit())?;
        Ok(Some(next))
    }

    /// Starts a bend of `theta_degrees` on a corridor tile, approached
    /// along `approach`.
    ///
    /// The chord of the section curve rotates by θ while the entry
    /// tangent stays fixed, so the exit tangent rotates by 2θ (the
    /// reflection-about-chord identity). When the approach runs against
    /// the tile's facing, the bend works on the facing-reversed curve.
    ///
    /// # Errors
    ///
    /// Fails when another animation is running, the tile is not bendable,
    /// or the requested deflection has no finite bend curve (a ±90° chord
    /// rotation makes the entry and exit rays antiparallel).
    pub fn bend_to(&mut self, tile_id: TileId, theta_degrees: f64, approach: &Vector2) -> Result<()> {
        if self.animating.is_some() {
            return Err(BendError::AnimationInProgress.into());
        }

        let tile = self.grid.tile(tile_id)?;
        if !tile.is_bendable() {
            return Err(BendError::NotBendable {
                row: tile.row(),
                column: tile.column(),
            }
            .into());
        }
        let (row, column) = (tile.row(), tile.column());
        let facing = tile.direction();
        let starting = tile.starting_direction();

        let seg = self.segments.get(tile_id).ok_or(BendError::NoSegment)?;
        let theta = theta_degrees.to_radians();
        let approach_unit = normalize_to(approach, 1.0)?;

        // A bend is always expressed relative to the curve's forward
        // orientation; approaching against the facing reverses the curve.
        let forward = Direction::from_vector(&approach_unit) == facing;
        let source = if forward {
            seg.section_curve.clone()
        } else {
            seg.section_curve.reversed()
        };

        let target = rotate_point(&source.p2, &source.p0, theta);
        let exit = rotate_vector(&approach_unit, 2.0 * theta);
        debug!("bend request on [{row},{column}]: exit ({:.3}, {:.3})", exit.x, exit.y);

        // The bent curve is longer than the section, so animation scales
        // the chord to keep the apparent angular speed constant.
        let start_len = seg.section_curve.length();
        let curve = QuadraticBezier::bend(&source.p0, &source.p2, &target, &exit)?;
        let scale = start_len / curve.length();

        let state = BendState {
            in_direction: approach_unit,
            exit_direction: exit,
            angle_radians: theta,
            angle_degrees: theta_degrees,
            duration: animation_duration(theta),
            scale,
            from: tile_id,
            curve,
            kind: BendKind::Bend,
            after: self.grid.visible_from(tile_id, starting),
            before: self.grid.visible_from(tile_id, starting.opposite()),
        };
        self.begin_animation(tile_id, state)
    }

    /// Starts the straighten animation mirroring the tile's most recent
    /// completed bend.
    ///
    /// # Errors
    ///
    /// Fails when another animation is running or the tile has no bend
    /// state to straighten.
    pub fn straighten(&mut self, tile_id: TileId) -> Result<()> {
        if self.animating.is_some() {
            return Err(BendError::AnimationInProgress.into());
        }
        let seg = self.segments.get(tile_id).ok_or(BendError::NoSegment)?;
        let previous = seg.stack.last().ok_or(BendError::NoActiveBend)?;
        if previous.kind != BendKind::Bend {
            return Err(BendError::NoActiveBend.into());
        }
        let state = BendState {
            kind: BendKind::Straighten,
            ..previous.clone()
        };
        self.begin_animation(tile_id, state)
    }

    fn begin_animation(&mut self, origin: TileId, state: BendState) -> Result<()> {
        let bending = state.kind == BendKind::Bend;
        for &tile in &state.after {
            self.grid.tile_mut(tile)?.phase = if bending {
                BendPhase::After
            } else {
                BendPhase::None
            };
        }
        for &tile in &state.before {
            self.grid.tile_mut(tile)?.phase = if bending {
                BendPhase::None
            } else {
                BendPhase::Before
            };
        }
        self.grid.tile_mut(origin)?.phase = BendPhase::Bend;

        let seg = self.segments.get_mut(origin).ok_or(BendError::NoSegment)?;
        seg.clock = Some(AnimationClock {
            elapsed: 0.0,
            duration: state.duration,
        });
        info!(
            "{:?} started: {:.1}° over {:.3} s, {} after / {} before",
            state.kind,
            state.angle_degrees,
            state.duration,
            state.after.len(),
            state.before.len()
        );
        seg.stack.push(state);
        self.animating = Some(origin);
        Ok(())
    }

    /// Advances the running animation by `dt` seconds, pushing one
    /// [`GeometryUpdate`] per affected tile into the sink. A no-op when
    /// nothing is animating.
    ///
    /// Every step reconstructs the full geometry from the base curve and
    /// the current angle; nothing is incrementally nudged, so there is no
    /// drift across frames.
    ///
    /// # Errors
    ///
    /// Propagates geometry failures; the animation state is not advanced
    /// past a failing frame.
    pub fn advance(&mut self, dt: f64, sink: &mut dyn GeometrySink) -> Result<()> {
        let Some(origin) = self.animating else {
            return Ok(());
        };

        let (bend, elapsed, complete, angle) = {
            let seg = self.segments.get(origin).ok_or(BendError::NoSegment)?;
            let clock = seg.clock.ok_or(BendError::NoActiveBend)?;
            let elapsed = clock.elapsed + dt;
            let complete = elapsed >= clock.duration;
            let alpha = (elapsed / clock.duration).clamp(0.0, 1.0);
            let bend = seg.stack.last().cloned().ok_or(BendError::NoActiveBend)?;
            let angle = match bend.kind {
                BendKind::Bend => {
                    if complete {
                        bend.angle_radians
                    } else {
                        alpha * bend.angle_radians
                    }
                }
                BendKind::Straighten => {
                    if complete {
                        0.0
                    } else {
                        (1.0 - alpha) * bend.angle_radians
                    }
                }
            };
            (bend, elapsed, complete, angle)
        };

        match bend.kind {
            BendKind::Bend => {
                let update = self.curve_array(origin, &bend, angle, complete)?;
                sink.apply(update);
                for &tile in &bend.after {
                    let update = self.propagate(tile, &bend, complete)?;
                    sink.apply(update);
                }
            }
            BendKind::Straighten => {
                let update = self.curve_array_inverse(origin, &bend, angle, complete)?;
                sink.apply(update);
                for &tile in &bend.before {
                    let update = self.propagate(tile, &bend, complete)?;
                    sink.apply(update);
                }
            }
        }

        // The clock commits only once the whole frame reconstructed; a
        // failing frame leaves the animation state untouched.
        let seg = self.segments.get_mut(origin).ok_or(BendError::NoSegment)?;
        if let Some(clock) = seg.clock.as_mut() {
            clock.elapsed = elapsed;
        }

        if complete {
            self.finish(origin, &bend)?;
        }
        Ok(())
    }

    /// Reconstructs the bend geometry at an intermediate `angle`: the
    /// source chord (scaled) rotates by `angle`, the entry direction by
    /// `2 * angle`, and the wall curves are re-derived by offsetting.
    fn curve_array(
        &mut self,
        origin: TileId,
        bend: &BendState,
        angle: f64,
        complete: bool,
    ) -> Result<GeometryUpdate> {
        let tile = self.grid.tile(origin)?;
        let (row, column, z, facing) = (tile.row(), tile.column(), tile.location().z, tile.direction());
        let seg = self.segments.get_mut(origin).ok_or(BendError::NoSegment)?;

        let mut source = seg.section_curve.clone();
        if facing != Direction::from_vector(&bend.in_direction) {
            source = source.reversed();
        }

        let local = (source.p2 - source.p0) * bend.scale;
        let target = source.p0 + rotate_vector(&local, angle);
        let dir = rotate_vector(&bend.in_direction, 2.0 * angle);

        let curve = QuadraticBezier::bend(&source.p0, &source.p2, &target, &dir)?;
        let (plus, minus) = curve.offset(seg.width)?;
        let trigger = trigger_placement(&curve, seg.length * bend.scale / 2.0, z);

        seg.current_curve = curve;
        seg.walls = [plus, minus];

        Ok(GeometryUpdate {
            tile: origin,
            row,
            column,
            curves: pack_wall_curves(&seg.walls),
            trigger,
            complete,
        })
    }

    /// Straighten-direction counterpart of [`Self::curve_array`]:
    /// reconstructs from the exit side backward toward zero angle. At
    /// exactly zero the bend construction is singular (all points
    /// collinear), so that frame special-cases to straight curves.
    fn curve_array_inverse(
        &mut self,
        origin: TileId,
        bend: &BendState,
        angle: f64,
        complete: bool,
    ) -> Result<GeometryUpdate> {
        let tile = self.grid.tile(origin)?;
        let (row, column, z) = (tile.row(), tile.column(), tile.location().z);
        let seg = self.segments.get_mut(origin).ok_or(BendError::NoSegment)?;

        let back = -bend.exit_direction;
        let start = seg.section_curve.p2;
        let new_end = point_along(&start, &back, seg.length)?;
        let source = QuadraticBezier::new(
            start,
            Point2::from((start.coords + new_end.coords) * 0.5),
            new_end,
        );

        let (curve, plus, minus) = if angle.abs() < TOLERANCE {
            let curve = QuadraticBezier::straight(&source.p0, &back, seg.length, 0.0)?;
            let plus = CubicBezier::from_quadratic(&QuadraticBezier::straight(
                &source.p0, &back, seg.length, seg.width,
            )?);
            let minus = CubicBezier::from_quadratic(&QuadraticBezier::straight(
                &source.p0, &back, seg.length, -seg.width,
            )?);
            (curve, plus, minus)
        } else {
            let local = source.p2 - source.p0;
            let target = source.p0 + rotate_vector(&local, -angle);
            let dir = rotate_vector(&bend.exit_direction, -2.0 * angle);
            let curve = QuadraticBezier::bend(&source.p0, &source.p2, &target, &dir)?;
            let (plus, minus) = curve.offset(seg.width)?;
            (curve, plus, minus)
        };

        let trigger = trigger_placement(&curve, seg.length * bend.scale / 2.0, z);
        seg.current_curve = curve;
        seg.walls = [plus, minus];

        Ok(GeometryUpdate {
            tile: origin,
            row,
            column,
            curves: pack_wall_curves(&seg.walls),
            trigger,
            complete,
        })
    }

    /// Re-anchors one chain tile to its inner neighbor's just-updated
    /// centerline endpoint and extends it straight outward, producing the
    /// rigid "conveyor" motion of the reachable run.
    fn propagate(&mut self, tile_id: TileId, bend: &BendState, complete: bool) -> Result<GeometryUpdate> {
        let tile = self.grid.tile(tile_id)?;
        let (row, column, z, starting) = (
            tile.row(),
            tile.column(),
            tile.location().z,
            tile.starting_direction(),
        );

        let (neighbor_dir, extend_dir) = match bend.kind {
            BendKind::Bend => (starting.opposite(), bend.exit_direction),
            BendKind::Straighten => (starting, -bend.exit_direction),
        };
        let neighbor = self
            .grid
            .adjacent(tile_id, neighbor_dir)
            .ok_or(GridError::TileNotFound)?;
        let anchor = self
            .segments
            .get(neighbor)
            .ok_or(BendError::NoSegment)?
            .current_curve
            .p2;

        let seg = self.segments.get_mut(tile_id).ok_or(BendError::NoSegment)?;
        let curve = QuadraticBezier::straight(&anchor, &extend_dir, seg.length, 0.0)?;
        let plus = CubicBezier::from_quadratic(&QuadraticBezier::straight(
            &anchor, &extend_dir, seg.length, seg.width,
        )?);
        let minus = CubicBezier::from_quadratic(&QuadraticBezier::straight(
            &anchor, &extend_dir, seg.length, -seg.width,
        )?);

        let trigger = trigger_placement(&curve, seg.length * bend.scale / 2.0, z);
        seg.current_curve = curve;
        seg.walls = [plus, minus];

        Ok(GeometryUpdate {
            tile: tile_id,
            row,
            column,
            curves: pack_wall_curves(&seg.walls),
            trigger,
            complete,
        })
    }

    /// Finalizes a completed animation: snaps directions to the cardinal
    /// nearest the exit vector, re-bases section curves to the live
    /// curves, resets phases, and stops the clock.
    fn finish(&mut self, origin: TileId, bend: &BendState) -> Result<()> {
        self.complete_tile(origin, bend)?;
        for &tile in &bend.after {
            self.complete_tile(tile, bend)?;
        }
        for &tile in &bend.before {
            self.grid.tile_mut(tile)?.phase = BendPhase::None;
        }

        let seg = self.segments.get_mut(origin).ok_or(BendError::NoSegment)?;
        seg.clock = None;
        if bend.kind == BendKind::Straighten {
            // The corridor is back to neutral; nothing left to mirror.
            seg.stack.clear();
        }
        self.animating = None;
        info!("{:?} complete on segment [{:?}]", bend.kind, origin);
        Ok(())
    }

    fn complete_tile(&mut self, id: TileId, bend: &BendState) -> Result<()> {
        let new_direction = Direction::from_vector(&bend.exit_direction);
        let tile = self.grid.tile_mut(id)?;
        tile.direction = new_direction;
        tile.phase = BendPhase::None;
        if let Some(seg) = self.segments.get_mut(id) {
            seg.section_curve = seg.current_curve.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use crate::error::CorribendError;
    use crate::grid::TileKind;

    use super::*;

    /// Demo layout: a run of corridor tiles along row 7,
    /// facing North, with only [7,8] bendable.
    fn demo_engine() -> (BendEngine, Vec<TileId>) {
        let mut grid = Grid::new(16, 16);
        let mut ids = Vec::new();
        for (column, bendable) in [(7, false), (8, true), (9, false), (10, false), (11, false)] {
            ids.push(
                grid.place_tile(7, column, TileKind::Corridor, 70.0, Direction::North, bendable)
                    .unwrap(),
            );
        }
        (BendEngine::new(grid).unwrap(), ids)
    }

    #[test]
    fn quarter_turn_duration_is_one_second() {
        assert!((animation_duration(FRAC_PI_2) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn bend_end_to_end() {
        let (mut engine, ids) = demo_engine();
        let origin = ids[1];

        // Before any request the live curve is the neutral section curve.
        let seg = engine.segment(origin).unwrap();
        assert_eq!(seg.section_curve(), seg.current_curve());
        let north = Direction::North.unit();

        engine.bend_to(origin, 45.0, &north).unwrap();
        assert!(engine.is_animating());

        {
            let state = engine.segment(origin).unwrap().active_state().unwrap();
            assert_eq!(state.kind, BendKind::Bend);
            assert_eq!(state.after, vec![ids[2], ids[3], ids[4]]);
            assert_eq!(state.before, vec![ids[0]]);
            assert!((state.duration - 0.5).abs() < 1e-3, "d={}", state.duration);
            assert!(state.scale < 1.0, "scale={}", state.scale);
            // Exit is the approach rotated by 2θ = 90° CCW: West.
            assert!((state.exit_direction - Vector2::new(-1.0, 0.0)).norm() < 1e-9);
        }

        let mut sink = CollectSink::default();
        for _ in 0..5 {
            engine.advance(0.125, &mut sink).unwrap();
        }
        assert!(!engine.is_animating());
        // 4 active steps, each emitting origin + 3 chained tiles.
        assert_eq!(sink.updates.len(), 16);
        let last_batch = &sink.updates[12..];
        assert!(last_batch.iter().all(|u| u.complete));
        assert!(sink.updates[..12].iter().all(|u| !u.complete));
        for update in &sink.updates {
            assert!(update.curves.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
            assert!((update.trigger.position.z - 70.0).abs() < 1e-12);
            assert!(update.trigger.yaw_degrees.is_finite());
        }

        // Directions snapped to the cardinal nearest the exit vector.
        for &id in &[origin, ids[2], ids[3], ids[4]] {
            assert_eq!(engine.grid().tile(id).unwrap().direction(), Direction::West);
            assert_eq!(engine.grid().tile(id).unwrap().phase(), BendPhase::None);
        }
        // Starting direction never changes.
        assert_eq!(
            engine.grid().tile(origin).unwrap().starting_direction(),
            Direction::North
        );

        // The section curve is re-based onto the bent curve.
        let seg = engine.segment(origin).unwrap();
        assert_eq!(seg.section_curve(), seg.current_curve());
        let exit_tangent = (seg.current_curve().p2 - seg.current_curve().p1).normalize();
        assert!((exit_tangent - Vector2::new(-1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn chained_tiles_follow_the_bend() {
        let (mut engine, ids) = demo_engine();
        engine.bend_to(ids[1], 45.0, &Direction::North.unit()).unwrap();

        let mut sink = CollectSink::default();
        engine.advance(0.1, &mut sink).unwrap();

        // First chained tile anchors at the origin's live endpoint.
        let origin_end = engine.segment(ids[1]).unwrap().current_curve().p2;
        let chained = engine.segment(ids[2]).unwrap().current_curve().clone();
        assert!((chained.p0 - origin_end).norm() < 1e-9);
        // And the chain continues tile by tile.
        let next = engine.segment(ids[3]).unwrap().current_curve().clone();
        assert!((next.p0 - chained.p2).norm() < 1e-9);
        assert_eq!(engine.grid().tile(ids[2]).unwrap().phase(), BendPhase::After);
        assert_eq!(engine.grid().tile(ids[0]).unwrap().phase(), BendPhase::None);
    }

    #[test]
    fn failing_frame_leaves_the_clock_untouched() {
        let (mut engine, ids) = demo_engine();
        engine.bend_to(ids[1], 45.0, &Direction::North.unit()).unwrap();

        let mut sink = CollectSink::default();
        engine.advance(0.125, &mut sink).unwrap();
        let elapsed = engine.segment(ids[1]).unwrap().clock.unwrap().elapsed;
        assert!((elapsed - 0.125).abs() < 1e-12);

        // A chained tile without a segment makes propagation fail
        // mid-frame; the clock must not commit that frame's dt.
        engine.segments.remove(ids[2]);
        assert!(engine.advance(0.125, &mut sink).is_err());
        let after = engine.segment(ids[1]).unwrap().clock.unwrap().elapsed;
        assert!((after - elapsed).abs() < 1e-12, "elapsed={after}");
    }

    #[test]
    fn straighten_after_bend_clears_the_stack() {
        let (mut engine, ids) = demo_engine();
        let origin = ids[1];
        let mut sink = CollectSink::default();

        engine.bend_to(origin, 45.0, &Direction::North.unit()).unwrap();
        while engine.is_animating() {
            engine.advance(0.125, &mut sink).unwrap();
        }

        engine.straighten(origin).unwrap();
        assert_eq!(
            engine.segment(origin).unwrap().active_state().unwrap().kind,
            BendKind::Straighten
        );
        assert_eq!(engine.grid().tile(ids[0]).unwrap().phase(), BendPhase::Before);

        sink.updates.clear();
        while engine.is_animating() {
            engine.advance(0.125, &mut sink).unwrap();
        }
        // Straighten propagates to the before chain: origin + 1 tile per step.
        assert_eq!(sink.updates.len() % 2, 0);
        assert!(sink.updates.iter().all(|u| u.row == 7));

        // No state left to mirror.
        assert!(engine.segment(origin).unwrap().active_state().is_none());
        match engine.straighten(origin) {
            Err(CorribendError::Bend(BendError::NoActiveBend)) => {}
            other => panic!("expected NoActiveBend, got {other:?}"),
        }
    }

    #[test]
    fn final_straighten_frame_is_perfectly_straight() {
        let (mut engine, ids) = demo_engine();
        let origin = ids[1];
        let mut sink = CollectSink::default();

        engine.bend_to(origin, 45.0, &Direction::North.unit()).unwrap();
        while engine.is_animating() {
            engine.advance(0.25, &mut sink).unwrap();
        }
        engine.straighten(origin).unwrap();
        while engine.is_animating() {
            engine.advance(0.25, &mut sink).unwrap();
        }

        let curve = engine.segment(origin).unwrap().current_curve().clone();
        // Control point sits exactly on the chord midpoint.
        let mid = Point2::from((curve.p0.coords + curve.p2.coords) * 0.5);
        assert!((curve.p1 - mid).norm() < 1e-9);
        assert!((curve.length() - 200.0).abs() < 1e-6);
    }

    #[test]
    fn request_preconditions() {
        let (mut engine, ids) = demo_engine();
        let north = Direction::North.unit();

        match engine.bend_to(ids[0], 45.0, &north) {
            Err(CorribendError::Bend(BendError::NotBendable { row: 7, column: 7 })) => {}
            other => panic!("expected NotBendable, got {other:?}"),
        }
        match engine.straighten(ids[1]) {
            Err(CorribendError::Bend(BendError::NoActiveBend)) => {}
            other => panic!("expected NoActiveBend, got {other:?}"),
        }

        engine.bend_to(ids[1], 45.0, &north).unwrap();
        match engine.bend_to(ids[1], 45.0, &north) {
            Err(CorribendError::Bend(BendError::AnimationInProgress)) => {}
            other => panic!("expected AnimationInProgress, got {other:?}"),
        }
        match engine.straighten(ids[1]) {
            Err(CorribendError::Bend(BendError::AnimationInProgress)) => {}
            other => panic!("expected AnimationInProgress, got {other:?}"),
        }
    }

    #[test]
    fn ninety_degree_chord_rotation_is_rejected() {
        // At θ = 90° the exit tangent rotates by 180°, leaving the entry
        // and exit rays antiparallel: no finite control point exists.
        let (mut engine, ids) = demo_engine();
        match engine.bend_to(ids[1], 90.0, &Direction::North.unit()) {
            Err(CorribendError::Geometry(_)) => {}
            other => panic!("expected a geometry error, got {other:?}"),
        }
        assert!(!engine.is_animating());
    }

    #[test]
    fn crossing_bends_the_bendable_neighbor() {
        let (mut engine, ids) = demo_engine();
        // Agent walking roughly north across [7,7]: neighbor [7,8] bends.
        let started = engine
            .handle_crossing(ids[0], &Vector2::new(0.1, 1.0), 45.0)
            .unwrap();
        assert_eq!(started, Some(ids[1]));
        assert!(engine.is_animating());
    }

    #[test]
    fn crossing_toward_rigid_neighbor_is_ignored() {
        let (mut engine, ids) = demo_engine();
        // North of [7,9] is [7,10], which is not bendable.
        let started = engine
            .handle_crossing(ids[2], &Vector2::new(0.0, 1.0), 45.0)
            .unwrap();
        assert_eq!(started, None);
        assert!(!engine.is_animating());
    }

    #[test]
    fn duplicate_trigger_registration_conflicts() {
        let (mut engine, ids) = demo_engine();
        engine.register_trigger(ids[1], ids[2]).unwrap();
        match engine.register_trigger(ids[1], ids[2]) {
            Err(CorribendError::Bend(BendError::TriggerExists { row: 7, column: 9 })) => {}
            other => panic!("expected TriggerExists, got {other:?}"),
        }
        // A different target is fine.
        engine.register_trigger(ids[1], ids[0]).unwrap();
    }
}
