use crate::math::vector_2d::signed_angle;
use crate::math::Vector2;

/// A cardinal facing on the tile grid. Rotations between directions are
/// always multiples of 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in enumeration order. This order is also the
    /// tie-break order for [`Direction::from_vector`].
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit vector of the direction: North = `(0, 1)`, East = `(1, 0)`,
    /// South = `(0, -1)`, West = `(-1, 0)`.
    #[must_use]
    pub fn unit(self) -> Vector2 {
        match self {
            Self::North => Vector2::new(0.0, 1.0),
            Self::East => Vector2::new(1.0, 0.0),
            Self::South => Vector2::new(0.0, -1.0),
            Self::West => Vector2::new(-1.0, 0.0),
        }
    }

    /// Yaw angle in degrees: North 0, East 90, South 180, West 270.
    #[must_use]
    pub fn yaw_degrees(self) -> f64 {
        match self {
            Self::North => 0.0,
            Self::East => 90.0,
            Self::South => 180.0,
            Self::West => 270.0,
        }
    }

    /// The opposing direction. Self-inverse.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Classifies a vector as the cardinal direction with the minimum
    /// absolute signed angle to it.
    ///
    /// Ties (vectors exactly between two cardinals) resolve to the
    /// earlier direction in [`Direction::ALL`] order — a policy choice,
    /// not a mathematical necessity, so it is pinned by test.
    #[must_use]
    pub fn from_vector(v: &Vector2) -> Self {
        let mut best = Self::North;
        let mut best_angle = f64::INFINITY;
        for direction in Self::ALL {
            let angle = signed_angle(v, &direction.unit()).abs();
            if angle < best_angle {
                best = direction;
                best_angle = angle;
            }
        }
        best
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_self_inverse() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn from_vector_round_trips_unit_vectors() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_vector(&d.unit()), d);
        }
    }

    #[test]
    fn from_vector_classifies_off_axis_vectors() {
        assert_eq!(Direction::from_vector(&Vector2::new(0.3, 1.0)), Direction::North);
        assert_eq!(Direction::from_vector(&Vector2::new(1.0, -0.3)), Direction::East);
        assert_eq!(Direction::from_vector(&Vector2::new(-0.2, -1.0)), Direction::South);
        assert_eq!(Direction::from_vector(&Vector2::new(-1.0, 0.2)), Direction::West);
    }

    #[test]
    fn from_vector_ties_resolve_in_enumeration_order() {
        // Exactly between North and East: North wins (earlier in ALL).
        assert_eq!(Direction::from_vector(&Vector2::new(1.0, 1.0)), Direction::North);
        // Exactly between East and South: East wins.
        assert_eq!(Direction::from_vector(&Vector2::new(1.0, -1.0)), Direction::East);
        // Exactly between South and West: South wins.
        assert_eq!(Direction::from_vector(&Vector2::new(-1.0, -1.0)), Direction::South);
        // Exactly between West and North: North wins (earlier in ALL).
        assert_eq!(Direction::from_vector(&Vector2::new(-1.0, 1.0)), Direction::North);
    }

    #[test]
    fn yaw_advances_clockwise_by_quarter_turns() {
        assert!((Direction::North.yaw_degrees()).abs() < 1e-12);
        assert!((Direction::East.yaw_degrees() - 90.0).abs() < 1e-12);
        assert!((Direction::South.yaw_degrees() - 180.0).abs() < 1e-12);
        assert!((Direction::West.yaw_degrees() - 270.0).abs() < 1e-12);
    }
}
