use super::{Anchor, Coordinate};
use crate::config::{DiagonalRule, GridConfig};

/// Whether the origin's own square counts as inside a radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelfSquare {
    /// The origin square is never a member (caster does not target itself).
    #[default]
    Exclude,
    /// The origin square is a member, e.g. a burst centered on a picked square.
    Include,
}

/// Stateless distance and adjacency measurements on a square grid.
///
/// All measurements are made between cell centers and expressed in squares.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridMetric {
    config: GridConfig,
}

impl GridMetric {
    pub const fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Integer indices of the cell containing `c`.
    pub fn cell_of(&self, c: Coordinate) -> (i64, i64) {
        let size = self.config.size;
        ((c.x / size).floor() as i64, (c.y / size).floor() as i64)
    }

    /// Snaps an arbitrary point to the center of its containing cell.
    ///
    /// Two raw coordinates in the same cell snap to an identical center.
    pub fn cell_center(&self, c: Coordinate) -> Coordinate {
        let size = self.config.size;
        let (col, row) = self.cell_of(c);
        Coordinate::new(
            col as f64 * size + size / 2.0,
            row as f64 * size + size / 2.0,
        )
    }

    /// Top-left corner of the cell containing `c`, where hosts place tokens.
    pub fn snap_to_grid(&self, c: Coordinate) -> Coordinate {
        let size = self.config.size;
        let (col, row) = self.cell_of(c);
        Coordinate::new(col as f64 * size, row as f64 * size)
    }

    /// Returns true if both points fall inside the same cell.
    pub fn is_same_square(&self, a: Coordinate, b: Coordinate) -> bool {
        self.cell_of(a) == self.cell_of(b)
    }

    /// Grid-aware distance in squares between the cells containing `a` and `b`.
    pub fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let (ax, ay) = self.cell_of(a);
        let (bx, by) = self.cell_of(b);
        let dx = (bx - ax).unsigned_abs();
        let dy = (by - ay).unsigned_abs();

        match self.config.diagonals {
            DiagonalRule::Euclidean => (dx as f64).hypot(dy as f64),
            DiagonalRule::Equidistant => dx.max(dy) as f64,
            DiagonalRule::Alternating => {
                let diagonal = dx.min(dy);
                let straight = dx.max(dy) - diagonal;
                (straight + diagonal + diagonal / 2) as f64
            }
        }
    }

    /// Returns true if `target` lies within `radius` squares of `origin`,
    /// excluding the origin's own square.
    pub fn is_within(&self, origin: Coordinate, target: Coordinate, radius: u32) -> bool {
        self.is_within_with(origin, target, radius, SelfSquare::Exclude)
    }

    /// Radius membership with an explicit rule for the origin square.
    ///
    /// Membership is `floor(distance) <= radius`, so fractional diagonal
    /// distances round down into the radius.
    pub fn is_within_with(
        &self,
        origin: Coordinate,
        target: Coordinate,
        radius: u32,
        self_square: SelfSquare,
    ) -> bool {
        if self_square == SelfSquare::Exclude && self.is_same_square(origin, target) {
            return false;
        }
        self.distance(origin, target).floor() <= f64::from(radius)
    }

    /// Radius membership between anchors.
    ///
    /// Same as [`is_within_with`](Self::is_within_with) except that the
    /// excluded "self" is the origin's identity: a token origin only drops
    /// itself, so a different token sharing its square stays a member.
    pub fn is_anchor_within(
        &self,
        origin: &Anchor,
        target: &Anchor,
        radius: u32,
        self_square: SelfSquare,
    ) -> bool {
        if self_square == SelfSquare::Exclude && origin.is_same_identity(target, self) {
            return false;
        }
        self.distance(origin.position(), target.position()).floor() <= f64::from(radius)
    }

    /// Returns true if `a` and `b` are within the adjacency threshold and are
    /// not the same anchor. An anchor is never adjacent to itself.
    pub fn is_adjacent(&self, a: &Anchor, b: &Anchor) -> bool {
        !a.is_same_identity(b, self)
            && self.distance(a.position(), b.position()) <= self.config.adjacency_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::TokenId;

    fn square(col: i32, row: i32) -> Coordinate {
        // Top-left corner of the cell, the way hosts report token positions.
        Coordinate::from((col * 100, row * 100))
    }

    #[test]
    fn points_in_one_cell_share_a_center() {
        let metric = GridMetric::default();
        let a = Coordinate::new(101.0, 199.5);
        let b = Coordinate::new(199.0, 100.0);

        assert_eq!(metric.cell_center(a), Coordinate::new(150.0, 150.0));
        assert_eq!(metric.cell_center(a), metric.cell_center(b));
        assert!(metric.is_same_square(a, b));
        assert_eq!(metric.snap_to_grid(a), Coordinate::new(100.0, 100.0));
    }

    #[test]
    fn negative_coordinates_floor_into_their_cell() {
        let metric = GridMetric::default();
        assert_eq!(metric.cell_of(Coordinate::new(-1.0, -150.0)), (-1, -2));
        assert_eq!(
            metric.cell_center(Coordinate::new(-1.0, -1.0)),
            Coordinate::new(-50.0, -50.0)
        );
    }

    #[test]
    fn euclidean_diagonal_is_root_two() {
        let metric = GridMetric::default();
        let d = metric.distance(square(0, 0), square(1, 1));
        assert!((d - std::f64::consts::SQRT_2).abs() < 1e-9);
        assert_eq!(metric.distance(square(0, 0), square(3, 0)), 3.0);
    }

    #[test]
    fn diagonal_rules_measure_differently() {
        let from = square(0, 0);
        let to = square(3, 2);

        let equidistant =
            GridMetric::new(GridConfig::new().with_diagonals(DiagonalRule::Equidistant));
        assert_eq!(equidistant.distance(from, to), 3.0);

        // Two diagonals (1 + 2) plus one straight step.
        let alternating =
            GridMetric::new(GridConfig::new().with_diagonals(DiagonalRule::Alternating));
        assert_eq!(alternating.distance(from, to), 4.0);
    }

    #[test]
    fn within_uses_floor_of_distance() {
        let metric = GridMetric::default();
        let origin = square(0, 0);

        assert!(metric.is_within(origin, square(1, 0), 3));
        assert!(metric.is_within(origin, square(3, 0), 3));
        // sqrt(10) ≈ 3.16 and sqrt(13) ≈ 3.61 both floor to 3.
        assert!(metric.is_within(origin, square(3, 1), 3));
        assert!(metric.is_within(origin, square(3, 2), 3));
        // sqrt(18) ≈ 4.24 and exactly 4.0 are outside.
        assert!(!metric.is_within(origin, square(3, 3), 3));
        assert!(!metric.is_within(origin, square(4, 0), 3));
    }

    #[test]
    fn within_excludes_origin_square_unless_included() {
        let metric = GridMetric::default();
        let origin = Coordinate::new(10.0, 10.0);
        let same_cell = Coordinate::new(90.0, 90.0);

        assert!(!metric.is_within(origin, same_cell, 0));
        assert!(!metric.is_within(origin, same_cell, 5));
        assert!(metric.is_within_with(origin, same_cell, 0, SelfSquare::Include));
    }

    #[test]
    fn point_is_never_adjacent_to_itself() {
        let metric = GridMetric::default();
        for c in [square(0, 0), square(-3, 7), Coordinate::new(12.5, 99.9)] {
            let anchor = Anchor::Point(c);
            assert!(!metric.is_adjacent(&anchor, &anchor));
        }
    }

    #[test]
    fn token_is_never_adjacent_to_itself() {
        let metric = GridMetric::default();
        let token = Anchor::Token {
            id: TokenId::new("a"),
            position: square(2, 2),
        };
        assert!(!metric.is_adjacent(&token, &token));
    }

    #[test]
    fn distinct_tokens_sharing_a_square_are_adjacent() {
        let metric = GridMetric::default();
        let a = Anchor::Token {
            id: TokenId::new("a"),
            position: square(2, 2),
        };
        let b = Anchor::Token {
            id: TokenId::new("b"),
            position: square(2, 2),
        };
        assert!(metric.is_adjacent(&a, &b));
    }

    #[test]
    fn adjacency_covers_orthogonal_and_diagonal_only() {
        let metric = GridMetric::default();
        let center = Anchor::Point(square(5, 5));

        assert!(metric.is_adjacent(&center, &Anchor::Point(square(5, 6))));
        assert!(metric.is_adjacent(&center, &Anchor::Point(square(6, 6))));
        assert!(!metric.is_adjacent(&center, &Anchor::Point(square(7, 5))));
        assert!(!metric.is_adjacent(&center, &Anchor::Point(square(7, 6))));
    }

    #[test]
    fn token_origin_excludes_only_itself() {
        let metric = GridMetric::default();
        let origin = Anchor::Token {
            id: TokenId::new("a"),
            position: square(2, 2),
        };
        let neighbour = Anchor::Token {
            id: TokenId::new("b"),
            position: square(2, 2),
        };

        assert!(!metric.is_anchor_within(&origin, &origin, 0, SelfSquare::Exclude));
        assert!(metric.is_anchor_within(&origin, &neighbour, 0, SelfSquare::Exclude));
        assert!(metric.is_anchor_within(&origin, &origin, 0, SelfSquare::Include));
        // A bare point still excludes its whole square.
        let point = Anchor::Point(square(2, 2));
        assert!(!metric.is_anchor_within(&point, &neighbour, 0, SelfSquare::Exclude));
    }

    #[test]
    fn adjacency_threshold_is_configurable() {
        let metric = GridMetric::new(GridConfig::new().with_adjacency_threshold(1.0));
        let center = Anchor::Point(square(5, 5));

        assert!(metric.is_adjacent(&center, &Anchor::Point(square(5, 6))));
        assert!(!metric.is_adjacent(&center, &Anchor::Point(square(6, 6))));
    }
}
