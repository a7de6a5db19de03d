use std::collections::HashSet;

use crate::point;
use crate::stone::StoneId;
use crate::Point;

/// A stone's path across the board. `path[0]` is the origin, `path[last]`
/// the final landing cell; a jump chain lists every intermediate landing.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    stone: StoneId,
    path: Vec<Point>,
}

impl Move {
    pub fn new(stone: StoneId, path: Vec<Point>) -> Self {
        assert!(path.len() >= 2, "move path needs an origin and a destination");
        Move { stone, path }
    }

    pub fn stone(&self) -> StoneId {
        self.stone
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn origin(&self) -> Point {
        self.path[0]
    }

    pub fn target(&self) -> Point {
        self.path[self.path.len() - 1]
    }

    /// True iff the first step spans two cells diagonally instead of one.
    pub fn is_jump(&self) -> bool {
        (self.path[1].0 - self.path[0].0).abs() >= 2
    }

    /// The cells leapt over: one midpoint per consecutive pair of path
    /// positions. Empty for a plain step. Midpoints along a valid chain are
    /// disjoint, so recomputing them against the pre-move board is exact.
    pub fn captured_cells(&self) -> HashSet<Point> {
        let mut cells = HashSet::new();
        if self.is_jump() {
            for pair in self.path.windows(2) {
                cells.insert(point::midpoint(pair[0], pair[1]));
            }
        }
        cells
    }

    /// Whether any path position touches the promotion row for the stone's
    /// color: row 7 for Black, row 0 for Red.
    pub fn reaches_back_rank(&self) -> bool {
        let rank = self.stone.color().back_rank();
        self.path.iter().any(|&(_, row)| row == rank)
    }
}
