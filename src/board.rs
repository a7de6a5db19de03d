use std::collections::HashSet;

use tracing::debug;

use crate::error::CheckersError;
use crate::movegen;
use crate::moves::Move;
use crate::point;
use crate::stone::{Stone, StoneId, BLACK_IDS, RED_IDS};
use crate::Point;

/// Cell value for an unoccupied square.
pub const EMPTY: i8 = -1;

const SIZE: usize = point::BOARD_SIZE as usize;

/// The checkers board: 8 columns of 8 rows, indexed `grid[col][row]` like
/// the wire format, plus the set of promoted stones. `Clone` is a full deep
/// copy (fixed-size grid, owned king set), which is what lets the capture
/// search speculate on copies without ever touching the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    grid: [[i8; SIZE]; SIZE],
    kings: HashSet<StoneId>,
}

impl GameBoard {
    /// The standard 24-stone opening: stones on alternating squares, Black
    /// ids filling rows 0..3 column by column, Red ids rows 5..8.
    pub fn new() -> Self {
        let mut grid = [[EMPTY; SIZE]; SIZE];

        let mut black = BLACK_IDS.start;
        for col in 0..SIZE {
            for row in 0..3 {
                if (col + row) % 2 == 0 {
                    grid[col][row] = black as i8;
                    black += 1;
                }
            }
        }

        let mut red = RED_IDS.start;
        for col in 0..SIZE {
            for row in (5..SIZE).rev() {
                if (col + row) % 2 == 0 {
                    grid[col][row] = red as i8;
                    red += 1;
                }
            }
        }

        GameBoard {
            grid,
            kings: HashSet::new(),
        }
    }

    /// Build a board from a column-major grid, with no promoted stones.
    pub fn from_grid(columns: Vec<Vec<i8>>) -> Result<Self, CheckersError> {
        Self::from_state(columns, HashSet::new())
    }

    /// Restore a board from a column-major grid and an explicit king set.
    /// Validates shape, cell values and id uniqueness; this is the one place
    /// untrusted grids enter the engine.
    pub fn from_state(
        columns: Vec<Vec<i8>>,
        kings: HashSet<StoneId>,
    ) -> Result<Self, CheckersError> {
        if columns.len() != SIZE || columns.iter().any(|col| col.len() != SIZE) {
            return Err(CheckersError::MalformedBoard("expected an 8x8 grid"));
        }

        let mut grid = [[EMPTY; SIZE]; SIZE];
        let mut seen = HashSet::new();
        for (c, column) in columns.iter().enumerate() {
            for (r, &cell) in column.iter().enumerate() {
                if cell == EMPTY {
                    continue;
                }
                let id = StoneId::new(cell)?;
                if !seen.insert(id) {
                    return Err(CheckersError::MalformedBoard("duplicate stone id"));
                }
                grid[c][r] = cell;
            }
        }

        Ok(GameBoard { grid, kings })
    }

    /// The board in its wire shape: 8 columns of 8 rows.
    pub fn to_grid(&self) -> Vec<Vec<i8>> {
        self.grid.iter().map(|col| col.to_vec()).collect()
    }

    // -- Queries --

    pub fn kings(&self) -> &HashSet<StoneId> {
        &self.kings
    }

    pub fn is_king(&self, id: StoneId) -> bool {
        self.kings.contains(&id)
    }

    /// Whether the cell is unoccupied. The position must already have passed
    /// `point::is_valid`; out-of-range coordinates are a contract violation.
    pub fn is_empty_at(&self, pos: Point) -> bool {
        self.cell(pos) == EMPTY
    }

    /// The occupant of a cell, `None` when empty or off the board.
    pub fn stone_at(&self, pos: Point) -> Option<StoneId> {
        if !point::is_valid(pos) {
            return None;
        }
        let cell = self.cell(pos);
        if cell == EMPTY {
            None
        } else {
            StoneId::new(cell).ok()
        }
    }

    /// Linear scan for the cell holding `id`. A stone may legitimately be
    /// absent (captured earlier in a speculative chain), so absence is a
    /// recoverable error rather than a panic.
    pub fn locate(&self, id: StoneId) -> Result<Point, CheckersError> {
        for col in 0..SIZE {
            for row in 0..SIZE {
                if self.grid[col][row] == id.cell() {
                    return Ok((col as i8, row as i8));
                }
            }
        }
        Err(CheckersError::StoneNotFound(id))
    }

    // -- Mutation --

    /// Apply a move: transfer the stone along its path, remove every jumped
    /// stone, and promote on reaching the back rank. The move is checked
    /// against the generator first; an unknown move leaves the board
    /// untouched and fails with `IllegalMove`.
    pub fn apply_move(&mut self, mv: &Move) -> Result<(), CheckersError> {
        let stone = Stone::new(mv.stone(), self.is_king(mv.stone()));
        let legal = movegen::legal_moves(self, stone)?;
        if !legal.contains(mv) {
            return Err(CheckersError::IllegalMove);
        }
        self.apply_unchecked(mv);
        if !stone.is_king && self.is_king(stone.id) {
            debug!(stone = stone.id.raw(), "promoted to king");
        }
        Ok(())
    }

    /// Non-destructive variant: validate and apply on a copy, leaving `self`
    /// untouched.
    pub fn copy_and_apply(&self, mv: &Move) -> Result<GameBoard, CheckersError> {
        let mut copy = self.clone();
        copy.apply_move(mv)?;
        Ok(copy)
    }

    /// Speculative copy for the capture search: the jump being explored is
    /// legal by construction, so no legality check is repeated here.
    pub(crate) fn speculate(&self, mv: &Move) -> GameBoard {
        let mut copy = self.clone();
        copy.apply_unchecked(mv);
        copy
    }

    fn apply_unchecked(&mut self, mv: &Move) {
        self.transfer(mv.origin(), mv.target());
        for pos in mv.captured_cells() {
            self.clear(pos);
        }
        if !self.kings.contains(&mv.stone()) && mv.reaches_back_rank() {
            self.kings.insert(mv.stone());
        }
    }

    fn transfer(&mut self, from: Point, to: Point) {
        self.grid[to.0 as usize][to.1 as usize] = self.cell(from);
        self.clear(from);
    }

    fn clear(&mut self, pos: Point) {
        self.grid[pos.0 as usize][pos.1 as usize] = EMPTY;
    }

    fn cell(&self, pos: Point) -> i8 {
        self.grid[pos.0 as usize][pos.1 as usize]
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i8) -> StoneId {
        StoneId::new(raw).unwrap()
    }

    /// Test helper: an otherwise empty board with the given stones placed.
    fn board_with(stones: &[(i8, Point)]) -> GameBoard {
        let mut columns = vec![vec![EMPTY; 8]; 8];
        for &(raw, (col, row)) in stones {
            columns[col as usize][row as usize] = raw;
        }
        GameBoard::from_grid(columns).unwrap()
    }

    #[test]
    fn opening_layout() {
        let board = GameBoard::new();
        let mut count = 0;
        for col in 0..8 {
            for row in 0..8 {
                if board.stone_at((col, row)).is_some() {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 24);
        assert_eq!(board.stone_at((0, 0)), Some(id(0)));
        assert_eq!(board.stone_at((0, 2)), Some(id(1)));
        assert_eq!(board.stone_at((1, 1)), Some(id(2)));
        assert_eq!(board.stone_at((0, 6)), Some(id(12)));
        assert_eq!(board.stone_at((1, 7)), Some(id(13)));
        assert_eq!(board.stone_at((1, 5)), Some(id(14)));
        assert!(board.kings().is_empty());
        // Rows 3 and 4 start empty.
        for col in 0..8 {
            assert!(board.is_empty_at((col, 3)));
            assert!(board.is_empty_at((col, 4)));
        }
    }

    #[test]
    fn rejects_wrong_shape() {
        let result = GameBoard::from_grid(vec![vec![EMPTY; 8]; 7]);
        assert_eq!(result, Err(CheckersError::MalformedBoard("expected an 8x8 grid")));

        let mut columns = vec![vec![EMPTY; 8]; 8];
        columns[3] = vec![EMPTY; 9];
        let result = GameBoard::from_grid(columns);
        assert_eq!(result, Err(CheckersError::MalformedBoard("expected an 8x8 grid")));
    }

    #[test]
    fn rejects_unknown_cell_values() {
        let mut columns = vec![vec![EMPTY; 8]; 8];
        columns[0][0] = 24;
        assert_eq!(
            GameBoard::from_grid(columns),
            Err(CheckersError::InvalidStoneId(24))
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut columns = vec![vec![EMPTY; 8]; 8];
        columns[0][0] = 5;
        columns[4][4] = 5;
        assert_eq!(
            GameBoard::from_grid(columns),
            Err(CheckersError::MalformedBoard("duplicate stone id"))
        );
    }

    #[test]
    fn locates_stones() {
        let board = board_with(&[(4, (2, 2)), (15, (3, 3))]);
        assert_eq!(board.locate(id(4)), Ok((2, 2)));
        assert_eq!(board.locate(id(15)), Ok((3, 3)));
        assert_eq!(board.locate(id(7)), Err(CheckersError::StoneNotFound(id(7))));
    }

    #[test]
    fn simple_move_only_vacates_the_origin() {
        let mut board = board_with(&[(4, (2, 2)), (15, (5, 5))]);
        let before = board.clone();
        board.apply_move(&Move::new(id(4), vec![(2, 2), (3, 3)])).unwrap();

        assert_eq!(board.stone_at((2, 2)), None);
        assert_eq!(board.stone_at((3, 3)), Some(id(4)));
        assert_eq!(board.stone_at((5, 5)), Some(id(15)));
        assert!(board.kings().is_empty());
        assert_eq!(before.stone_at((2, 2)), Some(id(4)));
    }

    #[test]
    fn jump_removes_exactly_the_midpoints() {
        let mut board = board_with(&[(4, (2, 2)), (15, (3, 3)), (16, (5, 1))]);
        board.apply_move(&Move::new(id(4), vec![(2, 2), (4, 4)])).unwrap();

        assert_eq!(board.stone_at((4, 4)), Some(id(4)));
        assert_eq!(board.stone_at((3, 3)), None);
        assert_eq!(board.stone_at((2, 2)), None);
        // A bystander stone survives.
        assert_eq!(board.stone_at((5, 1)), Some(id(16)));
    }

    #[test]
    fn rejects_moves_the_generator_would_not_produce() {
        let mut board = board_with(&[(4, (2, 2))]);
        let before = board.clone();

        // Backward step for a non-king.
        let result = board.apply_move(&Move::new(id(4), vec![(2, 2), (1, 1)]));
        assert_eq!(result, Err(CheckersError::IllegalMove));
        // Jump with no stone to capture.
        let result = board.apply_move(&Move::new(id(4), vec![(2, 2), (4, 4)]));
        assert_eq!(result, Err(CheckersError::IllegalMove));

        assert_eq!(board, before);
    }

    #[test]
    fn apply_fails_for_absent_stone() {
        let mut board = board_with(&[(4, (2, 2))]);
        let result = board.apply_move(&Move::new(id(9), vec![(1, 1), (2, 2)]));
        assert_eq!(result, Err(CheckersError::StoneNotFound(id(9))));
    }

    #[test]
    fn promotes_on_reaching_the_back_rank() {
        let mut board = board_with(&[(4, (1, 6))]);
        board.apply_move(&Move::new(id(4), vec![(1, 6), (2, 7)])).unwrap();
        assert!(board.is_king(id(4)));
    }

    #[test]
    fn promotion_is_idempotent() {
        let columns = board_with(&[(4, (1, 6))]).to_grid();
        let mut board = GameBoard::from_state(columns, HashSet::from([id(4)])).unwrap();

        board.apply_move(&Move::new(id(4), vec![(1, 6), (2, 7)])).unwrap();
        assert!(board.is_king(id(4)));
        assert_eq!(board.kings().len(), 1);
    }

    #[test]
    fn copy_and_apply_leaves_the_original_untouched() {
        let board = board_with(&[(4, (2, 2)), (15, (3, 3))]);
        let snapshot = board.clone();

        let next = board.copy_and_apply(&Move::new(id(4), vec![(2, 2), (4, 4)])).unwrap();

        assert_eq!(board, snapshot);
        assert_eq!(next.stone_at((4, 4)), Some(id(4)));
        assert_eq!(next.stone_at((3, 3)), None);
    }

    #[test]
    fn clones_share_no_state() {
        let original = board_with(&[(4, (2, 2))]);
        let mut copy = original.clone();
        copy.apply_move(&Move::new(id(4), vec![(2, 2), (3, 3)])).unwrap();

        assert_eq!(original.stone_at((2, 2)), Some(id(4)));
        assert_eq!(copy.stone_at((2, 2)), None);
    }

    #[test]
    fn grid_round_trips() {
        let board = GameBoard::new();
        let rebuilt = GameBoard::from_grid(board.to_grid()).unwrap();
        assert_eq!(board, rebuilt);
    }
}
