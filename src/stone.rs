use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::ops::Range;

use crate::error::CheckersError;

/// Ids 0..12 are Black, 12..24 are Red. Color is derived from the id alone.
pub const BLACK_IDS: Range<u8> = 0..12;
pub const RED_IDS: Range<u8> = 12..24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
}

impl Color {
    pub fn opp(self) -> Self {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Color::Black => "B",
            Color::Red => "R",
        }
    }

    /// Row direction of advance for a non-king stone.
    pub fn forward(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::Red => -1,
        }
    }

    /// The promotion row: the far rank from this color's starting side.
    pub fn back_rank(self) -> i8 {
        match self {
            Color::Black => 7,
            Color::Red => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::Red => write!(f, "Red"),
        }
    }
}

/// A stone identifier, unique for the lifetime of a game. Only values in
/// the two color ranges construct; `color()` is total after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoneId(u8);

impl StoneId {
    pub fn new(raw: i8) -> Result<Self, CheckersError> {
        if raw >= 0 && (raw as u8) < RED_IDS.end {
            Ok(StoneId(raw as u8))
        } else {
            Err(CheckersError::InvalidStoneId(raw))
        }
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    /// The id as a board cell value.
    pub fn cell(self) -> i8 {
        self.0 as i8
    }

    pub fn color(self) -> Color {
        if BLACK_IDS.contains(&self.0) {
            Color::Black
        } else {
            Color::Red
        }
    }
}

impl fmt::Display for StoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stone as the move generator sees it: identity plus king status.
/// King status is fixed for the duration of one generation call; promotion
/// only takes effect when a move is applied to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stone {
    pub id: StoneId,
    pub is_king: bool,
}

impl Stone {
    pub fn new(id: StoneId, is_king: bool) -> Self {
        Stone { id, is_king }
    }

    pub fn color(&self) -> Color {
        self.id.color()
    }
}
