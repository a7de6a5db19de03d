use std::fmt;

use crate::stone::StoneId;
use crate::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckersError {
    InvalidStoneId(i8),
    StoneNotFound(StoneId),
    OutOfBounds(Point),
    IllegalMove,
    MalformedBoard(&'static str),
}

impl fmt::Display for CheckersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckersError::InvalidStoneId(id) => write!(f, "no stone has id {id}"),
            CheckersError::StoneNotFound(id) => write!(f, "stone {id} is not on the board"),
            CheckersError::OutOfBounds((col, row)) => {
                write!(f, "position ({col}, {row}) is off the board")
            }
            CheckersError::IllegalMove => write!(f, "move is not legal on this board"),
            CheckersError::MalformedBoard(reason) => write!(f, "malformed board: {reason}"),
        }
    }
}

impl std::error::Error for CheckersError {}
