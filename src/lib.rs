pub mod board;
pub mod error;
pub mod movegen;
pub mod moves;
pub mod point;
pub mod service;
pub mod stone;

/// A board coordinate as `(column, row)`. Signed so that candidate-target
/// arithmetic may step off the board before validation.
pub type Point = (i8, i8);

pub use board::GameBoard;
pub use error::CheckersError;
pub use moves::Move;
pub use stone::{Color, Stone, StoneId};
