use std::collections::HashSet;

use arrayvec::ArrayVec;
use tracing::trace;

use crate::board::GameBoard;
use crate::error::CheckersError;
use crate::moves::Move;
use crate::point;
use crate::stone::Stone;
use crate::Point;

/// Diagonal candidate targets `distance` cells away from `pos`. Non-kings
/// only advance toward the opponent's side; kings get the two backward
/// diagonals as well. Candidates may be off the board, callers validate.
fn diagonal_targets(pos: Point, stone: Stone, distance: i8) -> ArrayVec<Point, 4> {
    let mut targets = ArrayVec::new();
    let forward = stone.color().forward() * distance;
    targets.push(point::add(pos, (distance, forward)));
    targets.push(point::add(pos, (-distance, forward)));
    if stone.is_king {
        targets.push(point::add(pos, (distance, -forward)));
        targets.push(point::add(pos, (-distance, -forward)));
    }
    targets
}

/// Single-step moves: each adjacent diagonal cell that is on the board and
/// empty, honoring the forward/king direction rule.
pub fn simple_moves(board: &GameBoard, stone: Stone) -> Result<HashSet<Move>, CheckersError> {
    let pos = board.locate(stone.id)?;
    let moves = diagonal_targets(pos, stone, 1)
        .into_iter()
        .filter(|&target| point::is_valid(target) && board.is_empty_at(target))
        .map(|target| Move::new(stone.id, vec![pos, target]))
        .collect();
    Ok(moves)
}

/// Landing cells of the jumps available right now from `pos`: the target
/// two cells away must be free and on the board, and the cell leapt over
/// must hold an opposing stone.
fn neighbour_jumps(board: &GameBoard, stone: Stone, pos: Point) -> Vec<Point> {
    diagonal_targets(pos, stone, 2)
        .into_iter()
        .filter(|&target| {
            if !point::is_valid(target) || !board.is_empty_at(target) {
                return false;
            }
            match board.stone_at(point::midpoint(pos, target)) {
                Some(jumped) => jumped.color() != stone.color(),
                None => false,
            }
        })
        .collect()
}

/// Every landing sequence reachable by chained jumps from `pos`, including
/// each prefix of a longer chain as its own sequence. Each branch explores
/// a private board copy with the jump already applied, so siblings never
/// observe each other's captures. Recursion is bounded: every level removes
/// one opponent stone from its hypothetical board.
fn jump_chains(board: &GameBoard, stone: Stone, pos: Point) -> Vec<Vec<Point>> {
    let mut chains = Vec::new();
    for target in neighbour_jumps(board, stone, pos) {
        trace!(?pos, ?target, "jump step");
        chains.push(vec![target]);

        let hypothetical = board.speculate(&Move::new(stone.id, vec![pos, target]));
        for rest in jump_chains(&hypothetical, stone, target) {
            let mut chain = Vec::with_capacity(1 + rest.len());
            chain.push(target);
            chain.extend(rest);
            chains.push(chain);
        }
    }
    chains
}

/// Capture moves for the stone: every jump chain discovered by recursive
/// search, composed into full paths from the stone's current cell. A chain
/// that can be extended is returned both ways; the caller decides whether
/// to force maximal captures (see [`maximal_only`]).
pub fn jump_moves(board: &GameBoard, stone: Stone) -> Result<HashSet<Move>, CheckersError> {
    let origin = board.locate(stone.id)?;
    let moves = jump_chains(board, stone, origin)
        .into_iter()
        .map(|chain| {
            let mut path = Vec::with_capacity(1 + chain.len());
            path.push(origin);
            path.extend(chain);
            Move::new(stone.id, path)
        })
        .collect();
    Ok(moves)
}

/// All legal moves for the stone: simple steps plus jump chains. Whether a
/// capture must be taken in preference to a step is the caller's policy.
pub fn legal_moves(board: &GameBoard, stone: Stone) -> Result<HashSet<Move>, CheckersError> {
    let mut moves = jump_moves(board, stone)?;
    moves.extend(simple_moves(board, stone)?);
    Ok(moves)
}

/// Caller-side policy filter: drop every move whose path is a strict prefix
/// of another move's path in the set.
pub fn maximal_only(moves: &HashSet<Move>) -> HashSet<Move> {
    moves
        .iter()
        .filter(|mv| {
            !moves.iter().any(|other| {
                other.stone() == mv.stone()
                    && other.path().len() > mv.path().len()
                    && other.path().starts_with(mv.path())
            })
        })
        .cloned()
        .collect()
}
