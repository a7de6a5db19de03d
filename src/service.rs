use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::GameBoard;
use crate::error::CheckersError;
use crate::movegen;
use crate::moves::Move;
use crate::point;
use crate::stone::{Stone, StoneId};
use crate::Point;

/// The stone selector carried by both request kinds: a raw id plus the
/// caller's king flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StonePayload {
    pub id: i8,
    #[serde(rename = "isKing")]
    pub is_king: bool,
}

/// Request body for listing a stone's legal moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovesRequest {
    pub board: Vec<Vec<i8>>,
    pub stone: StonePayload,
}

/// Request body for applying a chosen move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub board: Vec<Vec<i8>>,
    pub stone: StonePayload,
    #[serde(rename = "move")]
    pub path: Vec<Point>,
}

/// One legal move on the wire: the owning stone and its ordered path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub stone: u8,
    pub path: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovesResponse {
    pub moves: Vec<MoveRecord>,
}

/// The updated board after a move, with the resulting king set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardResponse {
    pub board: Vec<Vec<i8>>,
    pub kings: Vec<u8>,
}

/// Validate the untrusted parts of a request: the grid and the stone id.
/// The king flag seeds the restored board's king set.
fn decode(
    columns: Vec<Vec<i8>>,
    stone: StonePayload,
) -> Result<(GameBoard, Stone), CheckersError> {
    let id = StoneId::new(stone.id)?;
    let mut kings = HashSet::new();
    if stone.is_king {
        kings.insert(id);
    }
    let board = GameBoard::from_state(columns, kings)?;
    Ok((board, Stone::new(id, stone.is_king)))
}

/// List every legal move for the requested stone. Stateless: the whole
/// position arrives with the request.
pub fn list_moves(request: MovesRequest) -> Result<MovesResponse, CheckersError> {
    let (board, stone) = decode(request.board, request.stone)?;
    let moves = movegen::legal_moves(&board, stone)?;

    let mut records: Vec<MoveRecord> = moves
        .into_iter()
        .map(|mv| MoveRecord {
            stone: mv.stone().raw(),
            path: mv.path().to_vec(),
        })
        .collect();
    records.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(stone = stone.id.raw(), count = records.len(), "listed moves");
    Ok(MovesResponse { moves: records })
}

/// Apply a chosen move to the supplied board and return the updated board.
/// The path is validated here, and the move itself is checked against the
/// generator before any state changes.
pub fn apply_move(request: ApplyRequest) -> Result<BoardResponse, CheckersError> {
    let (mut board, stone) = decode(request.board, request.stone)?;

    if request.path.len() < 2 {
        return Err(CheckersError::IllegalMove);
    }
    for &pos in &request.path {
        if !point::is_valid(pos) {
            return Err(CheckersError::OutOfBounds(pos));
        }
    }

    board.apply_move(&Move::new(stone.id, request.path))?;
    debug!(stone = stone.id.raw(), "applied move");

    let mut kings: Vec<u8> = board.kings().iter().map(|k| k.raw()).collect();
    kings.sort_unstable();
    Ok(BoardResponse {
        board: board.to_grid(),
        kings,
    })
}

// -- JSON-string entry points for embedders --

/// Decode a JSON `MovesRequest`, list moves, encode the response.
/// On failure: `{"error":"message"}`.
pub fn list_moves_json(body: &str) -> String {
    let request: MovesRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return error_json(&e.to_string()),
    };
    match list_moves(request) {
        Ok(response) => {
            serde_json::to_string(&response).unwrap_or_else(|e| error_json(&e.to_string()))
        }
        Err(e) => error_json(&e.to_string()),
    }
}

/// Decode a JSON `ApplyRequest`, apply the move, encode the updated board.
/// On failure: `{"error":"message"}`.
pub fn apply_move_json(body: &str) -> String {
    let request: ApplyRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return error_json(&e.to_string()),
    };
    match apply_move(request) {
        Ok(response) => {
            serde_json::to_string(&response).unwrap_or_else(|e| error_json(&e.to_string()))
        }
        Err(e) => error_json(&e.to_string()),
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
