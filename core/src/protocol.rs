use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::BoardState;

// Fixed phrase the solver prints when the queen already sits on a target;
// the diagnostic text is the only channel that condition arrives on.
pub const ALREADY_AT_TARGET_MARKER: &str = "Queen is already at target";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("{0}")]
    Solver(String),
    #[error("request failed: {0}")]
    Transport(String),
}

#[derive(Clone, Debug, Serialize)]
pub struct SolveRequest {
    pub board: BoardState,
    pub targets: Vec<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub board: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn into_board(self) -> Result<BoardState, GatewayError> {
        if let Some(error) = self.error {
            return Err(GatewayError::Solver(error));
        }
        match self.board {
            Some(board) => Ok(BoardState::parse(&board)),
            None => Err(GatewayError::Solver("no board in response".to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SolveResponse {
    #[serde(default)]
    pub moves: Option<Vec<String>>,
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub raw_output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolveReply {
    pub moves: Vec<BoardState>,
    pub time_ms: f64,
    pub already_at_target: bool,
}

impl SolveResponse {
    pub fn into_reply(self) -> Result<SolveReply, GatewayError> {
        if let Some(error) = self.error {
            return Err(GatewayError::Solver(error));
        }
        let already_at_target = self
            .raw_output
            .as_deref()
            .is_some_and(|raw| raw.contains(ALREADY_AT_TARGET_MARKER));
        let moves = self
            .moves
            .unwrap_or_default()
            .iter()
            .map(|text| BoardState::parse(text))
            .collect();
        Ok(SolveReply {
            moves,
            time_ms: self.time.unwrap_or(0.0),
            already_at_target,
        })
    }
}
