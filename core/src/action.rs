use crate::board::{BoardState, Cell};
use crate::protocol::{GatewayError, SolveReply};
use crate::target::TargetMode;

// Where a solve was submitted from. A solve of a user board leaves edit mode
// on success; the generate chain loads its solution without touching an
// editor the user may have opened in the meantime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveOrigin {
    UserBoard,
    Generated,
}

#[derive(Clone, Debug)]
pub enum Command {
    Next,
    Previous,
    GoTo(usize),
    GoToFirst,
    GoToLast,
    TogglePlay,
    Tick,
    SetSpeed {
        position: u32,
    },
    EnterEdit,
    ExitEdit,
    ToggleEdit,
    SetCell {
        position: usize,
    },
    ClearBoard,
    SelectPiece(Cell),
    SetTargetMode(TargetMode),
    SetCustomTargets(String),
    RequestGenerate,
    RequestSolve,
    GenerateFinished(Result<BoardState, GatewayError>),
    SolveFinished {
        origin: SolveOrigin,
        submitted: BoardState,
        result: Result<SolveReply, GatewayError>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Render,
    StartTicker {
        interval_ms: u32,
    },
    StopTicker,
    Generate,
    Solve {
        board: BoardState,
        targets: Vec<usize>,
        origin: SolveOrigin,
    },
    Notice {
        message: String,
    },
}
