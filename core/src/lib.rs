pub mod action;
pub mod board;
pub mod editor;
pub mod playback;
pub mod protocol;
pub mod session;
pub mod solution;
pub mod target;

pub use action::{Command, Effect, SolveOrigin};
pub use board::{cell_symbol, BoardState, Cell, Piece, BOARD_CELLS, BOARD_COLS, PALETTE_PIECES};
pub use editor::EditorBuffer;
pub use playback::{
    speed_display_label, speed_interval_ms, Playback, DEFAULT_SPEED_MS, SPEED_SLIDER_MAX_MS,
    SPEED_SLIDER_MIN_MS,
};
pub use protocol::{
    GatewayError, GenerateResponse, SolveReply, SolveRequest, SolveResponse,
    ALREADY_AT_TARGET_MARKER,
};
pub use session::{Session, Snapshot};
pub use solution::{Solution, NO_SOLUTION_NOTICE};
pub use target::{resolve_targets, visited_targets, TargetMode};
