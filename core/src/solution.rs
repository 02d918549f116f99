use crate::board::BoardState;
use crate::protocol::SolveReply;

pub const NO_SOLUTION_NOTICE: &str = "No solution found or already solved.";

#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub path: Vec<BoardState>,
    pub move_count: usize,
    pub solve_time_ms: f64,
}

impl Solution {
    pub fn single(board: BoardState, solve_time_ms: f64) -> Self {
        Self {
            path: vec![board],
            move_count: 0,
            solve_time_ms,
        }
    }

    // Degenerate replies collapse to a one-state path over the submitted
    // board. Without the solver's already-at-target diagnostic that collapse
    // is surfaced to the user, so the second value asks for a notice.
    pub fn from_reply(submitted: &BoardState, reply: SolveReply) -> (Solution, bool) {
        if reply.moves.is_empty() {
            let solution = Solution::single(*submitted, reply.time_ms);
            (solution, !reply.already_at_target)
        } else {
            let move_count = reply.moves.len() - 1;
            let solution = Solution {
                path: reply.moves,
                move_count,
                solve_time_ms: reply.time_ms,
            };
            (solution, false)
        }
    }

    pub fn last_step(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn board_at(&self, step: usize) -> Option<&BoardState> {
        self.path.get(step)
    }
}
