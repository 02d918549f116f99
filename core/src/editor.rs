use crate::board::{BoardState, Cell, Piece, BOARD_CELLS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorBuffer {
    pub board: BoardState,
    pub selected: Cell,
}

impl EditorBuffer {
    // The buffer is a copy of the board on display at entry; it never
    // aliases a solution step.
    pub fn enter(initial: BoardState) -> Self {
        Self {
            board: initial,
            selected: Some(Piece::Queen),
        }
    }

    pub fn set_cell(&mut self, position: usize) -> bool {
        if position >= BOARD_CELLS {
            return false;
        }
        self.board.set_cell(position, self.selected);
        true
    }

    pub fn clear(&mut self) {
        self.board = BoardState::empty();
    }

    pub fn select(&mut self, cell: Cell) {
        self.selected = cell;
    }
}
