use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

pub const BOARD_CELLS: usize = 16;
pub const BOARD_COLS: usize = 4;

pub const EMPTY_SYMBOL: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Queen,
    King,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

pub const PALETTE_PIECES: [Piece; 6] = [
    Piece::Queen,
    Piece::King,
    Piece::Rook,
    Piece::Bishop,
    Piece::Knight,
    Piece::Pawn,
];

impl Piece {
    pub fn symbol(self) -> char {
        match self {
            Piece::Queen => 'Q',
            Piece::King => 'K',
            Piece::Rook => 'R',
            Piece::Bishop => 'B',
            Piece::Knight => 'N',
            Piece::Pawn => 'P',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        match symbol {
            'Q' => Some(Piece::Queen),
            'K' => Some(Piece::King),
            'R' => Some(Piece::Rook),
            'B' => Some(Piece::Bishop),
            'N' => Some(Piece::Knight),
            'P' => Some(Piece::Pawn),
            _ => None,
        }
    }
}

pub type Cell = Option<Piece>;

pub fn cell_symbol(cell: Cell) -> char {
    cell.map(Piece::symbol).unwrap_or(EMPTY_SYMBOL)
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [Cell; BOARD_CELLS],
}

impl BoardState {
    pub fn empty() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    // Short input pads with empty cells, long input truncates. The solver
    // marks cleared cells with 'x'; that and any unknown symbol read as empty.
    pub fn parse(text: &str) -> Self {
        let mut cells = [None; BOARD_CELLS];
        for (index, symbol) in text.chars().take(BOARD_CELLS).enumerate() {
            cells[index] = Piece::from_symbol(symbol);
        }
        Self { cells }
    }

    pub fn encode(&self) -> String {
        self.cells.iter().map(|cell| cell_symbol(*cell)).collect()
    }

    pub fn cell(&self, position: usize) -> Cell {
        self.cells.get(position).copied().flatten()
    }

    pub fn set_cell(&mut self, position: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(position) {
            *slot = cell;
        }
    }

    pub fn queen_index(&self) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| *cell == Some(Piece::Queen))
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardState({:?})", self.encode())
    }
}

impl Serialize for BoardState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for BoardState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(BoardState::parse(&text))
    }
}
