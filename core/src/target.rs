use std::collections::BTreeSet;

use crate::board::BoardState;

pub const CORNER_TARGETS: [usize; 2] = [0, 15];
pub const ALL_CORNER_TARGETS: [usize; 4] = [0, 3, 12, 15];
pub const PERIMETER_TARGETS: [usize; 12] = [0, 1, 2, 3, 4, 7, 8, 11, 12, 13, 14, 15];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetMode {
    Corners,
    AllCorners,
    Perimeter,
    Custom,
}

impl TargetMode {
    pub fn key(self) -> &'static str {
        match self {
            TargetMode::Corners => "corners",
            TargetMode::AllCorners => "all_corners",
            TargetMode::Perimeter => "perimeter",
            TargetMode::Custom => "custom",
        }
    }

    pub fn from_key(key: &str) -> Option<TargetMode> {
        match key {
            "corners" => Some(TargetMode::Corners),
            "all_corners" => Some(TargetMode::AllCorners),
            "perimeter" => Some(TargetMode::Perimeter),
            "custom" => Some(TargetMode::Custom),
            _ => None,
        }
    }
}

// Resolved fresh on every call; the mode or the raw text may have changed
// since the last one.
pub fn resolve_targets(mode: TargetMode, custom_text: &str) -> BTreeSet<usize> {
    match mode {
        TargetMode::Corners => CORNER_TARGETS.iter().copied().collect(),
        TargetMode::AllCorners => ALL_CORNER_TARGETS.iter().copied().collect(),
        TargetMode::Perimeter => PERIMETER_TARGETS.iter().copied().collect(),
        TargetMode::Custom => custom_text
            .split(',')
            .filter_map(|token| token.trim().parse::<usize>().ok())
            .collect(),
    }
}

pub fn visited_targets(
    path: &[BoardState],
    upto_step: usize,
    targets: &BTreeSet<usize>,
) -> BTreeSet<usize> {
    let mut visited = BTreeSet::new();
    for board in path.iter().take(upto_step.saturating_add(1)) {
        if let Some(index) = board.queen_index() {
            if targets.contains(&index) {
                visited.insert(index);
            }
        }
    }
    visited
}
