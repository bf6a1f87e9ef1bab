use serde::{Deserialize, Serialize};

/// What a tile holds, fixed once the board is generated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileContent {
    #[default]
    Empty,
    Mine,
}

/// Per-cell record of content, player marks, and the precomputed neighbor count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    pub content: TileContent,
    pub flagged: bool,
    pub revealed: bool,
    pub adjacent_mines: u8,
}

impl TileState {
    pub const fn is_mine(self) -> bool {
        matches!(self.content, TileContent::Mine)
    }

    /// Empty tile with no adjacent mines, the only kind flood-fill expands from.
    pub const fn is_zero(self) -> bool {
        matches!(self.content, TileContent::Empty) && self.adjacent_mines == 0
    }
}
