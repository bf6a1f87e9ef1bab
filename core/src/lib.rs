#![no_std]

extern crate alloc;

use core::ops::{BitOr, BitOrAssign};
use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board dimensions `(rows, cols)` and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (15, 30);

    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Config with one mine per ten cells, rounded down but never zero.
    pub const fn with_default_density(size: Coord2) -> Self {
        let mines = mult(size.0, size.1) / 10;
        Self::new(size, if mines == 0 { 1 } else { mines })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Fewest mine-eligible cells over every possible first action.
    pub fn mine_capacity(&self) -> CellCount {
        let (rows, cols) = self.size;
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|start| cells_outside_safe_zone(self.size, start))
            .min()
            .unwrap_or(0)
    }

    /// Checks dimensions and mine count, without looking at where the first action lands.
    pub fn check_shape(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines == 0 {
            return Err(GameError::NoMines);
        }
        Ok(())
    }

    /// Checks that a board can be generated whatever the first action is.
    ///
    /// Conservative: the capacity is taken at the worst first action, so a config that
    /// would fit around a corner start but not a centred one is rejected up front.
    pub fn validate(&self) -> Result<()> {
        self.check_shape()?;
        let capacity = self.mine_capacity();
        if self.mines > capacity {
            log::warn!(
                "Rejected config {:?}: {} mines requested, {} fit",
                self.size,
                self.mines,
                capacity
            );
            return Err(GameError::TooManyMines {
                mines: self.mines,
                capacity,
            });
        }
        Ok(())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_default_density(Self::DEFAULT_SIZE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// What a single reveal call did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

/// Used to merge outcomes when one action opens several tiles
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

impl BitOrAssign for RevealOutcome {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Valid transitions:
/// - NotStarted -> Ongoing
/// - Ongoing -> Win
/// - Ongoing -> Loss
/// - any -> NotStarted, on restart
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No board yet
    #[default]
    NotStarted,
    Ongoing,
    /// Every safe tile revealed
    Win,
    /// A mine was revealed
    Loss,
}

impl GameOutcome {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

/// Aggregate counts derived from a board after each action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Mines minus flags placed, negative when over-flagged.
    pub remaining_flags: i32,
    pub revealed_mine_count: CellCount,
    /// Total cells minus mines minus revealed tiles, floored at zero.
    pub tiles_to_go: CellCount,
    pub outcome: GameOutcome,
}

impl Summary {
    pub const fn not_started(config: GameConfig) -> Self {
        Self {
            remaining_flags: config.mines as i32,
            revealed_mine_count: 0,
            tiles_to_go: config.total_cells().saturating_sub(config.mines),
            outcome: GameOutcome::NotStarted,
        }
    }
}
