use alloc::collections::{BTreeSet, VecDeque};
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of tiles for one game, with mines and adjacency fixed at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<TileState>,
    mine_count: CellCount,
}

impl Board {
    /// Builds the board and precomputes every tile's adjacent mine count.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let mut mine_count: CellCount = 0;
        let tiles = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let content = if mine_mask[(row, col)] {
                mine_count += 1;
                TileContent::Mine
            } else {
                TileContent::Empty
            };
            let adjacent_mines = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8;
            TileState {
                content,
                adjacent_mines,
                ..Default::default()
            }
        });

        Self { tiles, mine_count }
    }

    /// Board with mines at exactly `mine_coords`, duplicates collapsed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.tiles.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.tiles.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Tile at `coords`, panics when out of bounds.
    pub fn tile_at(&self, coords: Coord2) -> TileState {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self[coords].adjacent_mines
    }

    /// Row-major iteration over every tile.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (Coord2, TileState)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| ((row as Coord, col as Coord), tile))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    /// A revealed numbered tile whose flagged neighbors match its number.
    pub fn is_chordable(&self, coords: Coord2) -> bool {
        let tile = self[coords];
        tile.revealed
            && tile.adjacent_mines > 0
            && tile.adjacent_mines == self.count_flagged_neighbors(coords)
    }

    /// Toggles the flag on any tile, revealed ones included.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let tile = &mut self.tiles[coords.to_nd_index()];
        tile.flagged = !tile.flagged;
        log::debug!("Flag at {:?} set to {}", coords, tile.flagged);
        Ok(MarkOutcome::Changed)
    }

    /// Chord-clears a satisfied numbered tile, otherwise flood-fills from `coords`.
    ///
    /// A hidden flagged target is left alone; flood-fill itself walks over flags.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        let target = self[coords];
        if target.flagged && !target.revealed {
            return Ok(RevealOutcome::NoChange);
        }

        Ok(if self.is_chordable(coords) {
            self.chord(coords)
        } else {
            self.flood_fill(coords)
        })
    }

    /// Reveals every unflagged neighbor, flood-filling from the zero ones.
    fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        log::debug!("Chord at {:?}", coords);
        let mut outcome = RevealOutcome::NoChange;
        for pos in self.iter_neighbors(coords) {
            if !self[pos].flagged {
                outcome |= self.flood_fill(pos);
            }
        }
        outcome
    }

    /// Breadth-first reveal from `start`, expanding only through empty zero tiles.
    fn flood_fill(&mut self, start: Coord2) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut visited = BTreeSet::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }

            let tile = &mut self.tiles[coords.to_nd_index()];
            if !tile.revealed {
                tile.revealed = true;
                if tile.is_mine() {
                    log::debug!("Revealed mine at {:?}", coords);
                    outcome |= RevealOutcome::HitMine;
                } else {
                    log::trace!(
                        "Revealed tile at {:?}, mine count: {}",
                        coords,
                        tile.adjacent_mines
                    );
                    outcome |= RevealOutcome::Revealed;
                }
            }

            if !tile.is_zero() {
                continue;
            }

            for pos in self.tiles.iter_neighbors(coords) {
                if !self.tiles[pos.to_nd_index()].is_mine() && !visited.contains(&pos) {
                    to_visit.push_back(pos);
                }
            }
        }

        outcome
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].flagged)
            .count() as u8
    }

    /// Derives flag, mine, and outcome counts; never mutates.
    pub fn summary(&self) -> Summary {
        let mut flagged: CellCount = 0;
        let mut revealed_safe: CellCount = 0;
        let mut revealed_mines: CellCount = 0;

        for tile in self.tiles.iter() {
            if tile.flagged {
                flagged += 1;
            }
            match (tile.revealed, tile.content) {
                (true, TileContent::Mine) => revealed_mines += 1,
                (true, TileContent::Empty) => revealed_safe += 1,
                (false, _) => {}
            }
        }

        let tiles_to_go = self
            .safe_cell_count()
            .saturating_sub(revealed_safe + revealed_mines);
        let outcome = if revealed_mines > 0 {
            GameOutcome::Loss
        } else if tiles_to_go == 0 {
            GameOutcome::Win
        } else {
            GameOutcome::Ongoing
        };

        Summary {
            remaining_flags: i32::from(self.mine_count) - i32::from(flagged),
            revealed_mine_count: revealed_mines,
            tiles_to_go,
            outcome,
        }
    }
}

impl Index<Coord2> for Board {
    type Output = TileState;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}
