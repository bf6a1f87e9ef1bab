use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniformly random placement that keeps every cell within [`SAFE_RADIUS`] of the first
/// action free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    start: Coord2,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        config.check_shape()?;
        let start = config.validate_coords(self.start)?;
        let mines = usize::from(config.mines);

        let (rows, cols) = config.size;
        let mut candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| !in_safe_zone(coords, start))
            .collect();

        if candidates.len() < mines {
            log::warn!(
                "Cannot keep start {:?} safe, requested {} mines but only {} cells are eligible",
                start,
                config.mines,
                candidates.len()
            );
            return Err(GameError::TooManyMines {
                mines: config.mines,
                capacity: candidates.len() as CellCount,
            });
        }

        // partial Fisher-Yates: the first `mines` slots end up as a uniform sample
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..mines {
            let pick = rng.random_range(i..candidates.len());
            candidates.swap(i, pick);
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for &coords in &candidates[..mines] {
            mine_mask[coords.to_nd_index()] = true;
        }

        let board = Board::from_mine_mask(&mine_mask);
        log::debug!(
            "Generated {:?} board with {} mines, safe start at {:?}",
            config.size,
            board.mine_count(),
            start
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64, config: GameConfig, start: Coord2) -> Board {
        RandomBoardGenerator::new(seed, start).generate(config).unwrap()
    }

    #[test]
    fn places_exact_mine_count_outside_safe_zone() {
        let config = GameConfig::new((9, 9), 10);
        for seed in 0..64 {
            let start = ((seed % 9) as Coord, (seed * 7 % 9) as Coord);
            let board = generate(seed, config, start);

            let mines: Vec<_> = board
                .iter_tiles()
                .filter(|(_, tile)| tile.is_mine())
                .map(|(coords, _)| coords)
                .collect();
            assert_eq!(mines.len(), 10);
            assert_eq!(board.mine_count(), 10);
            assert!(mines.iter().all(|&coords| manhattan_distance(coords, start) > 2));
        }
    }

    #[test]
    fn adjacency_matches_layout_for_every_cell() {
        for (seed, size, mines) in [(1, (16, 30), 99), (2, (1, 12), 4), (3, (12, 1), 5)] {
            let board = generate(seed, GameConfig::new(size, mines), (0, 0));
            for (coords, tile) in board.iter_tiles() {
                let expected = board
                    .iter_neighbors(coords)
                    .filter(|&pos| board.contains_mine(pos))
                    .count();
                assert_eq!(usize::from(tile.adjacent_mines), expected, "at {:?}", coords);
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::default();
        assert_eq!(
            generate(42, config, (7, 15)),
            generate(42, config, (7, 15))
        );
        assert_ne!(
            generate(42, config, (7, 15)),
            generate(43, config, (7, 15))
        );
    }

    #[test]
    fn fills_every_eligible_cell_when_asked() {
        // 5x5 with a centred start leaves exactly 12 eligible cells
        let board = generate(7, GameConfig::new((5, 5), 12), (2, 2));
        for (coords, tile) in board.iter_tiles() {
            assert_eq!(tile.is_mine(), !in_safe_zone(coords, (2, 2)));
        }
    }

    #[test]
    fn rejects_layouts_that_cannot_fit() {
        let result = RandomBoardGenerator::new(0, (2, 2)).generate(GameConfig::new((5, 5), 13));
        assert_eq!(
            result,
            Err(GameError::TooManyMines {
                mines: 13,
                capacity: 12
            })
        );
    }

    #[test]
    fn rejects_start_outside_board() {
        let result = RandomBoardGenerator::new(0, (5, 0)).generate(GameConfig::new((5, 5), 3));
        assert_eq!(result, Err(GameError::InvalidCoords));
    }
}
