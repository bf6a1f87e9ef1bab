use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// One play session: the config, the board once the first action lands, and the
/// seed source for every board generated in this session.
///
/// Mutating calls must be serialized by the caller; nothing here is shared.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    board: Option<Board>,
    seeds: SmallRng,
}

impl Game {
    /// Starts a session without placing mines; fails when `config` cannot fit its mines
    /// around some possible first action.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        log::debug!("New game {:?}, seed {}", config, seed);
        Ok(Self {
            config,
            board: None,
            seeds: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn summary(&self) -> Summary {
        match &self.board {
            Some(board) => board.summary(),
            None => Summary::not_started(self.config),
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        self.summary().outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_final()
    }

    /// Reveal or chord at `coords`, generating the board first when there is none.
    pub fn on_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.board_or_generate(coords)?.reveal(coords)?;
        if outcome == RevealOutcome::HitMine {
            log::info!("Mine revealed at {:?}, game lost", coords);
        } else if self.outcome() == GameOutcome::Win {
            log::info!("All safe tiles revealed, game won");
        }
        Ok(outcome)
    }

    /// Toggle the flag at `coords`; a first-action flag also generates the board.
    pub fn on_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        self.board_or_generate(coords)?.toggle_flag(coords)
    }

    /// Discards the board; the next action generates a fresh one.
    pub fn on_restart(&mut self) {
        log::debug!("Restart");
        self.board = None;
    }

    fn board_or_generate(&mut self, start: Coord2) -> Result<&mut Board> {
        let board = match self.board.take() {
            Some(board) => board,
            None => RandomBoardGenerator::new(self.seeds.random(), start).generate(self.config)?,
        };
        Ok(self.board.insert(board))
    }
}
