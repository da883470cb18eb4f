use crate::drag::{DragController, DragOutcome, PointerEvent};
use crate::error::{Result, SlideError};
use crate::layout::{BoardGeometry, Point};
use crate::puzzle::Board;
use crate::shuffle::{ShuffleMode, Shuffler};
use crate::timer::Stopwatch;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Largest board accepted; far beyond what fits on any terminal.
pub const MAX_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    pub shuffles: u32,
    pub mode: ShuffleMode,
    /// Top-left corner of the board on screen.
    pub origin: Point,
    pub tile_width: i32,
    pub tile_height: i32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 5,
            shuffles: 50,
            mode: ShuffleMode::Animated {
                interval: Duration::from_millis(15),
            },
            origin: Point::new(2, 1),
            tile_width: 6,
            tile_height: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(SlideError::InvalidSize(self.size));
        }
        if self.tile_width < 1 || self.tile_height < 1 {
            return Err(SlideError::InvalidTileSize);
        }
        let n = i32::try_from(self.size).map_err(|_| SlideError::InvalidSize(self.size))?;
        let fits = |origin: i32, tile: i32| {
            tile.checked_mul(n)
                .and_then(|extent| extent.checked_add(origin))
                .is_some()
        };
        if !fits(self.origin.x, self.tile_width) || !fits(self.origin.y, self.tile_height) {
            return Err(SlideError::InvalidTileSize);
        }
        Ok(())
    }

    /// Only meaningful for a config that passed `validate`.
    pub fn geometry(&self) -> BoardGeometry {
        let n = self.size as i32;
        BoardGeometry::new(self.size, self.origin, self.tile_width * n, self.tile_height * n)
    }
}

/// Everything one play session owns. All mutation happens on the caller's
/// thread through `handle_pointer`, `request_shuffle` and `tick`.
pub struct Game {
    board: Board,
    stopwatch: Stopwatch,
    drag: DragController,
    shuffler: Shuffler,
    rng: StdRng,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(size = config.size, shuffles = config.shuffles, "new game");
        Ok(Self {
            board: Board::new(config.size, config.geometry()),
            stopwatch: Stopwatch::new(),
            drag: DragController::new(),
            shuffler: Shuffler::new(config.mode, config.shuffles),
            rng,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn shuffler(&self) -> &Shuffler {
        &self.shuffler
    }

    pub fn moves(&self) -> u32 {
        self.board.moves()
    }

    /// The round ended with the board solved.
    pub fn is_won(&self) -> bool {
        self.stopwatch.is_stopped()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        match self.drag.handle(event, &self.board) {
            DragOutcome::Started(pos) => {
                debug!(row = pos.row, col = pos.col, "drag anchored");
                if self.stopwatch.is_idle() {
                    self.stopwatch.start(now);
                    self.board.reset_moves();
                    info!("clock started");
                }
            }
            DragOutcome::Shifted(moves) => {
                for movement in moves {
                    self.board.apply_move(movement);
                }
            }
            DragOutcome::Released => debug!("drag released"),
            DragOutcome::Ignored => {}
        }
    }

    pub fn request_shuffle(&mut self, now: Instant) -> bool {
        if !self.shuffler.request(now) {
            debug!("shuffle refused");
            return false;
        }
        info!(mode = ?self.shuffler.mode(), "shuffle started");
        // Instant shuffles complete right here.
        self.advance_shuffle(now);
        true
    }

    /// Per-frame update: one shuffle step if due, clock, win check.
    pub fn tick(&mut self, now: Instant) {
        self.advance_shuffle(now);
        self.stopwatch.tick(now);
        if self.stopwatch.is_running() && self.board.is_solved() {
            self.stopwatch.stop();
            info!(time = %self.stopwatch, moves = self.board.moves(), "board solved");
        }
    }

    fn advance_shuffle(&mut self, now: Instant) {
        if self.shuffler.step(&mut self.board, &mut self.rng, now) {
            self.stopwatch.reset();
            info!("shuffle complete");
        }
    }
}
