//! Core game state and the spawn/turn cycle

use crate::board::{Grid, LockedMap};
use crate::piece::Piece;
use crate::score::Score;
use crate::spawner::Spawner;
use std::time::{Duration, Instant};

/// Time between gravity steps
const GRAVITY_INTERVAL: Duration = Duration::from_millis(500);

/// Phases of the spawn/turn cycle
///
/// Falling is the steady state. Locking and Spawning both resolve within the
/// tick that entered them, so between ticks the game is either Falling or
/// GameOver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// An active piece exists and is being controlled
    Falling,
    /// Landing detected; lock, clear lines, update score, check top-out
    Locking,
    /// Promote the next piece and draw a fresh one
    Spawning,
    /// Terminal: the stack reached the spawn zone
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Quit,
}

/// The main game struct
pub struct Game {
    /// Settled cells, the authoritative state
    pub locked: LockedMap,
    /// Dense snapshot of the locked map, rebuilt every tick
    pub grid: Grid,
    /// Current falling piece
    pub current: Piece,
    /// Next piece, shown in the preview
    pub next: Piece,
    /// Random piece source
    spawner: Spawner,
    /// Score tracking
    pub score: Score,
    /// Current phase of the turn cycle
    pub phase: Phase,
    /// Last gravity step
    last_fall: Instant,
}

impl Game {
    /// Create a new game with a randomly seeded spawner
    pub fn new() -> Self {
        Self::with_spawner(Spawner::new())
    }

    /// Create a new game with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_spawner(Spawner::with_seed(seed))
    }

    fn with_spawner(mut spawner: Spawner) -> Self {
        let current = spawner.next_piece();
        let next = spawner.next_piece();
        Self {
            locked: LockedMap::new(),
            grid: Grid::default(),
            current,
            next,
            spawner,
            score: Score::new(),
            phase: Phase::Falling,
            last_fall: Instant::now(),
        }
    }

    /// Whether the session has ended
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Process a player action against the current grid snapshot
    ///
    /// A rejected move or rotation is a game-rule outcome, not an error; the
    /// piece is left exactly as it was.
    pub fn process_action(&mut self, action: Action) {
        if self.phase != Phase::Falling {
            return;
        }
        match action {
            Action::MoveLeft => {
                self.current.try_move(-1, 0, &self.grid);
            }
            Action::MoveRight => {
                self.current.try_move(1, 0, &self.grid);
            }
            Action::SoftDrop => {
                if self.current.try_move(0, 1, &self.grid) {
                    self.last_fall = Instant::now();
                }
            }
            Action::Rotate => {
                self.current.try_rotate(&self.grid);
            }
            Action::Quit => {
                // Quit is a loop concern; the driver stops ticking us.
            }
        }
    }

    /// Advance the simulation by one tick
    ///
    /// Rebuilds the grid snapshot, applies at most one gravity step, then
    /// runs the turn cycle until it settles back on Falling or GameOver.
    pub fn tick(&mut self) {
        loop {
            match self.phase {
                Phase::Falling => {
                    self.grid = Grid::build(&self.locked);
                    if self.last_fall.elapsed() >= GRAVITY_INTERVAL {
                        self.current.try_move(0, 1, &self.grid);
                        self.last_fall = Instant::now();
                    }
                    if self.current.has_landed(&self.locked) {
                        self.phase = Phase::Locking;
                    } else {
                        break;
                    }
                }
                Phase::Locking => {
                    self.phase = self.lock_current();
                }
                Phase::Spawning => {
                    self.current = std::mem::replace(&mut self.next, self.spawner.next_piece());
                    self.last_fall = Instant::now();
                    self.phase = Phase::Falling;
                    break;
                }
                Phase::GameOver => break,
            }
        }
    }

    /// Lock the current piece, clear lines, update the score, and decide the
    /// next phase
    fn lock_current(&mut self) -> Phase {
        self.locked.lock(&self.current);
        tracing::debug!(kind = ?self.current.kind, row = self.current.row, "piece locked");

        self.grid = Grid::build(&self.locked);
        let cleared = self.locked.clear_lines(&self.grid);
        if cleared > 0 {
            self.score.add_cleared(cleared);
            self.grid = Grid::build(&self.locked);
            tracing::info!(cleared, points = self.score.points, "lines cleared");
        }

        if self.locked.is_topped_out() {
            tracing::info!(points = self.score.points, lines = self.score.lines, "game over");
            return Phase::GameOver;
        }
        Phase::Spawning
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
