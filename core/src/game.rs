//! The game session: score bookkeeping and the Active / GameOver state machine.

use log::{debug, error, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::grid::Grid;
use crate::resolver::resolve_move;
use crate::spawn::{place_initial_tile, spawn_tile, Spawn};
use crate::store::HighScoreStore;
use crate::Direction;

/// Whether moves are still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameState {
    Active,
    GameOver,
}

/// Final tally reported on the transition to [`GameState::GameOver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalScore {
    pub score: u64,
    pub high_score: u64,
}

/// What triggered an [`Update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateKind {
    Reset,
    Moved(Direction),
    /// A move arrived while the game was over and was dropped.
    Ignored(Direction),
}

/// Everything a renderer needs to know after a reset or a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Update {
    pub kind: UpdateKind,
    /// Whether the move changed the grid (always true for a reset).
    pub changed: bool,
    /// Tiles produced by merges, in order.
    pub merges: Vec<u32>,
    pub score_delta: u64,
    pub spawned: Option<Spawn>,
    pub score: u64,
    pub high_score: u64,
    pub state: GameState,
    /// Set only on the move that ended the game.
    pub game_over: Option<FinalScore>,
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: u64,
    pub high_score: u64,
    pub state: GameState,
}

/// The game is over once no cell is empty.
///
/// Merges that are still available between full cells are not considered.
pub fn is_terminal(grid: &Grid) -> bool {
    grid.empty_count() == 0
}

/// A game session bound to a high-score store.
pub struct Game<S> {
    grid: Grid,
    score: u64,
    high_score: u64,
    /// High score as last loaded from or written to the store.
    stored_best: u64,
    state: GameState,
    rng: SmallRng,
    store: S,
}

impl<S: HighScoreStore> Game<S> {
    /// Start a session whose tile placement is driven by `seed`.
    pub fn new(store: S, seed: u64) -> Self {
        Self::with_rng(store, SmallRng::seed_from_u64(seed))
    }

    /// Start a session seeded from system entropy.
    pub fn from_entropy(store: S) -> Self {
        Self::with_rng(store, SmallRng::from_entropy())
    }

    fn with_rng(store: S, rng: SmallRng) -> Self {
        let mut game = Game {
            grid: Grid::new(),
            score: 0,
            high_score: 0,
            stored_best: 0,
            state: GameState::Active,
            rng,
            store,
        };
        game.reset();
        game
    }

    /// Clear the board, reload the high score and place the opening 2.
    ///
    /// Accepted in any state.
    pub fn reset(&mut self) -> Update {
        self.grid.clear();
        self.score = 0;
        self.stored_best = self.load_high_score();
        self.high_score = self.stored_best;
        let spawn = place_initial_tile(&mut self.grid, &mut self.rng);
        self.state = GameState::Active;
        info!("new game, high score {}", self.high_score);

        Update {
            kind: UpdateKind::Reset,
            changed: true,
            merges: Vec::new(),
            score_delta: 0,
            spawned: Some(spawn),
            score: self.score,
            high_score: self.high_score,
            state: self.state,
            game_over: None,
        }
    }

    /// Execute a move in the given direction.
    ///
    /// Ignored once the game is over. Otherwise the grid is compacted and
    /// merged, the score and high score are updated, a tile is spawned if the
    /// grid changed, and the game ends if no empty cell remains.
    pub fn step(&mut self, direction: Direction) -> Update {
        if self.state == GameState::GameOver {
            return Update {
                kind: UpdateKind::Ignored(direction),
                changed: false,
                merges: Vec::new(),
                score_delta: 0,
                spawned: None,
                score: self.score,
                high_score: self.high_score,
                state: self.state,
                game_over: None,
            };
        }

        let outcome = resolve_move(&mut self.grid, direction);
        let score_delta = outcome.score_delta();
        self.score += score_delta;
        self.high_score = self.high_score.max(self.score);

        let spawned = spawn_tile(&mut self.grid, outcome.changed, &mut self.rng);
        assert!(
            self.grid.is_valid(),
            "tile invariant broken after moving {:?}: {:?}",
            direction,
            self.grid
        );
        debug!(
            "moved {:?}: changed={} delta={} spawned={:?}",
            direction, outcome.changed, score_delta, spawned
        );

        let game_over = if is_terminal(&self.grid) {
            Some(self.finish())
        } else {
            None
        };

        Update {
            kind: UpdateKind::Moved(direction),
            changed: outcome.changed,
            merges: outcome.merges,
            score_delta,
            spawned,
            score: self.score,
            high_score: self.high_score,
            state: self.state,
            game_over,
        }
    }

    fn finish(&mut self) -> FinalScore {
        self.state = GameState::GameOver;
        if self.score > self.stored_best {
            self.stored_best = self.score;
            info!("new high score {}", self.score);
            if let Err(e) = self.store.save(self.score) {
                error!("failed to save high score: {}", e);
            }
        }
        info!("game over, score {}, best {}", self.score, self.high_score);
        FinalScore {
            score: self.score,
            high_score: self.high_score,
        }
    }

    fn load_high_score(&self) -> u64 {
        match self.store.load() {
            Ok(value) => value,
            Err(e) => {
                warn!("could not load high score, starting from 0: {}", e);
                0
            }
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GameState::Active
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            score: self.score,
            high_score: self.high_score,
            state: self.state,
        }
    }
}

impl<S> std::fmt::Display for Game<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score: {}  High Score: {}", self.score, self.high_score)?;
        write!(f, "{}", self.grid)
    }
}

// =============================================================================
// Tests
// =============================================================================
