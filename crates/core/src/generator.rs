//! Generator module - deterministic board layout
//!
//! A board is built from a text seed in three steps:
//!
//! 1. **Obstacles**: sample `N` cells by shuffling every index and taking the
//!    first `N`; accept the first sample whose remaining cells are one
//!    4-connected region. After `max_attempts` failed samples the last sample
//!    is used anyway and the generation is flagged as exhausted.
//! 2. **Value pool**: `playable / MAX_VALUE` copies of each value, shuffled.
//! 3. **Assignment**: pool values go to playable cells in index order;
//!    obstacles get `OBSTACLE_VALUE` and start revealed.
//!
//! Both shuffles draw from the same [`SeededRng`], so a seed fixes the whole
//! layout.

use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{neighbors, Board};
use crate::rng::{entropy_seed, shuffle, SeededRng};
use crate::types::{LayoutMode, Tile, MAX_PLACEMENT_ATTEMPTS, MAX_VALUE};

/// Rejected generator configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    #[error("{obstacles} obstacles leave no playable cell in {cells} cells")]
    TooManyObstacles { obstacles: usize, cells: usize },
    #[error("{playable} playable cells cannot hold an equal count of each value")]
    UnbalancedPool { playable: usize },
    #[error("obstacle placement needs at least one attempt")]
    NoAttempts,
}

/// Configuration for board generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub cols: usize,
    /// Obstacle cells to place
    pub obstacles: usize,
    /// Obstacle samples tried before accepting a disconnected one
    pub max_attempts: usize,
}

impl GeneratorConfig {
    pub fn for_mode(mode: LayoutMode) -> Self {
        Self {
            rows: mode.rows(),
            cols: mode.cols(),
            obstacles: mode.obstacles(),
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    pub fn playable(&self) -> usize {
        self.cells().saturating_sub(self.obstacles)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.obstacles >= self.cells() {
            return Err(ConfigError::TooManyObstacles {
                obstacles: self.obstacles,
                cells: self.cells(),
            });
        }
        if self.playable() % MAX_VALUE as usize != 0 {
            return Err(ConfigError::UnbalancedPool {
                playable: self.playable(),
            });
        }
        if self.obstacles > 0 && self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::for_mode(LayoutMode::default())
    }
}

/// Result of one generation, with placement diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub board: Board,
    /// Seed actually used (differs from the input when that was empty)
    pub seed: String,
    /// Obstacle samples drawn (0 for layouts without obstacles)
    pub attempts: usize,
    /// Placement ran out of attempts and kept a possibly disconnected layout
    pub exhausted: bool,
}

/// Board generator
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Default for Generator {
    fn default() -> Self {
        Self::for_mode(LayoutMode::default())
    }
}

impl Generator {
    /// Generator for one of the predefined layouts
    pub fn for_mode(mode: LayoutMode) -> Self {
        Self {
            config: GeneratorConfig::for_mode(mode),
        }
    }

    /// Generator for a custom layout
    pub fn with_config(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a board; an empty seed falls back to an entropy-derived one
    pub fn generate(&self, seed: &str) -> Generation {
        let seed = if seed.is_empty() {
            let fresh = entropy_seed();
            debug!(seed = %fresh, "empty seed, using entropy seed");
            fresh
        } else {
            seed.to_string()
        };

        let cfg = self.config;
        let mut rng = SeededRng::new(&seed);
        let (obstacle_mask, attempts, exhausted) = place_obstacles(&cfg, &mut rng);

        if exhausted {
            warn!(
                seed = %seed,
                attempts,
                obstacles = cfg.obstacles,
                "obstacle placement exhausted, keeping a possibly disconnected layout"
            );
        }

        let mut pool = value_pool(cfg.playable());
        shuffle(&mut pool, &mut rng);

        let mut values = pool.into_iter();
        let tiles: Vec<Tile> = obstacle_mask
            .iter()
            .enumerate()
            .map(|(i, &blocked)| {
                if blocked {
                    Tile::obstacle(i as u32)
                } else {
                    // Pool length equals the playable count, checked by `validate`.
                    Tile::hidden(i as u32, values.next().unwrap_or(MAX_VALUE))
                }
            })
            .collect();

        debug!(
            seed = %seed,
            rows = cfg.rows,
            cols = cfg.cols,
            obstacles = cfg.obstacles,
            attempts,
            "board generated"
        );

        Generation {
            board: Board::from_parts(tiles, cfg.rows, cfg.cols),
            seed,
            attempts,
            exhausted,
        }
    }
}

/// Generate the board for a predefined layout
pub fn generate_board(mode: LayoutMode, seed: &str) -> Board {
    Generator::for_mode(mode).generate(seed).board
}

/// Sample obstacle cells, returning the mask, attempts used, and whether the budget ran out
fn place_obstacles(cfg: &GeneratorConfig, rng: &mut SeededRng) -> (Vec<bool>, usize, bool) {
    let cells = cfg.cells();
    let mut mask = vec![false; cells];
    if cfg.obstacles == 0 {
        return (mask, 0, false);
    }

    let candidates: Vec<usize> = (0..cells).collect();
    for attempt in 1..=cfg.max_attempts {
        let mut sample = candidates.clone();
        shuffle(&mut sample, rng);

        mask.iter_mut().for_each(|m| *m = false);
        for &idx in &sample[..cfg.obstacles] {
            mask[idx] = true;
        }

        if is_connected(&mask, cfg.rows, cfg.cols) {
            return (mask, attempt, false);
        }
    }

    (mask, cfg.max_attempts, true)
}

/// Pool with `playable / MAX_VALUE` copies of each value, in ascending order
fn value_pool(playable: usize) -> Vec<i8> {
    let copies = playable / MAX_VALUE as usize;
    (1..=MAX_VALUE)
        .flat_map(|v| std::iter::repeat(v).take(copies))
        .collect()
}

/// True when the unblocked cells form one 4-connected region
///
/// Runs an iterative DFS from the first unblocked cell and compares the
/// visited count with the unblocked count. A grid with no unblocked cell
/// counts as connected.
pub fn is_connected(blocked: &[bool], rows: usize, cols: usize) -> bool {
    let Some(start) = blocked.iter().position(|b| !b) else {
        return true;
    };
    let open = blocked.iter().filter(|b| !**b).count();

    let mut visited = vec![false; blocked.len()];
    let mut stack = vec![start];
    let mut seen = 0usize;

    while let Some(curr) = stack.pop() {
        if visited[curr] {
            continue;
        }
        visited[curr] = true;
        seen += 1;

        for n in neighbors(curr, rows, cols) {
            if !blocked[n] && !visited[n] {
                stack.push(n);
            }
        }
    }

    seen == open
}
