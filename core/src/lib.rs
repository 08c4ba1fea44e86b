#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::BitOr;
use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use playback::*;
pub use scheduler::*;
pub use snapshot::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod playback;
mod scheduler;
mod snapshot;
mod types;

pub const DEFAULT_GRID_SIZE: Coord = 3;
pub const DEFAULT_GLOW_MS: u32 = 300;
pub const DEFAULT_ADVANCE_DELAY_MS: u32 = 500;
pub const DEFAULT_SCORE_PER_LEVEL: u32 = 5;

pub const DEFAULT_LEVELS: [LevelSpec; 3] = [
    LevelSpec::new(3, 1000),
    LevelSpec::new(5, 700),
    LevelSpec::new(7, 400),
];

/// One difficulty tier: how long the first round is and how fast cells are revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub steps: usize,
    pub reveal_interval_ms: u32,
}

impl LevelSpec {
    pub const fn new(steps: usize, reveal_interval_ms: u32) -> Self {
        Self {
            steps,
            reveal_interval_ms,
        }
    }

    pub const fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms as u64)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: Coord,
    pub levels: Vec<LevelSpec>,
    pub glow_ms: u32,
    pub advance_delay_ms: u32,
    pub score_per_level: u32,
}

impl GameConfig {
    pub fn new(
        grid_size: Coord,
        levels: Vec<LevelSpec>,
        glow_ms: u32,
        advance_delay_ms: u32,
        score_per_level: u32,
    ) -> Result<Self> {
        let config = Self {
            grid_size,
            levels,
            glow_ms,
            advance_delay_ms,
            score_per_level,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(GameError::InvalidConfig("grid size must be at least 1"));
        }
        if self.levels.is_empty() {
            return Err(GameError::InvalidConfig("at least one level is required"));
        }
        if self.levels.iter().any(|level| level.steps == 0) {
            return Err(GameError::InvalidConfig("every level needs at least one step"));
        }
        if self.score_per_level == 0 {
            return Err(GameError::InvalidConfig("score per level must be at least 1"));
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }

    pub fn max_level(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Level spec for `level`, clamped to the last configured tier.
    pub fn level(&self, level: usize) -> LevelSpec {
        self.levels
            .get(level.min(self.max_level()))
            .copied()
            .unwrap_or(DEFAULT_LEVELS[0])
    }

    pub const fn glow(&self) -> Duration {
        Duration::from_millis(self.glow_ms as u64)
    }

    pub const fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms as u64)
    }

    pub fn contains_cell(&self, cell: CellIndex) -> bool {
        cell < self.total_cells()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            levels: DEFAULT_LEVELS.to_vec(),
            glow_ms: DEFAULT_GLOW_MS,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
            score_per_level: DEFAULT_SCORE_PER_LEVEL,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputOutcome {
    Ignored,
    Accepted,
    RoundCleared,
    Mismatch,
}

impl InputOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Accepted | Self::RoundCleared | Self::Mismatch => true,
        }
    }
}

/// Result of handing a continuation back to the engine, ordered by significance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResumeOutcome {
    Stale,
    Cleared,
    Highlighted,
    AwaitingInput,
    NextRound,
}

impl ResumeOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }
}

impl BitOr for ResumeOutcome {
    type Output = ResumeOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.max(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn default_config_is_classic_game() {
        let config = GameConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.total_cells(), 9);
        assert_eq!(config.max_level(), 2);
        assert_eq!(config.level(0), LevelSpec::new(3, 1000));
        assert_eq!(config.level(7), LevelSpec::new(7, 400));
        assert_eq!(config.glow(), Duration::from_millis(300));
        assert_eq!(config.advance_delay(), Duration::from_millis(500));
    }

    #[test]
    fn new_rejects_unplayable_configs() {
        assert!(matches!(
            GameConfig::new(0, DEFAULT_LEVELS.to_vec(), 300, 500, 5),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::new(3, vec![], 300, 500, 5),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::new(3, vec![LevelSpec::new(0, 100)], 300, 500, 5),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::new(3, DEFAULT_LEVELS.to_vec(), 300, 500, 0),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(GameConfig::new(4, vec![LevelSpec::new(1, 10)], 0, 0, 1).is_ok());
    }

    #[test]
    fn resume_outcomes_merge_to_most_significant() {
        use ResumeOutcome::*;

        assert_eq!(Stale | Stale, Stale);
        assert_eq!(Highlighted | Cleared, Highlighted);
        assert_eq!(Cleared | AwaitingInput, AwaitingInput);
        assert_eq!(NextRound | Stale, NextRound);
        assert!(!Stale.has_update());
        assert!(Cleared.has_update());
    }
}
