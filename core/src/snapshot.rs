use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of the engine for the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub phase: Phase,
    pub score: u32,
    pub level: usize,
    pub round: u32,
    pub sequence_len: usize,
    pub input_len: usize,
    pub highlighted: Option<CellIndex>,
    pub grid_size: Coord,
}

impl EngineSnapshot {
    pub fn from_engine<G>(engine: &GameEngine<G>) -> Self {
        Self {
            phase: engine.phase(),
            score: engine.score(),
            level: engine.level(),
            round: engine.round(),
            sequence_len: engine.sequence().len(),
            input_len: engine.user_input().len(),
            highlighted: engine.highlighted(),
            grid_size: engine.config().grid_size,
        }
    }

    /// Difficulty as shown to the player, starting at 1.
    pub const fn level_number(&self) -> usize {
        self.level + 1
    }

    pub const fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub const fn accepts_input(&self) -> bool {
        self.phase.accepts_input()
    }

    pub fn is_highlighted(&self, cell: CellIndex) -> bool {
        self.highlighted == Some(cell)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }
}
