use alloc::vec::Vec;

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Entropy source for round sequences.
pub trait SequenceGenerator {
    /// Draws one cell in `[0, cells)`.
    fn next_cell(&mut self, cells: CellCount) -> CellIndex;

    fn generate(&mut self, length: usize, cells: CellCount) -> Vec<CellIndex> {
        (0..length).map(|_| self.next_cell(cells)).collect()
    }
}
