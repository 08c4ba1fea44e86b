use super::*;

/// Replays a fixed list of cells, wrapping around when it runs out.
///
/// Useful for replays and for tests that need a known sequence. Cells are
/// reduced modulo the grid size so the output always stays in range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedSequenceGenerator {
    script: Vec<CellIndex>,
    cursor: usize,
}

impl ScriptedSequenceGenerator {
    pub fn new(script: Vec<CellIndex>) -> Self {
        Self {
            script,
            cursor: 0,
        }
    }
}

impl SequenceGenerator for ScriptedSequenceGenerator {
    fn next_cell(&mut self, cells: CellCount) -> CellIndex {
        if self.script.is_empty() || cells == 0 {
            return 0;
        }
        let cell = self.script[self.cursor % self.script.len()];
        self.cursor = self.cursor.wrapping_add(1);
        cell % cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn replays_script_and_wraps() {
        let mut generator = ScriptedSequenceGenerator::new(vec![2, 5, 0]);

        assert_eq!(generator.generate(3, 9), vec![2, 5, 0]);
        assert_eq!(generator.generate(4, 9), vec![2, 5, 0, 2]);
    }

    #[test]
    fn out_of_range_cells_are_folded_into_grid() {
        let mut generator = ScriptedSequenceGenerator::new(vec![10, 4]);

        assert_eq!(generator.generate(2, 4), vec![2, 0]);
    }

    #[test]
    fn empty_script_yields_first_cell() {
        let mut generator = ScriptedSequenceGenerator::new(Vec::new());

        assert_eq!(generator.generate(2, 9), vec![0, 0]);
    }
}
