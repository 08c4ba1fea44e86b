use super::*;

/// Independent uniform draws, repeats allowed, from a seeded small RNG.
#[derive(Clone, Debug)]
pub struct RandomSequenceGenerator {
    seed: u64,
    rng: rand::rngs::SmallRng,
}

impl RandomSequenceGenerator {
    pub fn new(seed: u64) -> Self {
        use rand::prelude::*;

        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SequenceGenerator for RandomSequenceGenerator {
    fn next_cell(&mut self, cells: CellCount) -> CellIndex {
        use rand::prelude::*;

        if cells == 0 {
            log::warn!("Asked to draw from an empty grid, using cell 0");
            return 0;
        }
        self.rng.random_range(0..cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_inside_the_grid() {
        let mut generator = RandomSequenceGenerator::new(7);

        let sequence = generator.generate(500, 9);

        assert_eq!(sequence.len(), 500);
        assert!(sequence.iter().all(|&cell| cell < 9));
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = RandomSequenceGenerator::new(42).generate(32, 16);
        let b = RandomSequenceGenerator::new(42).generate(32, 16);

        assert_eq!(a, b);
    }

    #[test]
    fn every_cell_eventually_shows_up() {
        let mut generator = RandomSequenceGenerator::new(3);
        let mut seen = [false; 9];

        for cell in generator.generate(1000, 9) {
            seen[usize::from(cell)] = true;
        }

        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn single_cell_grid_always_draws_zero() {
        let mut generator = RandomSequenceGenerator::new(1);

        assert!(generator.generate(10, 1).iter().all(|&cell| cell == 0));
        assert_eq!(generator.next_cell(0), 0);
    }
}
