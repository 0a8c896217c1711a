use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::trace;

use crate::GridSize;
use crate::cells;
use crate::engine::Engine;
use crate::engine::EngineFactory;
use crate::engine::Orientation;
use crate::rule_set::RuleSet;

/// A glider heading south east, centered on its middle cell
///
/// ```notrust
///  . # .
///  . . #
///  # # #
/// ```
const GLIDER: [[bool; 3]; 3] = [
    [false, true, false],
    [false, false, true],
    [true, true, true],
];

/// Half the side length of a pulsar
const PULSAR_RADIUS: i64 = 6;

/// A bit-packed, toroidal life-like universe
pub struct Universe {
    width: GridSize,
    height: GridSize,

    /// One bit per cell, see [`crate::cells`]. Padding bits past the last cell are always 0.
    cells: Vec<u8>,

    generation: u64,
    rules: RuleSet,
}

impl Universe {
    /// An empty universe
    pub fn new(width: GridSize, height: GridSize, rules: RuleSet) -> Self {
        let n = width as usize * height as usize;

        Self {
            width,
            height,
            cells: vec![0; cells::packed_len(n)],
            generation: 0,
            rules,
        }
    }

    /// A universe where each cell is alive with probability `life_probability`
    pub fn random<R: Rng>(
        width: GridSize,
        height: GridSize,
        rules: RuleSet,
        life_probability: f64,
        rng: &mut R,
    ) -> Self {
        let p = if life_probability.is_nan() {
            0.0
        } else {
            life_probability.clamp(0.0, 1.0)
        };

        let mut universe = Self::new(width, height, rules);
        for i in 0..universe.len() {
            if rng.random_bool(p) {
                universe.set(i, true);
            }
        }

        universe
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn is_alive(&self, row: GridSize, col: GridSize) -> bool {
        cells::is_alive(self.index_of(row, col), &self.cells)
    }

    pub fn set_cell(&mut self, row: GridSize, col: GridSize, alive: bool) {
        let i = self.index_of(row, col);
        self.set(i, alive);
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn set(&mut self, i: usize, alive: bool) {
        let mask = 1u8 << (i % 8);

        if alive {
            self.cells[i / 8] |= mask;
        } else {
            self.cells[i / 8] &= !mask;
        }
    }

    /// Index of the cell `(row + dr, col + dc)`, wrapping around the edges
    fn wrapped(&self, row: GridSize, col: GridSize, dr: i64, dc: i64) -> usize {
        let r = (row as i64 + dr).rem_euclid(self.height as i64);
        let c = (col as i64 + dc).rem_euclid(self.width as i64);

        r as usize * self.width as usize + c as usize
    }

    fn live_neighbors(&self, row: GridSize, col: GridSize) -> u8 {
        let mut n = 0;

        for dr in -1..=1 {
            for dc in -1..=1 {
                if (dr, dc) == (0, 0) {
                    continue;
                }

                if cells::is_alive(self.wrapped(row, col, dr, dc), &self.cells) {
                    n += 1;
                }
            }
        }

        n
    }

    /// Write `template` centered on `(row, col)`. `template(dr, dc)` is called for every offset
    /// within `radius` of the center.
    fn stamp<F>(&mut self, row: GridSize, col: GridSize, radius: i64, template: F)
    where
        F: Fn(i64, i64) -> bool,
    {
        if self.len() == 0 {
            return;
        }

        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let i = self.wrapped(row, col, dr, dc);
                self.set(i, template(dr, dc));
            }
        }
    }
}

impl Engine for Universe {
    fn tick(&mut self) {
        let mut next = vec![0u8; self.cells.len()];

        for row in 0..self.height {
            for col in 0..self.width {
                let i = self.index_of(row, col);
                let alive = cells::is_alive(i, &self.cells);

                if self.rules.next(alive, self.live_neighbors(row, col)) {
                    next[i / 8] |= 1 << (i % 8);
                }
            }
        }

        self.cells = next;
        self.generation += 1;

        trace!(generation = self.generation, "tick");
    }

    fn width(&self) -> GridSize {
        self.width
    }

    fn height(&self) -> GridSize {
        self.height
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn population(&self) -> u64 {
        self.cells.iter().map(|b| b.count_ones() as u64).sum()
    }

    fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn toggle_cell(&mut self, row: GridSize, col: GridSize) {
        let i = self.index_of(row, col);
        self.cells[i / 8] ^= 1 << (i % 8);
    }

    fn stamp_glider(&mut self, row: GridSize, col: GridSize, orientation: Orientation) {
        let (flip_rows, flip_cols) = match orientation {
            Orientation::SouthEast => (false, false),
            Orientation::SouthWest => (false, true),
            Orientation::NorthWest => (true, true),
            Orientation::NorthEast => (true, false),
        };

        self.stamp(row, col, 1, |dr, dc| {
            let dr = if flip_rows { -dr } else { dr };
            let dc = if flip_cols { -dc } else { dc };

            GLIDER[(dr + 1) as usize][(dc + 1) as usize]
        });
    }

    fn stamp_pulsar(&mut self, row: GridSize, col: GridSize) {
        self.stamp(row, col, PULSAR_RADIUS, |dr, dc| {
            let arm = |a: i64| matches!(a.abs(), 2..=4);
            let bar = |a: i64| matches!(a.abs(), 1 | 6);

            (bar(dr) && arm(dc)) || (arm(dr) && bar(dc))
        });
    }
}

/// Builds [`Universe`]s that all follow the same rules
pub struct UniverseFactory {
    rules: RuleSet,
    rng: StdRng,
}

impl UniverseFactory {
    /// With a `seed`, the sequence of universes created is reproducible.
    pub fn new(rules: RuleSet, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self { rules, rng }
    }
}

impl EngineFactory for UniverseFactory {
    type Engine = Universe;

    fn create(&mut self, width: GridSize, height: GridSize, life_probability: f64) -> Universe {
        debug!(width, height, life_probability, rules = %self.rules, "creating universe");

        Universe::random(width, height, self.rules, life_probability, &mut self.rng)
    }
}
