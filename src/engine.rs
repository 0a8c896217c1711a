use crate::GridSize;

/// The automaton being displayed.
///
/// Everything about how the grid evolves lives behind this trait. The display only reads the
/// packed cells and asks for edits.
pub trait Engine {
    /// Advance by one generation
    fn tick(&mut self);

    fn width(&self) -> GridSize;

    fn height(&self) -> GridSize;

    /// Number of ticks since the grid was created
    fn generation(&self) -> u64;

    /// Number of live cells
    fn population(&self) -> u64;

    /// Row-major index of a cell
    fn index_of(&self, row: GridSize, col: GridSize) -> usize {
        row as usize * self.width() as usize + col as usize
    }

    /// The bit-packed cells, `ceil(width * height / 8)` bytes long. See [`crate::cells`].
    fn cells(&self) -> &[u8];

    fn toggle_cell(&mut self, row: GridSize, col: GridSize);

    /// Write a glider centered on `(row, col)`, heading toward `orientation`
    fn stamp_glider(&mut self, row: GridSize, col: GridSize, orientation: Orientation);

    /// Write a pulsar centered on `(row, col)`
    fn stamp_pulsar(&mut self, row: GridSize, col: GridSize);
}

/// Creates engines whenever the display starts a new session.
pub trait EngineFactory {
    type Engine: Engine;

    /// A `width x height` grid where each cell is alive with probability `life_probability`
    fn create(&mut self, width: GridSize, height: GridSize, life_probability: f64)
    -> Self::Engine;
}

/// Direction a stamped glider travels in. Cycles in the order listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    SouthEast,
    SouthWest,
    NorthWest,
    NorthEast,
}

impl Orientation {
    const ALL: [Orientation; 4] = [
        Orientation::SouthEast,
        Orientation::SouthWest,
        Orientation::NorthWest,
        Orientation::NorthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    pub fn arrow(self) -> char {
        match self {
            Orientation::SouthEast => '↘',
            Orientation::SouthWest => '↙',
            Orientation::NorthWest => '↖',
            Orientation::NorthEast => '↗',
        }
    }
}

#[cfg(test)]
mod test {
    use super::Orientation;

    #[test]
    fn cycles_forward() {
        let mut o = Orientation::from_index(0);
        for _ in 0..4 {
            o = o.next();
        }

        assert_eq!(o.index(), 0);
    }

    #[test]
    fn cycles_backward() {
        assert_eq!(Orientation::from_index(0).prev().index(), 3);
        assert_eq!(Orientation::NorthEast.next(), Orientation::SouthEast);
    }

    #[test]
    fn arrows() {
        let arrows: String = (0..4).map(|i| Orientation::from_index(i).arrow()).collect();

        assert_eq!(arrows, "↘↙↖↗");
    }
}
