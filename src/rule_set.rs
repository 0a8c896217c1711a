use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a cell is alive next generation, given its state and live neighbor count
    pub fn next(&self, alive: bool, neighbors: u8) -> bool {
        let n = 1u16 << neighbors.min(8);

        if alive {
            self.survivals() & n != 0
        } else {
            self.births() & n != 0
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Empty rule")]
    Empty,

    #[error("Expected '{exp}' in \"{rule}\"")]
    Missing { exp: char, rule: String },

    #[error("Neighbor counts are digits 0 to 8, found '{got}'")]
    InvalidCount { got: char },
}

impl FromStr for RuleSet {
    type Err = RuleError;

    /// Accepts `B3/S23`, `b3s23`, and the bare `3/23` form, which lists births before survivals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = s.trim();
        if rule.is_empty() {
            return Err(RuleError::Empty);
        }

        let missing = |exp| RuleError::Missing {
            exp,
            rule: rule.to_string(),
        };

        // nameless rules list births first
        let Some(rest) = rule.strip_prefix(['b', 'B']) else {
            let (b, s) = rule.split_once('/').ok_or_else(|| missing('/'))?;

            return Ok(Self::new(counts_to_num(b)?, counts_to_num(s)?));
        };

        let (b, s) = rest
            .split_once(['s', 'S'])
            .ok_or_else(|| missing('S'))?;

        let b = b.strip_suffix('/').unwrap_or(b);

        Ok(Self::new(counts_to_num(b)?, counts_to_num(s)?))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |n: u16| -> String {
            (0..=8)
                .filter(|&i| n & (1 << i) != 0)
                .map(|i| char::from(b'0' + i as u8))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

/// Convert the human readable birth/survival counts to a packed bit representation
fn counts_to_num(counts: &str) -> Result<u16, RuleError> {
    let mut n = 0;

    for c in counts.chars() {
        match c.to_digit(10) {
            Some(d) if d <= 8 => n |= 1 << d,
            _ => return Err(RuleError::InvalidCount { got: c }),
        }
    }

    Ok(n)
}
