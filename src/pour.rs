use std::fmt::{Display, Formatter};

/// One move: pour the top run of vial `source` into vial `destination`.
///
/// Indices are 0-based slot numbers.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pour {
    /// Slot poured out of.
    pub source: usize,
    /// Slot poured into.
    pub destination: usize,
}

impl Pour {
    /// A pour from `source` into `destination`.
    pub fn new(source: usize, destination: usize) -> Self {
        Self { source, destination }
    }

    /// The `(source, destination)` pair numbered from 1, as shown to players.
    pub fn one_based(&self) -> (usize, usize) {
        (self.source + 1, self.destination + 1)
    }
}

impl From<(usize, usize)> for Pour {
    fn from(value: (usize, usize)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Display for Pour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}
