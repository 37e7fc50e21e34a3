use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::color::ColorID;

/// A single vial: a stack of colored units, bottom first.
///
/// Vials only know their contents. Capacity belongs to the [`Configuration`](crate::Configuration) holding them,
/// so every query that depends on it takes `max_height` explicitly.
///
/// The derived ordering is lexicographic over the units, which is what the canonical form of a configuration sorts by.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Vial(Vec<ColorID>);

impl Vial {
    /// A vial holding `units`, bottom first.
    pub fn new(units: Vec<ColorID>) -> Self {
        Self(units)
    }

    /// Units from the bottom of the vial to the top.
    pub fn units(&self) -> &[ColorID] {
        &self.0
    }

    /// Number of units held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vial holds nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color of the topmost unit, or `None` for an empty vial.
    pub fn top(&self) -> Option<ColorID> {
        self.0.last().copied()
    }

    /// Length of the run of equal colors at the top.
    pub fn top_run(&self) -> usize {
        match self.top() {
            None => 0,
            Some(top) => self.0.iter().rev().take_while(|unit| **unit == top).count(),
        }
    }

    /// Whether another unit fits under a capacity of `max_height`.
    pub fn has_room(&self, max_height: usize) -> bool {
        self.len() < max_height
    }

    /// Whether the vial is at a capacity of `max_height`.
    pub fn is_full(&self, max_height: usize) -> bool {
        self.len() >= max_height
    }

    /// Whether every unit in this vial shares one color. Empty vials are trivially uniform.
    pub fn is_uniform(&self) -> bool {
        self.0.iter().all_equal()
    }

    /// Number of adjacent unit pairs whose colors differ.
    pub fn breaks(&self) -> usize {
        self.0.iter().tuple_windows().filter(|(below, above)| below != above).count()
    }

    pub(crate) fn pop(&mut self) -> Option<ColorID> {
        self.0.pop()
    }

    pub(crate) fn push(&mut self, unit: ColorID) {
        self.0.push(unit)
    }
}

impl From<Vec<ColorID>> for Vial {
    fn from(value: Vec<ColorID>) -> Self {
        Self(value)
    }
}

impl<C: Into<ColorID>, const N: usize> From<[C; N]> for Vial {
    fn from(value: [C; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<C: Into<ColorID>> FromIterator<C> for Vial {
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Vial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, ".");
        }
        write!(f, "{}", self.0.iter().join(" "))
    }
}
