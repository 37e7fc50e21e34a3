use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::estimate::{Estimate, Tally};
use crate::pour::Pour;
use crate::search::{SearchError, SearchOptions, Searcher, Solution};
use crate::vial::Vial;

/// One complete puzzle state: the contents of every vial plus the pour that produced it.
///
/// Configurations are values. A pour never touches `self`; it copies and returns a new configuration.
///
/// Equality and hashing ignore which slot holds which vial. Two configurations are equal when they hold the same
/// multiset of vials, which is checked through a canonical, sorted copy of the vials computed once at construction.
/// [`last_pour`](Self::last_pour) is metadata and does not take part in equality either.
#[derive(Clone, Debug)]
pub struct Configuration {
    vials: Vec<Vial>,
    max_height: usize,
    last_pour: Option<Pour>,
    canonical: Vec<Vial>,
}

impl Configuration {
    /// Construct from `vials` as they are. Callers go through [`ConfigurationBuilder`](crate::ConfigurationBuilder),
    /// which checks that no vial holds more than `max_height` units.
    pub(crate) fn from_vials(vials: Vec<Vial>, max_height: usize, last_pour: Option<Pour>) -> Self {
        let canonical = vials.iter().cloned().sorted_unstable().collect_vec();
        Self { vials, max_height, last_pour, canonical }
    }

    /// Number of slots, empty or not.
    pub fn vial_count(&self) -> usize {
        self.vials.len()
    }

    /// Units any one vial may hold.
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// All vials, in slot order.
    pub fn vials(&self) -> &[Vial] {
        &self.vials
    }

    /// The vial at `slot`, or `None` past the last slot.
    pub fn vial(&self, slot: usize) -> Option<&Vial> {
        self.vials.get(slot)
    }

    /// The pour which produced this configuration from its predecessor, or `None` for a starting configuration.
    pub fn last_pour(&self) -> Option<Pour> {
        self.last_pour
    }

    /// Total units across all vials.
    pub fn unit_count(&self) -> usize {
        self.vials.iter().map(Vial::len).sum()
    }

    /// The same vials, with the pour metadata cleared.
    pub fn as_start(&self) -> Self {
        Self { last_pour: None, ..self.clone() }
    }

    /// Whether pouring from `source` into `destination` would move anything, checked without copying.
    ///
    /// A pour needs two distinct slots and a non-empty source. An empty destination accepts anything;
    /// otherwise the top colors must match and the destination must have room.
    /// Slots out of range are never pourable.
    pub fn can_pour(&self, source: usize, destination: usize) -> bool {
        if source == destination {
            return false;
        }
        let (Some(from), Some(to)) = (self.vials.get(source), self.vials.get(destination)) else {
            return false;
        };

        match (from.top(), to.top()) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(color), Some(onto)) => color == onto && to.has_room(self.max_height),
        }
    }

    /// Pour the top run of `source` into `destination`, returning the resulting configuration.
    ///
    /// Units move one at a time for as long as the source still shows the color the pour started with and the
    /// destination has room, so a single pour may move part of a run when the destination fills up.
    /// Returns `None` when [`can_pour`](Self::can_pour) does not hold.
    pub fn apply_pour(&self, source: usize, destination: usize) -> Option<Self> {
        if !self.can_pour(source, destination) {
            return None;
        }

        let mut vials = self.vials.clone();
        let color = vials[source].top()?;
        while vials[source].top() == Some(color) && vials[destination].has_room(self.max_height) {
            if let Some(unit) = vials[source].pop() {
                vials[destination].push(unit);
            }
        }

        Some(Self::from_vials(vials, self.max_height, Some(Pour::new(source, destination))))
    }

    /// Every distinct configuration one pour away.
    ///
    /// Pours are tried over ordered slot pairs in index order. A result equal to `self`, or equal to a configuration
    /// already collected, is dropped; "equal" is the slot-blind equality of [`Configuration`].
    pub fn successors(&self) -> Vec<Self> {
        let mut children: Vec<Self> = Vec::new();

        for (source, destination) in (0..self.vial_count()).cartesian_product(0..self.vial_count()) {
            if let Some(child) = self.apply_pour(source, destination) {
                if child != *self && !children.contains(&child) {
                    children.push(child);
                }
            }
        }

        children
    }

    /// The tallies behind the heuristic estimate under the given counting rule.
    pub fn tally(&self, tally: Tally) -> Estimate {
        tally.tally(&self.vials, self.max_height)
    }

    /// Heuristic estimate of the remaining work, never negative.
    ///
    /// Counts differing adjacent units and unsettled vials, then discounts the sum once per empty vial.
    /// See [`Tally`] for how the rules count vials.
    pub fn estimate(&self, tally: Tally) -> f64 {
        self.tally(tally).cost()
    }

    /// A configuration is solved when its estimate is zero.
    pub fn is_solved(&self, tally: Tally) -> bool {
        self.tally(tally).is_zero()
    }

    /// Search for a sequence of pours solving this configuration with [`SearchOptions::default`].
    pub fn solve(&self) -> Result<Solution, SearchError> {
        self.solve_with(SearchOptions::default())
    }

    /// Search for a sequence of pours solving this configuration.
    pub fn solve_with(&self, options: SearchOptions) -> Result<Solution, SearchError> {
        Searcher::new(self, options).run()
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Configuration {}

impl Hash for Configuration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state)
    }
}

impl Display for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for vial in &self.vials {
            writeln!(f, "{}", vial)?;
        }
        Ok(())
    }
}
