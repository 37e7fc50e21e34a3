use crate::vial::Vial;

/// Factor applied to the estimate once per empty vial.
pub const EMPTY_DISCOUNT: f64 = 2.0 / 3.0;

/// Rule by which vials are tallied into an [`Estimate`].
///
/// The two rules agree on differing-color breaks and disagree on how partially filled and empty vials count.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Tally {
    /// Every vial is looked at once: a non-empty vial short of `max_height` is unsettled, an empty vial is an empty.
    #[default]
    PerVial,
    /// Fullness is tallied once per adjacent unit pair rather than once per vial.
    ///
    /// Vials holding zero or one unit therefore count toward nothing: a lone unit is never unsettled and no vial is ever
    /// counted as empty, so the empty-vial discount never applies. A non-full vial of `n >= 2` units adds `n - 1` to
    /// the unsettled count.
    PerPair,
}

impl Tally {
    /// Tally `vials` of a configuration whose vials hold at most `max_height` units.
    pub fn tally(&self, vials: &[Vial], max_height: usize) -> Estimate {
        let mut estimate = Estimate::default();

        match self {
            Tally::PerVial => {
                for vial in vials {
                    estimate.breaks += vial.breaks();
                    if vial.is_empty() {
                        estimate.empties += 1;
                    } else if vial.has_room(max_height) {
                        estimate.unsettled += 1;
                    }
                }
            }
            Tally::PerPair => {
                for vial in vials {
                    for pair in vial.units().windows(2) {
                        if pair[0] != pair[1] {
                            estimate.breaks += 1;
                        }
                        if vial.has_room(max_height) {
                            estimate.unsettled += 1;
                        }
                        // a vial with a pair in it is never empty
                        if vial.is_empty() {
                            estimate.empties += 1;
                        }
                    }
                }
            }
        }

        estimate
    }
}

/// The tallies behind the heuristic estimate of a configuration's remaining work.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Estimate {
    /// Adjacent unit pairs with differing colors, across all vials.
    pub breaks: usize,
    /// Vials that are neither empty nor full.
    pub unsettled: usize,
    /// Vials with nothing in them.
    pub empties: usize,
}

impl Estimate {
    /// `breaks + unsettled`, before the empty-vial discount.
    pub fn base(&self) -> usize {
        self.breaks + self.unsettled
    }

    /// The heuristic value: the base cost scaled by [`EMPTY_DISCOUNT`] once per empty vial.
    pub fn cost(&self) -> f64 {
        self.base() as f64 * EMPTY_DISCOUNT.powi(self.empties as i32)
    }

    /// The discount is never zero, so the estimate is zero exactly when the base is.
    pub fn is_zero(&self) -> bool {
        self.base() == 0
    }
}
