//! Building starting configurations vial by vial.

use std::num::NonZero;

use thiserror::Error;

use crate::configuration::Configuration;
use crate::vial::Vial;

/// A vial count or capacity; neither may be zero.
pub type Dimension = NonZero<usize>;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum BuilderInvalidReason {
    /// A vial was given more units than the configuration's `max_height` allows.
    #[error("vial for slot {slot} holds {len} units but vials hold at most {max_height}")]
    VialTooTall {
        /// Slot the vial was meant for.
        slot: usize,
        /// Units in the vial.
        len: usize,
        /// Capacity of every vial.
        max_height: usize,
    },
    /// A vial was placed at a slot past the configuration's `vial_count`.
    #[error("slot {slot} is out of bounds for {vial_count} vials")]
    SlotOutOfBounds {
        /// The offending slot.
        slot: usize,
        /// Number of slots the builder has.
        vial_count: usize,
    },
    /// A vial was added while every slot already held one.
    #[error("every slot already holds a vial")]
    NoEmptySlot,
}

/// Builds a starting [`Configuration`] by assigning vials into initially empty slots.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// The first invalid call puts the builder into an invalid state; later calls do nothing and [`build`](Self::build)
/// reports why. Nothing is ever truncated to fit.
#[derive(Clone, Debug)]
pub struct ConfigurationBuilder {
    vial_count: Dimension,
    max_height: Dimension,
    vials: Vec<Vial>,
    // slots filled through add_vial, most recent last
    added: Vec<usize>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl ConfigurationBuilder {
    /// Construct a builder for `vial_count` empty vials of capacity `max_height`.
    pub fn with_dims(vial_count: Dimension, max_height: Dimension) -> Self {
        Self {
            vial_count,
            max_height,
            vials: vec![Vial::default(); vial_count.get()],
            added: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Place `vial` into the first empty slot.
    ///
    /// May cause the builder to enter a [`VialTooTall`](BuilderInvalidReason::VialTooTall) or
    /// [`NoEmptySlot`](BuilderInvalidReason::NoEmptySlot) invalid state.
    /// Adding an empty vial changes nothing.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_vial(&mut self, vial: impl Into<Vial>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let vial = vial.into();
        if vial.is_empty() {
            return self;
        }

        match self.vials.iter().position(Vial::is_empty) {
            None => self.invalid_reasons.push(BuilderInvalidReason::NoEmptySlot),
            Some(slot) => {
                self.set_vial(slot, vial);
                if self.invalid_reasons.is_empty() {
                    self.added.push(slot);
                }
            }
        }

        self
    }

    /// Remove the most recently added vial, leaving its slot empty.
    ///
    /// Only vials placed by [`Self::add_vial`] are removed; a vial later replaced through [`Self::set_vial`] is
    /// skipped over, as is the vial that replaced it.
    /// If the builder is in an invalid state or nothing was added, this function does nothing.
    pub fn pop_vial(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if let Some(slot) = self.added.pop() {
            self.vials[slot] = Vial::default();
        }

        self
    }

    /// Place `vial` at `slot`, replacing whatever was there.
    /// A vial placed here never counts as added, so [`Self::pop_vial`] will not remove it.
    ///
    /// May cause the builder to enter a [`SlotOutOfBounds`](BuilderInvalidReason::SlotOutOfBounds) or
    /// [`VialTooTall`](BuilderInvalidReason::VialTooTall) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn set_vial(&mut self, slot: usize, vial: impl Into<Vial>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if slot >= self.vial_count.get() {
            self.invalid_reasons.push(BuilderInvalidReason::SlotOutOfBounds { slot, vial_count: self.vial_count.get() });
            return self;
        }

        let vial = vial.into();
        if vial.len() > self.max_height.get() {
            self.invalid_reasons.push(BuilderInvalidReason::VialTooTall {
                slot,
                len: vial.len(),
                max_height: self.max_height.get(),
            });
            return self;
        }

        // an overwritten slot no longer holds what add_vial put there
        self.added.retain(|added| *added != slot);
        self.vials[slot] = vial;
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        match self.invalid_reasons.is_empty() {
            true => None,
            false => Some(&self.invalid_reasons),
        }
    }

    /// Convert the state of this builder into a starting [`Configuration`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Configuration, &Vec<BuilderInvalidReason>> {
        if let Some(reasons) = self.is_valid() {
            return Err(reasons);
        }

        Ok(Configuration::from_vials(self.vials.clone(), self.max_height.get(), None))
    }
}
