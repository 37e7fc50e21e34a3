#![warn(missing_docs)]

//! # `decant`
//!
//! A solver for water sort puzzles, where colored liquid sits in layers in a row of vials and must be poured around
//! until every vial holds a single color and is either full or empty.
//! Begin by building a starting configuration with a [`ConfigurationBuilder`], then call
//! [`solve()`](crate::Configuration::solve) to get the pours leading to a solved configuration.
//!
//! A pour takes the whole run of same-colored units at the top of one vial and moves as much of it as fits onto
//! another vial, which must be empty or show the same color on top. One pour is one move in a [`Solution`].
//!
//! # Internals
//! The search is a best-first search in the style of A*, over [`Configuration`]s connected by legal pours.
//! A configuration is scored by the number of pours made to reach it plus a heuristic [`Estimate`] of the work left,
//! and the lowest score is expanded next until a configuration with a zero estimate comes off the frontier.
//!
//! The estimate counts:
//! 1. "breaks", adjacent units of differing colors, each of which takes at least one pour to undo;
//! 2. "unsettled" vials, which are neither full nor empty.
//!
//! and discounts their sum by a factor of two thirds for every empty vial, since free vials make the remaining pours
//! easier. How partially filled and empty vials are counted is selectable through [`Tally`].
//!
//! Configurations compare equal regardless of which slot holds which vial, which collapses the many slot permutations
//! of one position into a single search node. Pours are always reported with real slot indices, however.
//!
//! The search marks configurations as seen when they are generated rather than when they are expanded, so it returns
//! *a* solution rather than the shortest one.

pub use builder::{BuilderInvalidReason, ConfigurationBuilder, Dimension};
pub use color::{ColorID, Palette};
pub use configuration::Configuration;
pub use estimate::{Estimate, Tally, EMPTY_DISCOUNT};
pub use pour::Pour;
pub use search::{SearchError, SearchOptions, Searcher, Solution, DEFAULT_TIE_BREAK};
pub use vial::Vial;

pub mod builder;
pub(crate) mod color;
pub(crate) mod configuration;
pub(crate) mod estimate;
pub(crate) mod pour;
pub mod search;
mod tests;
pub(crate) mod vial;
#[cfg(feature = "wasm")]
pub mod wasm;
