//! Bindings for calling the solver from JavaScript.

use std::num::NonZero;

use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::builder::ConfigurationBuilder;
use crate::vial::Vial;

/// Solve a puzzle from JavaScript.
///
/// `vials` is an array of `Uint8Array`s, one per vial, bottom unit first; its length is the vial count.
/// Returns an array of `[source, destination]` pairs, numbered from 1.
#[wasm_bindgen(js_name = solvePuzzle)]
pub fn solve_puzzle(max_height: usize, vials: Array) -> Result<Array, JsError> {
    let vial_count = NonZero::new(vials.length() as usize).ok_or_else(|| JsError::new("no vials given"))?;
    let max_height = NonZero::new(max_height).ok_or_else(|| JsError::new("vials must hold at least one unit"))?;

    let mut builder = ConfigurationBuilder::with_dims(vial_count, max_height);
    for (slot, units) in vials.iter().enumerate() {
        builder.set_vial(slot, Vial::new(Uint8Array::new(&units).to_vec()));
    }

    let start = builder.build().map_err(|reasons| match reasons.first() {
        Some(reason) => JsError::new(&reason.to_string()),
        None => JsError::new("invalid puzzle"),
    })?;
    let solution = start.solve().map_err(|err| JsError::new(&err.to_string()))?;

    Ok(solution.moves.iter()
        .map(|pour| {
            let (source, destination) = pour.one_based();
            Array::of2(&JsValue::from(source as u32), &JsValue::from(destination as u32))
        })
        .collect())
}
