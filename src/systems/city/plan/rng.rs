// quantized random draws
// every "random" value in the generator goes through this lattice

use rand::prelude::*;
use rand::rngs::StdRng;

/// Draws uniformly from the discrete set `{low, low+step, low+2*step, ...}`
/// capped at `high`. The set has `floor((high-low)/step) + 1` members, so
/// depending on float rounding `high` itself may not be reachable.
pub fn uniform_quantized(rng: &mut StdRng, low: f32, high: f32, step: f32) -> f32 {
    let steps = ((high - low) / step).floor() as u32;
    rng.random_range(0..=steps) as f32 * step + low
}
