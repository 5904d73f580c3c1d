// footprint placement
// rejection sampling against the already accepted footprints

use rand::rngs::StdRng;

use crate::config::{CLUSTER_EXPONENT, MAX_PLACEMENT_ATTEMPTS, POSITION_STEP};
use super::{CityConfig, CityGenError, Footprint};
use super::rng::uniform_quantized;
use super::sizing;

/// Draws a footprint that does not overlap any member of `placed`.
///
/// Each attempt redraws position and width together, since the width feeds
/// the separation test. After [`MAX_PLACEMENT_ATTEMPTS`] rejections the
/// building is abandoned with [`CityGenError::PlacementExhausted`]; the
/// caller skips it and the run continues.
pub fn sample_footprint(
    config: &CityConfig,
    placed: &[Footprint],
    rng: &mut StdRng,
) -> Result<Footprint, CityGenError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let (x, y) = draw_position(config, rng);
        let width = sizing::compute_width(x, y, config, rng);
        let candidate = Footprint { x, y, width };

        if !placed.iter().any(|p| overlaps(p, &candidate, config.min_gap_width)) {
            return Ok(candidate);
        }
    }

    Err(CityGenError::PlacementExhausted { attempts: MAX_PLACEMENT_ATTEMPTS })
}

// raw position on the 0.01 grid, both axes in [-mapWidth/2, mapWidth/2]
fn draw_position(config: &CityConfig, rng: &mut StdRng) -> (f32, f32) {
    let half = config.map_width / 2.0;

    if config.centre_cluster {
        // shaping exponent concentrates the unit draw near zero before it
        // is stretched back across the map
        let u = uniform_quantized(rng, 0.0, 1.0, POSITION_STEP);
        let v = uniform_quantized(rng, 0.0, 1.0, POSITION_STEP);
        (
            -half + config.map_width * u.powf(CLUSTER_EXPONENT),
            -half + config.map_width * v.powf(CLUSTER_EXPONENT),
        )
    } else {
        (
            uniform_quantized(rng, -half, half, POSITION_STEP),
            uniform_quantized(rng, -half, half, POSITION_STEP),
        )
    }
}

/// Axis-aligned separation test. Two footprints collide only when both
/// axes are simultaneously closer than half the combined width plus gap.
pub fn overlaps(a: &Footprint, b: &Footprint, min_gap_width: f32) -> bool {
    let separation = (a.width + b.width + min_gap_width) / 2.0;
    (a.x - b.x).abs() < separation && (a.y - b.y).abs() < separation
}
