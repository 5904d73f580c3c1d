// width and height models
// either flat uniform draws or a linear falloff from the map origin

use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::config::{JITTER_MAX, JITTER_MIN, SIZE_STEP};
use super::CityConfig;
use super::rng::uniform_quantized;

/// Footprint width for a candidate position. Falls off with distance from
/// the origin when `centre_width` is set, otherwise uniform in
/// `[min_width, max_width]`.
pub fn compute_width(x: f32, y: f32, config: &CityConfig, rng: &mut StdRng) -> f32 {
    if config.centre_width {
        let base = falloff_base(x, y, config.map_width, config.min_width, config.max_width);
        base * uniform_quantized(rng, JITTER_MIN, JITTER_MAX, SIZE_STEP)
    } else {
        uniform_quantized(rng, config.min_width, config.max_width, SIZE_STEP)
    }
}

/// Building height for an accepted position. Same falloff shape as
/// [`compute_width`], driven by `centre_height` and the height range.
pub fn compute_height(x: f32, y: f32, config: &CityConfig, rng: &mut StdRng) -> f32 {
    if config.centre_height {
        let base = falloff_base(x, y, config.map_width, config.min_height, config.max_height);
        base * uniform_quantized(rng, JITTER_MIN, JITTER_MAX, SIZE_STEP)
    } else {
        uniform_quantized(rng, config.min_height, config.max_height, SIZE_STEP)
    }
}

/// Pre-jitter falloff value: `max` at the origin, `min` at the nominal map
/// radius. Not clamped: corner positions sit beyond the nominal radius, so
/// the result can drop below `min` or go negative there.
pub fn falloff_base(x: f32, y: f32, map_width: f32, min: f32, max: f32) -> f32 {
    let half = map_width / 2.0;
    let distance = Vec2::new(x, y).length();
    let remaining = (half - distance) / half;
    remaining * (max - min) + min
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use crate::systems::city::plan::Archetype;

    fn config(centre_width: bool, centre_height: bool) -> CityConfig {
        CityConfig {
            map_width: 40.0,
            min_height: 3.0,
            max_height: 8.0,
            min_width: 2.0,
            max_width: 5.0,
            min_gap_width: 0.0,
            centre_height,
            centre_width,
            centre_cluster: false,
            archetypes: vec![Archetype::Square],
            building_count: 1,
        }
    }

    #[test]
    fn flat_width_stays_in_range_regardless_of_position() {
        let config = config(false, false);
        let mut rng = StdRng::seed_from_u64(21);
        for i in 0..500 {
            let x = (i % 40) as f32 - 20.0;
            let w = compute_width(x, -x, &config, &mut rng);
            assert!((2.0..=5.0 + 1e-4).contains(&w));
        }
    }

    #[test]
    fn flat_height_stays_in_range() {
        let config = config(false, false);
        let mut rng = StdRng::seed_from_u64(22);
        for _ in 0..500 {
            let h = compute_height(14.0, -3.0, &config, &mut rng);
            assert!((3.0..=8.0 + 1e-4).contains(&h));
        }
    }

    #[test]
    fn falloff_peaks_at_origin_and_decreases_outward() {
        let at = |d: f32| falloff_base(d, 0.0, 40.0, 3.0, 8.0);
        assert!((at(0.0) - 8.0).abs() < 1e-5);
        assert!(at(0.0) > at(5.0));
        assert!(at(5.0) > at(10.0));
        assert!(at(10.0) > at(20.0));
        assert!((at(20.0) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn corner_samples_may_fall_below_the_configured_minimum() {
        // the map corner is mapWidth/sqrt(2) from the origin, past the
        // nominal radius, and the falloff is deliberately left unclamped
        let corner = falloff_base(20.0, 20.0, 40.0, 3.0, 8.0);
        assert!(corner < 3.0);

        // with min close to the span the corner value goes negative
        let negative = falloff_base(20.0, 20.0, 40.0, 1.0, 12.0);
        assert!(negative < 0.0);
    }

    #[test]
    fn centre_height_scales_with_jitter_bounds() {
        let config = config(false, true);
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..500 {
            let h = compute_height(0.0, 0.0, &config, &mut rng);
            // base at the origin is exactly max_height, jittered by [0.8, 1.2]
            assert!(h >= 8.0 * 0.8 - 1e-4);
            assert!(h <= 8.0 * 1.2 + 1e-4);
        }
    }
}
