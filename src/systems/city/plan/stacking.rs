// floor stacking
// turns a target height into a concrete stack of scaled floor segments

use rand::prelude::*;
use rand::rngs::StdRng;

use super::{Archetype, TemplateDims};

/// Resolved stack geometry for one building.
///
/// The base floor segment always sits at y = 0 and the cap always tops the
/// stack, so `floor_count` 0 and 1 produce the same silhouette.
#[derive(Clone, Debug, PartialEq)]
pub struct StackLayout {
    /// Uniform scale from template size to footprint width.
    pub scale: f32,
    /// Floor segment height after scaling.
    pub floor_height: f32,
    /// `round(height / floor_height)`, floored at zero.
    pub floor_count: u32,
    /// Yaw in degrees for each stacked floor copy above the base.
    pub copy_yaws: Vec<f32>,
    /// Yaw in degrees for the cap segment.
    pub top_yaw: f32,
    /// Height of the cap segment's base.
    pub top_y: f32,
}

/// Computes the stack for a footprint width and target height against an
/// archetype's template dimensions.
///
/// Rounding is `f32::round`, half away from zero: a height ratio of 0.49
/// yields no stacked copies while 0.5 yields one floor.
pub fn stack_layout(
    archetype: Archetype,
    footprint_width: f32,
    height: f32,
    dims: TemplateDims,
    rng: &mut StdRng,
) -> StackLayout {
    let scale = footprint_width / dims.reference_width;
    let floor_height = dims.floor_height * scale;

    let floor_count = (height / floor_height).round() as i32;
    let stacked_copies = (floor_count - 1).max(0) as u32;

    // only the square tower alternates its stacked floors
    let copy_yaws = (0..stacked_copies)
        .map(|_| match archetype {
            Archetype::Square => rng.random_range(0..=1) as f32 * 90.0,
            _ => 0.0,
        })
        .collect();

    // hexagonal caps only read correctly at half-turn steps
    let top_yaw = match archetype {
        Archetype::Hexagon => rng.random_range(0..=1) as f32 * 180.0,
        _ => rng.random_range(0..=3) as f32 * 90.0,
    };

    StackLayout {
        scale,
        floor_height,
        floor_count: floor_count.max(0) as u32,
        copy_yaws,
        top_yaw,
        top_y: (stacked_copies + 1) as f32 * floor_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const DIMS: TemplateDims = TemplateDims { reference_width: 2.0, floor_height: 1.0 };

    fn layout(archetype: Archetype, width: f32, height: f32) -> StackLayout {
        let mut rng = StdRng::seed_from_u64(13);
        stack_layout(archetype, width, height, DIMS, &mut rng)
    }

    #[test]
    fn scale_tracks_footprint_width() {
        let l = layout(Archetype::Square, 3.0, 4.0);
        assert!((l.scale - 1.5).abs() < 1e-6);
        assert!((l.floor_height - 1.5).abs() < 1e-6);
    }

    #[test]
    fn floor_count_rounds_half_away_from_zero() {
        // ratio 0.49 -> no floors beyond the base
        let l = layout(Archetype::Square, 2.0, 0.49);
        assert_eq!(l.floor_count, 0);
        assert!(l.copy_yaws.is_empty());
        assert!((l.top_y - 1.0).abs() < 1e-6);

        // ratio 0.5 -> one floor; geometry identical to the 0 case
        let l = layout(Archetype::Square, 2.0, 0.5);
        assert_eq!(l.floor_count, 1);
        assert!(l.copy_yaws.is_empty());
        assert!((l.top_y - 1.0).abs() < 1e-6);

        // ratio 1.5 -> two floors, one stacked copy
        let l = layout(Archetype::Square, 2.0, 1.5);
        assert_eq!(l.floor_count, 2);
        assert_eq!(l.copy_yaws.len(), 1);
        assert!((l.top_y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn negative_height_collapses_to_a_capped_base() {
        // unclamped centre falloff can hand a corner building a negative
        // height; the stack degrades to base floor plus cap
        let l = layout(Archetype::Pointy, 2.0, -3.0);
        assert_eq!(l.floor_count, 0);
        assert!(l.copy_yaws.is_empty());
        assert!((l.top_y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn top_y_sits_one_floor_above_the_last_copy() {
        let l = layout(Archetype::Square2, 2.0, 6.0);
        assert_eq!(l.floor_count, 6);
        assert_eq!(l.copy_yaws.len(), 5);
        assert!((l.top_y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn square_copies_alternate_quarter_turns() {
        let mut rng = StdRng::seed_from_u64(2);
        let l = stack_layout(Archetype::Square, 2.0, 40.0, DIMS, &mut rng);
        assert!(!l.copy_yaws.is_empty());
        assert!(l.copy_yaws.iter().all(|y| *y == 0.0 || *y == 90.0));
    }

    #[test]
    fn other_archetypes_keep_copies_unrotated() {
        for archetype in [Archetype::Pointy, Archetype::Hexagon, Archetype::Square2] {
            let mut rng = StdRng::seed_from_u64(2);
            let l = stack_layout(archetype, 2.0, 40.0, DIMS, &mut rng);
            assert!(l.copy_yaws.iter().all(|y| *y == 0.0));
        }
    }

    #[test]
    fn cap_yaw_steps_match_the_archetype() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let l = stack_layout(Archetype::Hexagon, 2.0, 5.0, DIMS, &mut rng);
            assert!(l.top_yaw == 0.0 || l.top_yaw == 180.0);

            let mut rng = StdRng::seed_from_u64(seed);
            let l = stack_layout(Archetype::Square, 2.0, 5.0, DIMS, &mut rng);
            assert!([0.0, 90.0, 180.0, 270.0].contains(&l.top_yaw));
        }
    }
}
