// full-run scenarios over the planning core

use std::collections::HashMap;

use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::systems::city::Params;
use crate::systems::city::plan::{
    generate_plan, placement, Archetype, CityConfig, CityGenError, TemplateDims,
};

fn dims() -> HashMap<Archetype, TemplateDims> {
    Archetype::ALL
        .iter()
        .map(|a| (*a, TemplateDims { reference_width: 2.0, floor_height: 1.0 }))
        .collect()
}

// the reference scenario: uniform everything, square towers only
fn uniform_config(count: usize) -> CityConfig {
    CityConfig {
        map_width: 40.0,
        min_height: 3.0,
        max_height: 8.0,
        min_width: 2.0,
        max_width: 5.0,
        min_gap_width: 0.0,
        centre_height: false,
        centre_width: false,
        centre_cluster: false,
        archetypes: vec![Archetype::Square],
        building_count: count,
    }
}

#[test]
fn uniform_run_places_all_fifty_buildings_within_bounds() {
    let config = uniform_config(50);
    let plan = generate_plan(&config, 42, &dims(), |_, _| {}).unwrap();

    assert_eq!(plan.attempted, 50);
    assert_eq!(plan.buildings.len(), 50);

    for building in &plan.buildings {
        // uniform draws stay inside the configured ranges; the centre
        // jitter factor never applies here but bounds its worst case
        assert!(building.footprint.width >= 2.0 - 1e-4);
        assert!(building.footprint.width <= 5.0 * 1.2 + 1e-4);
        assert!(building.height >= 3.0 - 1e-4);
        assert!(building.height <= 8.0 * 1.2 + 1e-4);
        assert_eq!(building.archetype, Archetype::Square);

        assert!(building.footprint.x.abs() <= 20.0 + 1e-3);
        assert!(building.footprint.y.abs() <= 20.0 + 1e-3);
    }

    // no two accepted footprints overlap under the axis-aligned test
    for i in 0..plan.buildings.len() {
        for j in (i + 1)..plan.buildings.len() {
            let a = &plan.buildings[i].footprint;
            let b = &plan.buildings[j].footprint;
            assert!(
                !placement::overlaps(a, b, config.min_gap_width),
                "buildings {} and {} overlap",
                plan.buildings[i].id,
                plan.buildings[j].id
            );
        }
    }
}

#[test]
fn crowded_run_places_fewer_buildings_than_requested() {
    let config = CityConfig {
        map_width: 3.0,
        min_width: 5.0,
        max_width: 5.0,
        min_gap_width: 2.0,
        building_count: 20,
        ..uniform_config(20)
    };

    let plan = generate_plan(&config, 1, &dims(), |_, _| {}).unwrap();
    assert_eq!(plan.attempted, 20);
    assert!(
        plan.buildings.len() < 20,
        "a 3m map cannot hold twenty 5m buildings, got {}",
        plan.buildings.len()
    );

    // survivors still satisfy the separation property
    for i in 0..plan.buildings.len() {
        for j in (i + 1)..plan.buildings.len() {
            assert!(!placement::overlaps(
                &plan.buildings[i].footprint,
                &plan.buildings[j].footprint,
                config.min_gap_width
            ));
        }
    }
}

#[test]
fn height_distribution_ignores_position_when_falloff_is_off() {
    // compare heights sampled near the centre against heights sampled
    // near the edge; without centre falloff the ranges must agree
    let config = uniform_config(120);
    let plan = generate_plan(&config, 7, &dims(), |_, _| {}).unwrap();

    let (near, far): (Vec<_>, Vec<_>) = plan
        .buildings
        .iter()
        .partition(|b| (b.footprint.x.powi(2) + b.footprint.y.powi(2)).sqrt() < 10.0);
    assert!(near.len() > 5 && far.len() > 5, "partition too lopsided to compare");

    let mean = |group: &[&crate::systems::city::plan::BuildingPlan]| {
        group.iter().map(|b| b.height).sum::<f32>() / group.len() as f32
    };
    let near_mean = mean(&near);
    let far_mean = mean(&far);

    // both means sit around the middle of [3, 8]; a centre falloff would
    // separate them by several meters
    assert!((near_mean - far_mean).abs() < 1.0, "means {near_mean} vs {far_mean}");
}

#[test]
fn centre_height_produces_taller_buildings_near_the_origin() {
    let config = CityConfig { centre_height: true, ..uniform_config(120) };
    let plan = generate_plan(&config, 7, &dims(), |_, _| {}).unwrap();

    let (near, far): (Vec<_>, Vec<_>) = plan
        .buildings
        .iter()
        .partition(|b| (b.footprint.x.powi(2) + b.footprint.y.powi(2)).sqrt() < 10.0);
    assert!(near.len() > 5 && far.len() > 5);

    let mean = |group: &[&crate::systems::city::plan::BuildingPlan]| {
        group.iter().map(|b| b.height).sum::<f32>() / group.len() as f32
    };
    assert!(
        mean(&near) > mean(&far) + 1.0,
        "expected a clear falloff, got {} vs {}",
        mean(&near),
        mean(&far)
    );
}

#[test]
fn default_params_round_trip_into_a_valid_config() {
    let params = Params::default();
    let config = params.to_config();
    assert!(config.validate().is_ok());
    assert_eq!(config.archetypes, Archetype::ALL.to_vec());
    assert_eq!(config.building_count, crate::config::NUM_BUILDINGS);
}

#[test]
fn disabling_every_archetype_invalidates_the_config() {
    let params = Params {
        square: false,
        pointy: false,
        hexagon: false,
        square2: false,
        ..Params::default()
    };
    assert!(matches!(
        params.to_config().validate(),
        Err(CityGenError::InvalidConfig(_))
    ));
}

#[test]
fn exhaustion_error_reports_the_retry_budget() {
    let err = CityGenError::PlacementExhausted { attempts: MAX_PLACEMENT_ATTEMPTS };
    assert_eq!(err.to_string(), "no free position found within 10 attempts");
}

#[test]
fn stacked_geometry_is_consistent_per_building() {
    let config = CityConfig {
        centre_height: true,
        centre_width: true,
        centre_cluster: true,
        archetypes: Archetype::ALL.to_vec(),
        ..uniform_config(80)
    };
    let plan = generate_plan(&config, 3, &dims(), |_, _| {}).unwrap();
    assert!(!plan.buildings.is_empty());

    for building in &plan.buildings {
        let stack = &building.stack;
        // scale derives from footprint width over the 2m template
        assert!((stack.scale - building.footprint.width / 2.0).abs() < 1e-4);
        // cap always sits exactly one floor above the last stacked copy
        let expected_top = (stack.copy_yaws.len() as f32 + 1.0) * stack.floor_height;
        assert!((stack.top_y - expected_top).abs() < 1e-4);
        // stacked copies are floor_count - 1, floored at zero
        assert_eq!(
            stack.copy_yaws.len() as u32,
            stack.floor_count.saturating_sub(1)
        );
    }
}
