// pure planning core
// everything here is deterministic in (config, template dims, seed) and
// touches no scene state, so whole runs replay exactly

use std::collections::HashMap;

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use thiserror::Error;

pub mod placement;
pub mod rng;
pub mod sizing;
pub mod stacking;

/// The four building styles, each backed by a floor and a cap template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    Square,
    Pointy,
    Hexagon,
    Square2,
}

impl Archetype {
    pub const ALL: [Archetype; 4] =
        [Archetype::Square, Archetype::Pointy, Archetype::Hexagon, Archetype::Square2];

    pub fn label(self) -> &'static str {
        match self {
            Archetype::Square => "Square",
            Archetype::Pointy => "Pointy",
            Archetype::Hexagon => "Hexagon",
            Archetype::Square2 => "Square2",
        }
    }
}

/// Immutable snapshot of one generation run's parameters.
#[derive(Clone, Debug)]
pub struct CityConfig {
    pub map_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub min_gap_width: f32,
    pub centre_height: bool,
    pub centre_width: bool,
    pub centre_cluster: bool,
    pub archetypes: Vec<Archetype>,
    pub building_count: usize,
}

impl CityConfig {
    pub fn validate(&self) -> Result<(), CityGenError> {
        if self.archetypes.is_empty() {
            return Err(CityGenError::InvalidConfig("no building types enabled".into()));
        }
        if self.map_width <= 0.0 {
            return Err(CityGenError::InvalidConfig(format!(
                "map width {} must be positive",
                self.map_width
            )));
        }
        if self.min_width > self.max_width {
            return Err(CityGenError::InvalidConfig(format!(
                "width minimum {} exceeds maximum {}",
                self.min_width, self.max_width
            )));
        }
        if self.min_height > self.max_height {
            return Err(CityGenError::InvalidConfig(format!(
                "height minimum {} exceeds maximum {}",
                self.min_height, self.max_height
            )));
        }
        Ok(())
    }
}

/// A building's accepted ground position and width, map-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// Measured template geometry a stack is computed against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemplateDims {
    /// Floor segment bounding-box width.
    pub reference_width: f32,
    /// Floor segment bounding-box height.
    pub floor_height: f32,
}

/// One fully planned building, ready to spawn.
#[derive(Clone, Debug)]
pub struct BuildingPlan {
    /// Sequential id, 1-based in acceptance order.
    pub id: u32,
    pub footprint: Footprint,
    pub height: f32,
    pub archetype: Archetype,
    pub stack: stacking::StackLayout,
}

/// Output of a planning run. `buildings` can be shorter than `attempted`
/// when placements exhaust their retry budget.
#[derive(Clone, Debug)]
pub struct CityPlan {
    pub seed: u64,
    pub buildings: Vec<BuildingPlan>,
    pub attempted: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CityGenError {
    #[error("no free position found within {attempts} attempts")]
    PlacementExhausted { attempts: u32 },
    #[error("template meshes missing for building type {}", .0.label())]
    TemplateNotFound(Archetype),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Plans a whole city: one sample/size/stack pass per requested building.
///
/// `on_attempt` fires once per building attempt with (index, total),
/// whether or not the placement succeeds. Exhausted placements are skipped
/// and the run continues; config and template problems abort it.
pub fn generate_plan(
    config: &CityConfig,
    seed: u64,
    dims: &HashMap<Archetype, TemplateDims>,
    mut on_attempt: impl FnMut(usize, usize),
) -> Result<CityPlan, CityGenError> {
    config.validate()?;
    for archetype in &config.archetypes {
        if !dims.contains_key(archetype) {
            return Err(CityGenError::TemplateNotFound(*archetype));
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut placed: Vec<Footprint> = Vec::with_capacity(config.building_count);
    let mut buildings: Vec<BuildingPlan> = Vec::with_capacity(config.building_count);

    for i in 0..config.building_count {
        on_attempt(i + 1, config.building_count);

        let footprint = match placement::sample_footprint(config, &placed, &mut rng) {
            Ok(footprint) => footprint,
            Err(err) => {
                warn!("building {}: {err}", i + 1);
                continue;
            }
        };

        let height = sizing::compute_height(footprint.x, footprint.y, config, &mut rng);

        // style is pure chance among the enabled set, independent of the
        // size and position draws
        let archetype = config.archetypes[rng.random_range(0..config.archetypes.len())];
        let stack = stacking::stack_layout(archetype, footprint.width, height, dims[&archetype], &mut rng);

        placed.push(footprint);
        buildings.push(BuildingPlan {
            id: buildings.len() as u32 + 1,
            footprint,
            height,
            archetype,
            stack,
        });
    }

    Ok(CityPlan { seed, buildings, attempted: config.building_count })
}
