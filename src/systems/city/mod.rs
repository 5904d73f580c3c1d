// this is the entry point for the city generation plugin
use bevy::prelude::*;

use crate::config::*;

pub mod city;
pub mod plan;
pub mod templates;

use plan::Archetype;

// resources
#[derive(Resource)]
pub struct Seed(pub u64);

// generation parameters, mutated by the UI and snapshotted into a
// CityConfig at the start of every run
#[derive(Resource)]
pub struct Params {
    pub building_count: usize,
    pub map_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub min_gap_width: f32,
    pub centre_height: bool,
    pub centre_width: bool,
    pub centre_cluster: bool,
    // enabled building types
    pub square: bool,
    pub pointy: bool,
    pub hexagon: bool,
    pub square2: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            building_count: NUM_BUILDINGS,
            map_width: MAP_WIDTH,
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,
            min_width: MIN_WIDTH,
            max_width: MAX_WIDTH,
            min_gap_width: MIN_GAP_WIDTH,
            centre_height: CENTRE_HEIGHT,
            centre_width: CENTRE_WIDTH,
            centre_cluster: CENTRE_CLUSTER,
            square: true,
            pointy: true,
            hexagon: true,
            square2: true,
        }
    }
}

impl Params {
    pub fn to_config(&self) -> plan::CityConfig {
        let toggles = [
            (Archetype::Square, self.square),
            (Archetype::Pointy, self.pointy),
            (Archetype::Hexagon, self.hexagon),
            (Archetype::Square2, self.square2),
        ];
        plan::CityConfig {
            map_width: self.map_width,
            min_height: self.min_height,
            max_height: self.max_height,
            min_width: self.min_width,
            max_width: self.max_width,
            min_gap_width: self.min_gap_width,
            centre_height: self.centre_height,
            centre_width: self.centre_width,
            centre_cluster: self.centre_cluster,
            archetypes: toggles
                .into_iter()
                .filter_map(|(archetype, enabled)| enabled.then_some(archetype))
                .collect(),
            building_count: self.building_count,
        }
    }
}

// per-attempt progress of the most recent run, shown by the UI
#[derive(Resource, Default)]
pub struct GenerationProgress {
    pub attempted: usize,
    pub total: usize,
}

impl GenerationProgress {
    pub fn reset(&mut self, total: usize) {
        self.attempted = 0;
        self.total = total;
    }

    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.attempted as f32 / self.total as f32
        }
    }
}

// event for regeneration
#[derive(Event)]
pub struct RegenerateEvent {
    pub seed: u64,
}

// event for deleting the current city
#[derive(Event)]
pub struct ClearEvent;

// main plugin for generation
pub struct CityGenerationPlugin;

impl Plugin for CityGenerationPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(Seed(INITIAL_SEED))
            .insert_resource(Params::default())
            .insert_resource(GenerationProgress::default())

            .add_event::<RegenerateEvent>()
            .add_event::<ClearEvent>()
            .add_event::<crate::systems::export::ExportEvent>()

            // templates must exist before the first generation pass
            .add_systems(Startup, (templates::setup_templates, request_initial_city).chain())
            .add_systems(Update, (
                city::handle_regeneration,
                city::handle_clear,
                crate::systems::export::handle_export,
            ));
    }
}

// queue the startup city; the regeneration handler picks it up on the
// first update frame
fn request_initial_city(seed: Res<Seed>, mut events: EventWriter<RegenerateEvent>) {
    events.write(RegenerateEvent { seed: seed.0 });
}
