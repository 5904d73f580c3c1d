use bevy::prelude::*;
use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};

use crate::config::{GRID_MAJOR_EVERY, GRID_MARGIN, GRID_SPACING};
use crate::systems::city::Params;

// reference grid covering the map area
// gives a sense of scale against the slider values, which are in meters
pub struct GridPlugin;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct GridGizmoGroup;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(GridConfig::default())
            .init_gizmo_group::<GridGizmoGroup>()
            .add_systems(Startup, setup_gizmos)
            .add_systems(Update, draw_grid);
    }
}

// settings as a resource allows for runtime modifications
#[derive(Resource)]
pub struct GridConfig {
    pub spacing: f32,
    pub major_every: u32,
    pub margin: f32,
    pub major_color: Color,
    pub minor_color: Color,
    pub enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: GRID_SPACING,
            major_every: GRID_MAJOR_EVERY,
            margin: GRID_MARGIN,
            major_color: Color::srgba(0.5, 0.5, 0.5, 0.15),
            minor_color: Color::srgba(0.3, 0.3, 0.3, 0.05),
            enabled: true,
        }
    }
}

fn setup_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<GridGizmoGroup>();
    config.depth_bias = 0.1; // render depth
}

fn draw_grid(
    mut gizmos: Gizmos<GridGizmoGroup>,
    config: Res<GridConfig>,
    params: Res<Params>,
) {
    if !config.enabled {
        return;
    }

    // track the ground plane plus a margin, snapped to whole lines
    let extent = (params.map_width + params.max_width) / 2.0 + config.margin;
    let line_count = (extent / config.spacing).ceil() as i32;
    let edge = line_count as f32 * config.spacing;

    for i in -line_count..=line_count {
        let offset = i as f32 * config.spacing;
        let color = if i.rem_euclid(config.major_every as i32) == 0 {
            config.major_color
        } else {
            config.minor_color
        };

        gizmos.line(
            Vec3::new(offset, -0.01, -edge),
            Vec3::new(offset, -0.01, edge),
            color,
        );
        gizmos.line(
            Vec3::new(-edge, -0.01, offset),
            Vec3::new(edge, -0.01, offset),
            color,
        );
    }
}
