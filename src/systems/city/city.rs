use std::collections::HashMap;

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

use super::*;
use super::plan::{Archetype, BuildingPlan, CityConfig, CityGenError, CityPlan, Footprint};
use super::templates::TemplateRegistry;

// entity hierarchy components
#[derive(Component)]
pub struct City {
    pub seed: u64,
}

#[derive(Component)]
pub struct ArchetypeCollection(pub Archetype);

#[derive(Component)]
pub struct Building {
    pub id: u32,
    pub archetype: Archetype,
    pub footprint: Footprint,
    pub height: f32,
    pub floor_count: u32,
    pub total_height: f32,
}

/// Validates config and templates, then runs the planner. No scene state
/// is touched, so a failure here leaves any existing city intact.
pub fn plan_city(
    config: &CityConfig,
    registry: &TemplateRegistry,
    seed: u64,
    progress: &mut GenerationProgress,
) -> Result<CityPlan, CityGenError> {
    config.validate()?;
    let dims = registry.dims_for(&config.archetypes)?;

    progress.reset(config.building_count);
    plan::generate_plan(config, seed, &dims, |attempted, total| {
        progress.attempted = attempted;
        progress.total = total;
    })
}

/// Spawns a planned city: ground plane and per-archetype collections under
/// a single named root, one grouped entity per building.
pub fn spawn_city(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    registry: &TemplateRegistry,
    config: &CityConfig,
    city_plan: &CityPlan,
) -> Result<(), CityGenError> {
    let city_entity = commands
        .spawn((
            City { seed: city_plan.seed },
            Name::new("City"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    // ground plane spans the map plus the widest configured building
    let ground_size = config.map_width + config.max_width;
    let ground = commands
        .spawn((
            Name::new("Ground"),
            Mesh3d(meshes.add(Plane3d::default().mesh().size(ground_size, ground_size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.16, 0.16, 0.18),
                perceptual_roughness: 1.0,
                ..default()
            })),
            Transform::default(),
        ))
        .id();
    commands.entity(city_entity).add_children(&[ground]);

    // one collection group per enabled archetype
    let mut collections: HashMap<Archetype, Entity> = HashMap::new();
    for archetype in &config.archetypes {
        let collection = commands
            .spawn((
                ArchetypeCollection(*archetype),
                Name::new(format!("{}_Buildings", archetype.label())),
                Transform::default(),
                Visibility::default(),
            ))
            .id();
        commands.entity(city_entity).add_children(&[collection]);
        collections.insert(*archetype, collection);
    }

    // separate stream for shading so the plan stays seed-for-seed stable
    let mut shade_rng = StdRng::seed_from_u64(city_plan.seed.wrapping_add(1));

    for building_plan in &city_plan.buildings {
        let entity = spawn_building(commands, materials, registry, building_plan, &mut shade_rng)?;
        if let Some(collection) = collections.get(&building_plan.archetype) {
            commands.entity(*collection).add_children(&[entity]);
        }
    }

    Ok(())
}

// one building: base floor, stacked copies, cap, grouped and moved to its
// footprint (map y runs along world z)
fn spawn_building(
    commands: &mut Commands,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    registry: &TemplateRegistry,
    building_plan: &BuildingPlan,
    shade_rng: &mut StdRng,
) -> Result<Entity, CityGenError> {
    let template = registry.get(building_plan.archetype)?;
    let stack = &building_plan.stack;

    let building_entity = commands
        .spawn((
            Building {
                id: building_plan.id,
                archetype: building_plan.archetype,
                footprint: building_plan.footprint,
                height: building_plan.height,
                floor_count: stack.floor_count,
                total_height: stack.top_y,
            },
            Name::new(format!(
                "Building_{}_{}",
                building_plan.id,
                building_plan.archetype.label()
            )),
            Transform::from_xyz(building_plan.footprint.x, 0.0, building_plan.footprint.y),
            Visibility::default(),
        ))
        .id();

    // concrete-ish tint variations
    let base_r = (0.55 + shade_rng.random_range(-0.06_f32..0.06_f32)).clamp(0.0, 1.0);
    let base_g = (0.55 + shade_rng.random_range(-0.06_f32..0.06_f32)).clamp(0.0, 1.0);
    let base_b = (0.62 + shade_rng.random_range(-0.06_f32..0.06_f32)).clamp(0.0, 1.0);
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(base_r, base_g, base_b),
        alpha_mode: AlphaMode::Opaque,
        ..default()
    });

    let mut segments = Vec::with_capacity(stack.copy_yaws.len() + 2);

    // base floor segment
    segments.push(
        commands
            .spawn((
                Mesh3d(template.floor.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_scale(Vec3::splat(stack.scale)),
            ))
            .id(),
    );

    // stacked floor copies
    for (i, yaw) in stack.copy_yaws.iter().enumerate() {
        segments.push(
            commands
                .spawn((
                    Mesh3d(template.floor.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform {
                        translation: Vec3::new(0.0, (i as f32 + 1.0) * stack.floor_height, 0.0),
                        rotation: Quat::from_rotation_y(yaw.to_radians()),
                        scale: Vec3::splat(stack.scale),
                    },
                ))
                .id(),
        );
    }

    // cap segment
    segments.push(
        commands
            .spawn((
                Mesh3d(template.top.clone()),
                MeshMaterial3d(material),
                Transform {
                    translation: Vec3::new(0.0, stack.top_y, 0.0),
                    rotation: Quat::from_rotation_y(stack.top_yaw.to_radians()),
                    scale: Vec3::splat(stack.scale),
                },
            ))
            .id(),
    );

    commands.entity(building_entity).add_children(&segments);

    Ok(building_entity)
}

pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    registry: Res<TemplateRegistry>,
    mut seed: ResMut<Seed>,
    params: Res<Params>,
    mut progress: ResMut<GenerationProgress>,
    query: Query<Entity, With<City>>,
) {
    for event in events.read() {
        seed.0 = event.seed;
        let config = params.to_config();

        // plan first: a rejected config or missing template must not
        // destroy the existing city
        let city_plan = match plan_city(&config, &registry, event.seed, &mut progress) {
            Ok(city_plan) => city_plan,
            Err(err) => {
                error!("city generation rejected: {err}");
                continue;
            }
        };

        // replace the previous city
        for entity in query.iter() {
            commands.entity(entity).try_despawn();
        }

        match spawn_city(&mut commands, &mut meshes, &mut materials, &registry, &config, &city_plan) {
            Ok(()) => info!(
                "generated {} of {} buildings (seed {})",
                city_plan.buildings.len(),
                city_plan.attempted,
                city_plan.seed
            ),
            Err(err) => error!("city generation failed: {err}"),
        }
    }
}

pub fn handle_clear(
    mut commands: Commands,
    mut events: EventReader<ClearEvent>,
    query: Query<Entity, With<City>>,
) {
    for _event in events.read() {
        if query.is_empty() {
            info!("nothing to delete");
        }
        // children are despawned along with the root
        for entity in query.iter() {
            commands.entity(entity).try_despawn();
        }
    }
}
