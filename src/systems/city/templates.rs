// archetype template meshes
// each building style owns a repeatable floor segment and a cap segment;
// stack geometry is always computed from the measured floor bounds

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;

use super::plan::{Archetype, CityGenError, TemplateDims};

/// Mesh handles for one archetype.
pub struct BuildingTemplate {
    pub floor: Handle<Mesh>,
    pub top: Handle<Mesh>,
}

/// Registry mapping archetypes to their template meshes and measured
/// dimensions. Built once at startup; lookups for absent archetypes are
/// the fatal [`CityGenError::TemplateNotFound`].
#[derive(Resource, Default)]
pub struct TemplateRegistry {
    templates: HashMap<Archetype, BuildingTemplate>,
    dims: HashMap<Archetype, TemplateDims>,
}

impl TemplateRegistry {
    pub fn insert(
        &mut self,
        archetype: Archetype,
        floor: Handle<Mesh>,
        top: Handle<Mesh>,
        dims: TemplateDims,
    ) {
        self.templates.insert(archetype, BuildingTemplate { floor, top });
        self.dims.insert(archetype, dims);
    }

    pub fn get(&self, archetype: Archetype) -> Result<&BuildingTemplate, CityGenError> {
        self.templates
            .get(&archetype)
            .ok_or(CityGenError::TemplateNotFound(archetype))
    }

    pub fn dims(&self, archetype: Archetype) -> Result<TemplateDims, CityGenError> {
        self.dims
            .get(&archetype)
            .copied()
            .ok_or(CityGenError::TemplateNotFound(archetype))
    }

    /// Dimension table for a run's enabled archetypes. Fails on the first
    /// missing template so generation aborts before any entity is spawned.
    pub fn dims_for(
        &self,
        archetypes: &[Archetype],
    ) -> Result<HashMap<Archetype, TemplateDims>, CityGenError> {
        archetypes
            .iter()
            .map(|archetype| Ok((*archetype, self.dims(*archetype)?)))
            .collect()
    }
}

pub fn setup_templates(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let mut registry = TemplateRegistry::default();

    for archetype in Archetype::ALL {
        let (floor, top) = template_segments(archetype);
        match measure(&floor) {
            Some(dims) => {
                registry.insert(archetype, meshes.add(floor), meshes.add(top), dims);
            }
            None => {
                // leave the archetype unregistered; runs that enable it
                // will abort with TemplateNotFound
                warn!("degenerate floor segment for {}", archetype.label());
            }
        }
    }

    commands.insert_resource(registry);
}

// template geometry per style, bases resting on y = 0
fn template_segments(archetype: Archetype) -> (Mesh, Mesh) {
    match archetype {
        Archetype::Square => (
            grounded(Mesh::from(Cuboid::new(2.0, 1.0, 2.0)), 1.0),
            // stepped-back penthouse block
            grounded(Mesh::from(Cuboid::new(1.4, 0.6, 1.4)), 0.6),
        ),
        Archetype::Pointy => (
            grounded(Mesh::from(Cuboid::new(2.0, 1.2, 2.0)), 1.2),
            // four-sided spire
            grounded(Cone { radius: 1.4, height: 1.6 }.mesh().resolution(4).build(), 1.6),
        ),
        Archetype::Hexagon => (
            grounded(Cylinder::new(1.2, 1.0).mesh().resolution(6).build(), 1.0),
            grounded(Cylinder::new(0.9, 0.5).mesh().resolution(6).build(), 0.5),
        ),
        Archetype::Square2 => (
            grounded(Mesh::from(Cuboid::new(2.4, 0.8, 1.6)), 0.8),
            // overhanging slab roof
            grounded(Mesh::from(Cuboid::new(2.6, 0.3, 1.8)), 0.3),
        ),
    }
}

// primitive builders centre their meshes; lift so the base sits on the ground
fn grounded(mesh: Mesh, height: f32) -> Mesh {
    mesh.translated_by(Vec3::new(0.0, height / 2.0, 0.0))
}

// dimensions come from the measured mesh bounds, not the construction
// parameters, so replacement template geometry is picked up as-is
fn measure(floor: &Mesh) -> Option<TemplateDims> {
    let aabb = floor.compute_aabb()?;
    let reference_width = aabb.half_extents.x * 2.0;
    let floor_height = aabb.half_extents.y * 2.0;
    (reference_width > f32::EPSILON && floor_height > f32::EPSILON)
        .then_some(TemplateDims { reference_width, floor_height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_archetype_measures_cleanly() {
        for archetype in Archetype::ALL {
            let (floor, _top) = template_segments(archetype);
            let dims = measure(&floor).expect("floor segment should have bounds");
            assert!(dims.reference_width > 0.0);
            assert!(dims.floor_height > 0.0);
        }
    }

    #[test]
    fn square_floor_measures_its_construction_size() {
        let (floor, _) = template_segments(Archetype::Square);
        let dims = measure(&floor).unwrap();
        assert!((dims.reference_width - 2.0).abs() < 1e-4);
        assert!((dims.floor_height - 1.0).abs() < 1e-4);
    }

    #[test]
    fn grounded_meshes_rest_on_the_origin_plane() {
        for archetype in Archetype::ALL {
            let (floor, top) = template_segments(archetype);
            for mesh in [floor, top] {
                let aabb = mesh.compute_aabb().unwrap();
                let min_y = aabb.center.y - aabb.half_extents.y;
                assert!(min_y.abs() < 1e-4, "{} segment floats at {min_y}", archetype.label());
            }
        }
    }

    #[test]
    fn missing_archetype_is_a_template_error() {
        let registry = TemplateRegistry::default();
        assert_eq!(
            registry.dims(Archetype::Pointy).unwrap_err(),
            CityGenError::TemplateNotFound(Archetype::Pointy)
        );
        assert!(registry.dims_for(&[Archetype::Square]).is_err());
    }
}
