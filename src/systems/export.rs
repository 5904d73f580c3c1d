// saves the generated city as an obj file
// vertices are written in world space so the grouped hierarchy flattens
// into a coherent model

use bevy::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};

// export event
#[derive(Event)]
pub struct ExportEvent {
    pub filename: String,
}

// export all mesh entities in the scene
pub fn export_obj(
    meshes: &Assets<Mesh>,
    mesh_entities: &Query<(&Mesh3d, &GlobalTransform, Option<&Name>)>,
    filename: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Exported from City Generator")?;

    // OBJ indices are 1-based
    let mut vertex_offset = 1;
    let mut mesh_count = 0;

    for (mesh3d, transform, name) in mesh_entities.iter() {
        let Some(mesh) = meshes.get(&mesh3d.0) else {
            continue;
        };

        match name {
            Some(name) => writeln!(writer, "o {}", name.as_str())?,
            None => writeln!(writer, "o Mesh_{}", mesh_count)?,
        }

        // extract vertices from the mesh
        if let Some(positions) = mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            if let bevy::render::mesh::VertexAttributeValues::Float32x3(vertices) = positions {
                // write vertices, transformed into world space
                for vertex in vertices {
                    let world = transform.transform_point(Vec3::from_array(*vertex));
                    writeln!(writer, "v {} {} {}", world.x, world.y, world.z)?;
                }

                // write faces using the mesh indices
                if let Some(indices) = mesh.indices() {
                    match indices {
                        bevy::render::mesh::Indices::U16(indices) => {
                            for chunk in indices.chunks(3) {
                                if chunk.len() == 3 {
                                    writeln!(
                                        writer,
                                        "f {} {} {}",
                                        vertex_offset + chunk[0] as u32,
                                        vertex_offset + chunk[1] as u32,
                                        vertex_offset + chunk[2] as u32
                                    )?;
                                }
                            }
                        }
                        bevy::render::mesh::Indices::U32(indices) => {
                            for chunk in indices.chunks(3) {
                                if chunk.len() == 3 {
                                    writeln!(
                                        writer,
                                        "f {} {} {}",
                                        vertex_offset + chunk[0],
                                        vertex_offset + chunk[1],
                                        vertex_offset + chunk[2]
                                    )?;
                                }
                            }
                        }
                    }
                }

                vertex_offset += vertices.len() as u32;
                writeln!(writer)?;
                mesh_count += 1;
            }
        }
    }

    writer.flush()?;

    Ok(mesh_count)
}

// handle export events
pub fn handle_export(
    mut events: EventReader<ExportEvent>,
    meshes: Res<Assets<Mesh>>,
    mesh_entities: Query<(&Mesh3d, &GlobalTransform, Option<&Name>)>,
) {
    for event in events.read() {
        match export_obj(&meshes, &mesh_entities, &event.filename) {
            Ok(count) => {
                info!("exported {} meshes to {}", count, event.filename);
            }
            Err(e) => {
                error!("export failed: {}", e);
            }
        }
    }
}
