use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use crate::systems::city::{ClearEvent, GenerationProgress, Params, RegenerateEvent, Seed};
use crate::systems::export::ExportEvent;
use crate::systems::grid::GridConfig;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app.add_systems(EguiPrimaryContextPass, (ui_main, fps)); // UI rendering here
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    current_seed: Res<Seed>,
    mut params: ResMut<Params>,
    progress: Res<GenerationProgress>,
    mut grid_config: ResMut<GridConfig>,
    mut regen_events: EventWriter<RegenerateEvent>,
    mut clear_events: EventWriter<ClearEvent>,
    mut export_events: EventWriter<ExportEvent>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("config_panel")
            .default_width(220.0)
            .min_width(250.0)
            .max_width(400.0)
            .resizable(true)
            .show(ctx, |ui| {
                let mut regenerate = false;

                // camera
                ui.label("Camera: ");
                ui.label("WASD - Move");
                ui.label("Scroll - Zoom");
                ui.label("MMB - Rotate");

                ui.separator();

                ui.label("City Generation:");

                // seed
                egui::CollapsingHeader::new("Seed")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.label(format!("Current: {}", current_seed.0));
                        if ui.button("Generate")
                            .on_hover_text("Generate a new city from a fresh seed")
                            .clicked() {
                            let new_seed = rand::random();
                            regen_events.write(RegenerateEvent { seed: new_seed });
                        }
                    });

                // building styles
                egui::CollapsingHeader::new("Building Types")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui.checkbox(&mut params.square, "Square")
                            .on_hover_text("Flat towers with penthouse caps")
                            .changed();
                        regenerate |= ui.checkbox(&mut params.pointy, "Pointy")
                            .on_hover_text("Towers topped with a spire")
                            .changed();
                        regenerate |= ui.checkbox(&mut params.hexagon, "Hexagon")
                            .on_hover_text("Six-sided towers")
                            .changed();
                        regenerate |= ui.checkbox(&mut params.square2, "Square2")
                            .on_hover_text("Rectangular slabs with overhanging roofs")
                            .changed();
                    });

                // placement parameters
                egui::CollapsingHeader::new("Placement")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui.add(egui::Slider::new(&mut params.building_count, 1..=200)
                            .text("Number of Buildings"))
                            .on_hover_text("How many placements to attempt. Crowded maps may place fewer.")
                            .changed();
                        regenerate |= ui.add(egui::Slider::new(&mut params.map_width, 20.0..=100.0)
                            .text("Map Width (m)")
                            .suffix(" m"))
                            .on_hover_text("Side length of the square placement area.")
                            .changed();
                        regenerate |= ui.add(egui::Slider::new(&mut params.min_gap_width, 0.0..=5.0)
                            .text("Gap Width min (m)")
                            .suffix(" m"))
                            .on_hover_text("Extra clearance required between neighbouring buildings.")
                            .changed();
                    });

                // building dimensions
                egui::CollapsingHeader::new("Building Dimensions")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui.add(egui::Slider::new(&mut params.min_height, 1.0..=5.0)
                            .text("Height min (m)")
                            .suffix(" m"))
                            .changed();
                        regenerate |= ui.add(egui::Slider::new(&mut params.max_height, 5.0..=12.0)
                            .text("Height max (m)")
                            .suffix(" m"))
                            .changed();
                        regenerate |= ui.add(egui::Slider::new(&mut params.min_width, 1.0..=5.0)
                            .text("Width min (m)")
                            .suffix(" m"))
                            .changed();
                        regenerate |= ui.add(egui::Slider::new(&mut params.max_width, 3.0..=8.0)
                            .text("Width max (m)")
                            .suffix(" m"))
                            .changed();
                    });

                // centre falloff toggles
                egui::CollapsingHeader::new("Centre Falloff")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui.checkbox(&mut params.centre_height, "Centre Height")
                            .on_hover_text("Buildings get taller towards the map origin")
                            .changed();
                        regenerate |= ui.checkbox(&mut params.centre_width, "Centre Width")
                            .on_hover_text("Buildings get wider towards the map origin")
                            .changed();
                        regenerate |= ui.checkbox(&mut params.centre_cluster, "Centre Cluster")
                            .on_hover_text("Concentrates placements instead of spreading them evenly")
                            .changed();
                    });

                ui.separator();

                // config validity indicator
                ui.horizontal(|ui| {
                    ui.label("Config valid:");
                    match params.to_config().validate() {
                        Ok(()) => {
                            ui.label(egui::RichText::new("Valid")
                                .color(egui::Color32::from_rgb(34, 139, 34)));
                        }
                        Err(err) => {
                            ui.label(egui::RichText::new("Invalid")
                                .color(egui::Color32::from_rgb(178, 34, 34)))
                                .on_hover_text(err.to_string());
                        }
                    }
                });

                // progress of the last run
                ui.add(
                    egui::ProgressBar::new(progress.fraction())
                        .text(format!("{} / {}", progress.attempted, progress.total)),
                );

                ui.separator();

                ui.checkbox(&mut grid_config.enabled, "Show Grid");

                ui.separator();

                // export and delete
                ui.horizontal(|ui| {
                    if ui.button("Export OBJ")
                        .on_hover_text("Export the scene as an OBJ file, current directory")
                        .clicked() {
                        let timestamp = std::time::SystemTime::now()
                            .duration_since(std::time::UNIX_EPOCH)
                            .map(|d| d.as_secs())
                            .unwrap_or(0);
                        let filename = format!("city_export_{}.obj", timestamp);
                        export_events.write(ExportEvent { filename });
                    }

                    let delete_button = egui::Button::new("Delete City")
                        .fill(egui::Color32::from_rgb(130, 22, 22));
                    if ui.add(delete_button)
                        .on_hover_text("Remove the city and everything under it")
                        .clicked() {
                        clear_events.write(ClearEvent);
                    }
                });

                ui.separator();
                ui.label("ESC - Exit");

                // trigger regeneration on any parameter change
                if regenerate {
                    regen_events.write(RegenerateEvent { seed: current_seed.0 });
                }
            });
    }
}

fn fps(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                        if let Some(fps) = fps_diagnostic.smoothed() {
                            ui.label(egui::RichText::new(format!("{:.0}", fps))
                                .size(26.0)
                                .color(egui::Color32::WHITE));
                        }
                    }
                });
            });
    }
}
