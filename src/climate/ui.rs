use crate::climate::events::{AccelerateTime, SimulationChanged};
use crate::climate::resources::{RayCallout, SimConfig, Simulation, WarningBanners};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use climatesim::state::validate_years;
use climatesim::thresholds::Banner;

/// Local UI state for the control panel.
#[derive(Resource)]
pub struct ControlPanelState {
    pub years_input: String,
    pub years_error: Option<String>,
}

impl Default for ControlPanelState {
    fn default() -> Self {
        Self {
            years_input: "100".to_string(),
            years_error: None,
        }
    }
}

pub fn control_panel(
    mut contexts: EguiContexts,
    config: Res<SimConfig>,
    mut sim: ResMut<Simulation>,
    mut panel: ResMut<ControlPanelState>,
    mut changed: MessageWriter<SimulationChanged>,
    mut accelerate: MessageWriter<AccelerateTime>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("control_panel")
        .default_width(350.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Greenhouse Effect");
                ui.add_space(10.0);

                ui.label(format!("Temperature: {:.1}°C", sim.0.temperature()));
                ui.label(format!("CO₂ level: {:.0} ppm", sim.0.co2_ppm()));
                ui.label(format!(
                    "Heat retention: {:.0}%",
                    sim.0.heat_intensity() * 100.0
                ));
                ui.label(format!("Time accelerated: {} years", sim.0.elapsed_years()));

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                let ranges = &config.0.simulation;
                let mut co2 = sim.0.co2_ppm();
                if ui
                    .add(
                        egui::Slider::new(
                            &mut co2,
                            ranges.co2_slider_min_ppm..=ranges.co2_slider_max_ppm,
                        )
                        .suffix(" ppm")
                        .text("CO₂ level"),
                    )
                    .changed()
                {
                    sim.0.set_co2_ppm(co2);
                    changed.write(SimulationChanged);
                }

                let mut heat_percent = sim.0.heat_intensity() * 100.0;
                if ui
                    .add(
                        egui::Slider::new(
                            &mut heat_percent,
                            ranges.heat_slider_min_percent..=ranges.heat_slider_max_percent,
                        )
                        .suffix("%")
                        .text("Heat retention"),
                    )
                    .changed()
                {
                    sim.0.set_heat_intensity(heat_percent / 100.0);
                    changed.write(SimulationChanged);
                }

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                ui.label("Fast-forward the simulation (10-1000 years):");
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut panel.years_input);
                    if ui.button("Accelerate time").clicked() {
                        match validate_years(&panel.years_input) {
                            Ok(years) => {
                                panel.years_error = None;
                                accelerate.write(AccelerateTime { years });
                            }
                            Err(error) => {
                                panel.years_error = Some(error.to_string());
                            }
                        }
                    }
                });
                if let Some(error) = &panel.years_error {
                    ui.colored_label(egui::Color32::RED, error);
                }
                ui.small("Each year raises CO₂ and temperature.");
            });
        });
}

/// Ticker banners top-center plus the latched named warnings, each with a
/// dismiss button.
pub fn warning_overlays(mut contexts: EguiContexts, mut banners: ResMut<WarningBanners>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if banners.hot_ticker.is_some() || banners.cold_ticker.is_some() {
        egui::Area::new(egui::Id::new("warning_tickers"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 16.0])
            .show(ctx, |ui| {
                if let Some(message) = banners.hot_ticker {
                    egui::Frame::popup(ui.style())
                        .fill(egui::Color32::from_rgba_unmultiplied(140, 20, 10, 230))
                        .show(ui, |ui| {
                            ui.colored_label(egui::Color32::WHITE, message);
                        });
                }
                if let Some(message) = banners.cold_ticker {
                    egui::Frame::popup(ui.style())
                        .fill(egui::Color32::from_rgba_unmultiplied(20, 60, 140, 230))
                        .show(ui, |ui| {
                            ui.colored_label(egui::Color32::WHITE, message);
                        });
                }
            });
    }

    let visible: Vec<Banner> = banners.visible().collect();
    if visible.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("named_warnings"))
        .anchor(egui::Align2::LEFT_BOTTOM, [16.0, -16.0])
        .show(ctx, |ui| {
            for banner in visible {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(banner.label());
                        if ui.small_button("✕").clicked() {
                            banners.dismiss(banner);
                        }
                    });
                });
            }
        });
}

/// Transient "SUN RAYS" label next to a clicked ray.
pub fn ray_callout(mut contexts: EguiContexts, callout: Res<RayCallout>, time: Res<Time>) {
    if time.elapsed_secs_f64() >= callout.shown_until_seconds {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    egui::Area::new(egui::Id::new("ray_callout"))
        .fixed_pos([callout.position.x + 20.0, callout.position.y - 20.0])
        .show(ctx, |ui| {
            ui.colored_label(egui::Color32::YELLOW, "SUN RAYS");
        });
}
