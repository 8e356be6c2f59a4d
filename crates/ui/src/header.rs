//! Top bar: title, feed status, and the pause/resume control.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::alerts::ActiveAlerts;
use simulation::snapshot::TrafficSnapshot;
use simulation::stream::StreamControl;

fn status_color(streaming: bool) -> egui::Color32 {
    if streaming {
        egui::Color32::from_rgb(74, 222, 128)
    } else {
        egui::Color32::from_rgb(248, 113, 113)
    }
}

fn status_label(streaming: bool) -> &'static str {
    if streaming {
        "Streaming"
    } else {
        "Paused"
    }
}

fn toggle_label(streaming: bool) -> &'static str {
    if streaming {
        "Pause Feed"
    } else {
        "Resume Feed"
    }
}

pub fn header_ui(
    mut contexts: EguiContexts,
    mut stream: ResMut<StreamControl>,
    snapshot: Res<TrafficSnapshot>,
    alerts: Res<ActiveAlerts>,
) {
    egui::TopBottomPanel::top("header_bar").show(contexts.ctx_mut(), |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new("GridWatch")
                    .color(egui::Color32::from_rgb(96, 165, 250))
                    .strong(),
            );
            ui.label(
                egui::RichText::new("Urban traffic operations / synthetic feed")
                    .small()
                    .color(egui::Color32::from_rgb(148, 163, 184)),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let streaming = stream.is_streaming();
                if ui.button(toggle_label(streaming)).clicked() {
                    stream.toggle();
                }
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("cycle {}", snapshot.generation))
                        .small()
                        .color(egui::Color32::from_rgb(148, 163, 184)),
                );
                ui.label(
                    egui::RichText::new(format!("{} alerts", alerts.alerts.len()))
                        .small()
                        .color(egui::Color32::from_rgb(148, 163, 184)),
                );
                ui.separator();
                ui.label(status_label(streaming));
                ui.colored_label(status_color(streaming), "●");
            });
        });
        ui.add_space(4.0);
    });
}
