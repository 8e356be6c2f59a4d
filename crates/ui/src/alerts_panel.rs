//! Live alerts side panel: newest-first batch with severity styling and a
//! per-severity summary strip.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::alerts::{ActiveAlerts, Severity};

pub fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Critical => egui::Color32::from_rgb(248, 113, 113),
        Severity::High => egui::Color32::from_rgb(251, 146, 60),
        Severity::Medium => egui::Color32::from_rgb(250, 204, 21),
        Severity::Low => egui::Color32::from_rgb(96, 165, 250),
    }
}

pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[!!]",
        Severity::High => "[!]",
        Severity::Medium => "[~]",
        Severity::Low => "[i]",
    }
}

/// "Xm ago" / "Xh ago" / "Xd ago" from an age in seconds.
pub fn format_age(secs: u64) -> String {
    let mins = secs / 60;
    if mins < 60 {
        format!("{mins}m ago")
    } else if mins < 1440 {
        format!("{}h ago", mins / 60)
    } else {
        format!("{}d ago", mins / 1440)
    }
}

pub fn alerts_ui(mut contexts: EguiContexts, active: Res<ActiveAlerts>) {
    egui::SidePanel::right("alerts_panel")
        .default_width(330.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Live Alerts");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} Active", active.alerts.len()))
                            .small()
                            .color(egui::Color32::from_rgb(148, 163, 184)),
                    );
                    ui.colored_label(egui::Color32::from_rgb(248, 113, 113), "●");
                });
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 70.0)
                .show(ui, |ui| {
                    for alert in &active.alerts {
                        let color = severity_color(alert.severity);
                        egui::Frame::new()
                            .fill(egui::Color32::from_rgb(24, 33, 51))
                            .stroke(egui::Stroke::new(1.0, color))
                            .inner_margin(egui::Margin::same(8))
                            .corner_radius(egui::CornerRadius::same(6))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.colored_label(color, severity_icon(alert.severity));
                                    ui.label(egui::RichText::new(&alert.title).strong());
                                });
                                ui.label(
                                    egui::RichText::new(&alert.description)
                                        .small()
                                        .color(egui::Color32::from_rgb(203, 213, 225)),
                                );
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new(&alert.location)
                                            .small()
                                            .color(egui::Color32::from_rgb(148, 163, 184)),
                                    );
                                    let age =
                                        active.generated_at.saturating_sub(alert.timestamp);
                                    ui.label(
                                        egui::RichText::new(format_age(age))
                                            .small()
                                            .color(egui::Color32::from_rgb(148, 163, 184)),
                                    );
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            ui.label(
                                                egui::RichText::new(alert.kind.label())
                                                    .small()
                                                    .color(color),
                                            );
                                        },
                                    );
                                });
                            });
                        ui.add_space(4.0);
                    }
                });

            // Summary strip
            ui.separator();
            let counts = active.severity_counts();
            ui.columns(4, |cols| {
                severity_stat(&mut cols[0], Severity::Critical, counts.critical);
                severity_stat(&mut cols[1], Severity::High, counts.high);
                severity_stat(&mut cols[2], Severity::Medium, counts.medium);
                severity_stat(&mut cols[3], Severity::Low, counts.low);
            });
        });
}

fn severity_stat(ui: &mut egui::Ui, severity: Severity, count: u32) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(count.to_string())
                .size(16.0)
                .color(severity_color(severity))
                .strong(),
        );
        ui.label(
            egui::RichText::new(severity.label())
                .small()
                .color(egui::Color32::from_rgb(148, 163, 184)),
        );
    });
}
