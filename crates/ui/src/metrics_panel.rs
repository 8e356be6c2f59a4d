//! Metrics overview strip: aggregate tiles derived from the latest
//! snapshot, plus the two static capacity tiles the mock feed ships with.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::metrics::DashboardMetrics;

/// Insert thousands separators ("1247" -> "1,247").
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn metric_tile(ui: &mut egui::Ui, title: &str, value: String, accent: egui::Color32) {
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(24, 33, 51))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(38, 50, 72)))
        .inner_margin(egui::Margin::symmetric(14, 10))
        .corner_radius(egui::CornerRadius::same(6))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(value).size(20.0).color(accent).strong());
                ui.label(
                    egui::RichText::new(title)
                        .small()
                        .color(egui::Color32::from_rgb(148, 163, 184)),
                );
            });
        });
}

pub fn metrics_ui(mut contexts: EguiContexts, metrics: Res<DashboardMetrics>) {
    egui::TopBottomPanel::top("metrics_strip").show(contexts.ctx_mut(), |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            metric_tile(
                ui,
                "Average Speed",
                format!("{:.1} mph", metrics.mean_speed),
                egui::Color32::from_rgb(96, 165, 250),
            );
            metric_tile(
                ui,
                "Total Vehicles",
                group_thousands(metrics.total_vehicles),
                egui::Color32::from_rgb(74, 222, 128),
            );
            metric_tile(
                ui,
                "Congestion Zones",
                metrics.congested_zones.to_string(),
                egui::Color32::from_rgb(251, 146, 60),
            );
            metric_tile(
                ui,
                "Average Delay",
                format!("{:.1} min", metrics.mean_delay),
                egui::Color32::from_rgb(248, 113, 113),
            );
            // Static capacity tiles from the mock feed; nothing upstream
            // produces these numbers.
            metric_tile(
                ui,
                "Data Throughput",
                "2.3 GB/s".to_string(),
                egui::Color32::from_rgb(192, 132, 252),
            );
            metric_tile(
                ui,
                "Active Routes",
                "1,247".to_string(),
                egui::Color32::from_rgb(34, 211, 238),
            );
        });
        ui.add_space(6.0);
    });
}
