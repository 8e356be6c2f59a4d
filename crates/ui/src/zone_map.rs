//! Congestion map: zone markers on an 8-column grid, colored by speed
//! bucket, with marker rings scaled by relative vehicle intensity.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::metrics::{intensity_ratio, DashboardMetrics, FlowBucket};
use simulation::snapshot::TrafficSnapshot;

/// Columns in the pseudo-map grid.
const MAP_COLUMNS: usize = 8;
/// Base marker radius in pixels.
const MARKER_RADIUS: f32 = 6.0;
/// Extra ring radius at full intensity.
const RING_RADIUS: f32 = 12.0;

pub fn bucket_color(bucket: FlowBucket) -> egui::Color32 {
    match bucket {
        FlowBucket::Severe => egui::Color32::from_rgb(239, 68, 68),
        FlowBucket::Heavy => egui::Color32::from_rgb(249, 115, 22),
        FlowBucket::Moderate => egui::Color32::from_rgb(234, 179, 8),
        FlowBucket::Smooth => egui::Color32::from_rgb(34, 197, 94),
    }
}

fn legend_entry(ui: &mut egui::Ui, bucket: FlowBucket) {
    ui.colored_label(bucket_color(bucket), "●");
    ui.label(
        egui::RichText::new(bucket.label())
            .small()
            .color(egui::Color32::from_rgb(203, 213, 225)),
    );
}

pub fn zone_map_ui(
    mut contexts: EguiContexts,
    snapshot: Res<TrafficSnapshot>,
    metrics: Res<DashboardMetrics>,
) {
    egui::CentralPanel::default().show(contexts.ctx_mut(), |ui| {
        ui.horizontal(|ui| {
            ui.heading("Traffic Congestion Map");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                legend_entry(ui, FlowBucket::Severe);
                legend_entry(ui, FlowBucket::Heavy);
                legend_entry(ui, FlowBucket::Moderate);
                legend_entry(ui, FlowBucket::Smooth);
            });
        });

        // TODO: drive this badge from ActiveAlerts instead of the fixed
        // placeholder count the mock dashboard ships with.
        ui.colored_label(
            egui::Color32::from_rgb(248, 113, 113),
            "[!] 3 Active Incidents",
        );
        ui.add_space(4.0);

        let readings = &snapshot.readings;
        let rows = readings.len().div_ceil(MAP_COLUMNS).max(1);

        let map_height = (ui.available_height() - 70.0).max(160.0);
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), map_height),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 6.0, egui::Color32::from_rgb(11, 17, 29));

        // Faint street grid behind the markers
        let grid_step = 40.0;
        let grid_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(26, 35, 53));
        let mut x = rect.min.x;
        while x < rect.max.x {
            painter.line_segment(
                [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
                grid_stroke,
            );
            x += grid_step;
        }
        let mut y = rect.min.y;
        while y < rect.max.y {
            painter.line_segment(
                [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
                grid_stroke,
            );
            y += grid_step;
        }

        let cell_w = rect.width() / MAP_COLUMNS as f32;
        let cell_h = rect.height() / rows as f32;

        for (i, reading) in readings.iter().enumerate() {
            let col = i % MAP_COLUMNS;
            let row = i / MAP_COLUMNS;
            let center = egui::pos2(
                rect.min.x + (col as f32 + 0.5) * cell_w,
                rect.min.y + (row as f32 + 0.5) * cell_h,
            );

            let color = bucket_color(FlowBucket::for_speed(reading.avg_speed));
            let intensity = intensity_ratio(reading.vehicle_count, metrics.max_vehicles);

            // Intensity ring first so the marker paints on top of it.
            let ring = egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 70);
            painter.circle_filled(center, MARKER_RADIUS + intensity * RING_RADIUS, ring);
            painter.circle_filled(center, MARKER_RADIUS, color);

            let hover_rect = egui::Rect::from_center_size(center, egui::vec2(20.0, 20.0));
            ui.interact(hover_rect, ui.id().with(("zone_marker", i)), egui::Sense::hover())
                .on_hover_ui(|ui| {
                    ui.label(egui::RichText::new(&reading.zone).strong());
                    ui.label(format!("Speed: {:.1} mph", reading.avg_speed));
                    ui.label(format!("Vehicles: {}", reading.vehicle_count));
                    ui.label(format!("Delay: {:.1} min", reading.avg_delay));
                });
        }

        // Bucket tallies under the map
        ui.add_space(8.0);
        let buckets = metrics.buckets;
        ui.columns(4, |cols| {
            bucket_stat(&mut cols[0], FlowBucket::Smooth, buckets.smooth);
            bucket_stat(&mut cols[1], FlowBucket::Moderate, buckets.moderate);
            bucket_stat(&mut cols[2], FlowBucket::Heavy, buckets.heavy);
            bucket_stat(&mut cols[3], FlowBucket::Severe, buckets.severe);
        });
    });
}

fn bucket_stat(ui: &mut egui::Ui, bucket: FlowBucket, count: u32) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(count.to_string())
                .size(20.0)
                .color(bucket_color(bucket))
                .strong(),
        );
        ui.label(
            egui::RichText::new(format!("{} Zones", bucket.label()))
                .small()
                .color(egui::Color32::from_rgb(148, 163, 184)),
        );
    });
}
