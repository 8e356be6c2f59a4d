//! Analytics strip: synthesized 24-hour speed curve and the ranked list of
//! most congested zones, both drawn with the egui painter.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::config::ZONE_SUFFIX;
use simulation::metrics::{DashboardMetrics, FlowBucket};
use simulation::snapshot::ZoneReading;
use simulation::trends::{TrafficTrend, TrendPoint};

use crate::zone_map::bucket_color;

const CURVE_COLOR: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const VOLUME_COLOR: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);

pub fn analytics_ui(
    mut contexts: EguiContexts,
    trend: Res<TrafficTrend>,
    metrics: Res<DashboardMetrics>,
) {
    egui::TopBottomPanel::bottom("analytics_panel")
        .default_height(230.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.add_space(6.0);
            ui.columns(2, |cols| {
                cols[0].label(egui::RichText::new("24-Hour Traffic Pattern").strong());
                draw_daily_curve(&mut cols[0], &trend.points);
                cols[0].horizontal(|ui| {
                    ui.colored_label(CURVE_COLOR, "●");
                    ui.label(egui::RichText::new("Average speed (mph)").small());
                    ui.colored_label(VOLUME_COLOR, "●");
                    ui.label(egui::RichText::new("Volume").small());
                });

                cols[1].label(egui::RichText::new("Most Congested Zones").strong());
                draw_congestion_bars(&mut cols[1], &metrics.top_congested);
            });
            ui.add_space(6.0);
        });
}

/// Volume bars with the speed curve drawn on top, both normalized to their
/// own maxima.
fn draw_daily_curve(ui: &mut egui::Ui, points: &[TrendPoint]) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 140.0),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(11, 17, 29));

    if points.len() < 2 {
        return;
    }

    let max_volume = points.iter().map(|p| p.volume).fold(1.0f32, f32::max);
    let max_speed = points.iter().map(|p| p.speed).fold(1.0f32, f32::max);
    let slot_w = rect.width() / points.len() as f32;

    for (i, point) in points.iter().enumerate() {
        let h = (point.volume / max_volume) * (rect.height() - 8.0);
        let x = rect.min.x + i as f32 * slot_w;
        let bar = egui::Rect::from_min_max(
            egui::pos2(x + 1.0, rect.max.y - h),
            egui::pos2(x + slot_w - 1.0, rect.max.y),
        );
        painter.rect_filled(
            bar,
            1.0,
            egui::Color32::from_rgba_unmultiplied(16, 185, 129, 60),
        );
    }

    let curve: Vec<egui::Pos2> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            egui::pos2(
                rect.min.x + (i as f32 + 0.5) * slot_w,
                rect.max.y - (p.speed / max_speed) * (rect.height() - 8.0),
            )
        })
        .collect();
    for window in curve.windows(2) {
        painter.line_segment([window[0], window[1]], egui::Stroke::new(2.0, CURVE_COLOR));
    }
}

/// Horizontal bars, slowest zone first, bar length proportional to speed.
fn draw_congestion_bars(ui: &mut egui::Ui, ranked: &[ZoneReading]) {
    let max_speed = ranked.iter().map(|r| r.avg_speed).fold(1.0f32, f32::max);

    for reading in ranked {
        let name = reading.zone.trim_end_matches(ZONE_SUFFIX);
        let color = bucket_color(FlowBucket::for_speed(reading.avg_speed));

        ui.horizontal(|ui| {
            ui.add_sized(
                egui::vec2(120.0, 14.0),
                egui::Label::new(egui::RichText::new(name).small()),
            );

            let (rect, _) = ui.allocate_exact_size(
                egui::vec2((ui.available_width() - 70.0).max(40.0), 12.0),
                egui::Sense::hover(),
            );
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 2.0, egui::Color32::from_rgb(24, 33, 51));
            let fill = egui::Rect::from_min_size(
                rect.min,
                egui::vec2(rect.width() * (reading.avg_speed / max_speed), rect.height()),
            );
            painter.rect_filled(fill, 2.0, color);

            ui.label(
                egui::RichText::new(format!("{:.1} mph", reading.avg_speed))
                    .small()
                    .color(color),
            );
        });
    }

    if ranked.is_empty() {
        ui.label(egui::RichText::new("No data yet...").small());
    }
}
