//! Derived dashboard metrics.
//!
//! Pure functions over a snapshot slice, recomputed into the
//! [`DashboardMetrics`] resource whenever the snapshot changes. Nothing is
//! cached between refreshes; empty snapshots and all-zero vehicle counts
//! fall back to 0 instead of dividing by zero.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{CONGESTED_SPEED_MPH, TOP_CONGESTED_COUNT};
use crate::snapshot::{TrafficSnapshot, ZoneReading};

/// Speed classification used for the map coloring and the bucket strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowBucket {
    Severe,
    Heavy,
    Moderate,
    Smooth,
}

impl FlowBucket {
    pub fn for_speed(speed: f32) -> Self {
        if speed < 10.0 {
            FlowBucket::Severe
        } else if speed < 20.0 {
            FlowBucket::Heavy
        } else if speed < 30.0 {
            FlowBucket::Moderate
        } else {
            FlowBucket::Smooth
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowBucket::Severe => "Severe",
            FlowBucket::Heavy => "Heavy",
            FlowBucket::Moderate => "Moderate",
            FlowBucket::Smooth => "Smooth",
        }
    }
}

/// Zone counts per speed bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowBuckets {
    pub severe: u32,
    pub heavy: u32,
    pub moderate: u32,
    pub smooth: u32,
}

impl FlowBuckets {
    pub fn from_readings(readings: &[ZoneReading]) -> Self {
        let mut buckets = Self::default();
        for reading in readings {
            match FlowBucket::for_speed(reading.avg_speed) {
                FlowBucket::Severe => buckets.severe += 1,
                FlowBucket::Heavy => buckets.heavy += 1,
                FlowBucket::Moderate => buckets.moderate += 1,
                FlowBucket::Smooth => buckets.smooth += 1,
            }
        }
        buckets
    }
}

/// Mean speed across all readings, 0.0 when empty.
pub fn mean_speed(readings: &[ZoneReading]) -> f32 {
    if readings.is_empty() {
        return 0.0;
    }
    readings.iter().map(|r| r.avg_speed).sum::<f32>() / readings.len() as f32
}

/// Mean delay across all readings, 0.0 when empty.
pub fn mean_delay(readings: &[ZoneReading]) -> f32 {
    if readings.is_empty() {
        return 0.0;
    }
    readings.iter().map(|r| r.avg_delay).sum::<f32>() / readings.len() as f32
}

/// Sum of vehicle counts.
pub fn total_vehicles(readings: &[ZoneReading]) -> u32 {
    readings.iter().map(|r| r.vehicle_count).sum()
}

/// Readings slower than the congestion threshold.
pub fn congested_count(readings: &[ZoneReading]) -> u32 {
    readings
        .iter()
        .filter(|r| r.avg_speed < CONGESTED_SPEED_MPH)
        .count() as u32
}

/// Largest vehicle count in the snapshot, 0 when empty.
pub fn max_vehicle_count(readings: &[ZoneReading]) -> u32 {
    readings.iter().map(|r| r.vehicle_count).max().unwrap_or(0)
}

/// Vehicle count relative to the snapshot maximum, in [0, 1].
/// Returns 0.0 when the maximum is 0 so an idle snapshot never yields NaN.
pub fn intensity_ratio(vehicle_count: u32, max_count: u32) -> f32 {
    if max_count == 0 {
        0.0
    } else {
        vehicle_count as f32 / max_count as f32
    }
}

/// The `n` slowest readings, most congested first.
pub fn top_congested(readings: &[ZoneReading], n: usize) -> Vec<ZoneReading> {
    let mut ranked = readings.to_vec();
    ranked.sort_by(|a, b| a.avg_speed.total_cmp(&b.avg_speed));
    ranked.truncate(n);
    ranked
}

/// Aggregates the display panels read; rebuilt whenever the snapshot
/// changes.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub mean_speed: f32,
    pub mean_delay: f32,
    pub total_vehicles: u32,
    pub congested_zones: u32,
    pub max_vehicles: u32,
    pub buckets: FlowBuckets,
    pub top_congested: Vec<ZoneReading>,
}

impl DashboardMetrics {
    pub fn from_readings(readings: &[ZoneReading]) -> Self {
        Self {
            mean_speed: mean_speed(readings),
            mean_delay: mean_delay(readings),
            total_vehicles: total_vehicles(readings),
            congested_zones: congested_count(readings),
            max_vehicles: max_vehicle_count(readings),
            buckets: FlowBuckets::from_readings(readings),
            top_congested: top_congested(readings, TOP_CONGESTED_COUNT),
        }
    }
}

/// System: recompute the aggregate metrics when the snapshot changes.
pub fn update_metrics(
    snapshot: Res<TrafficSnapshot>,
    mut metrics: ResMut<DashboardMetrics>,
) {
    if !snapshot.is_changed() {
        return;
    }
    *metrics = DashboardMetrics::from_readings(&snapshot.readings);
}

pub struct MetricsPlugin;

impl Plugin for MetricsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DashboardMetrics>().add_systems(
            FixedUpdate,
            update_metrics.after(crate::trends::refresh_trend),
        );
    }
}
