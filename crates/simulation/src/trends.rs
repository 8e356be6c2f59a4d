//! Synthesized 24-hour traffic pattern for the analytics charts.
//!
//! A sine curve over the day with uniform jitter: speeds dip overnight and
//! peak mid-cycle, volume follows the same shape shifted to the morning
//! commute. Regenerated on the snapshot cadence so the chart shimmers like
//! the rest of the feed.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{REFRESH_INTERVAL_TICKS, TREND_HOURS};
use crate::sim_rng::SimRng;
use crate::stream::StreamControl;
use crate::TickCounter;

/// Baseline speed around which the daily curve oscillates (mph).
const SPEED_BASE: f32 = 20.0;
/// Amplitude of the daily speed swing (mph).
const SPEED_AMPLITUDE: f32 = 15.0;
/// Uniform jitter added to each hourly speed sample.
const SPEED_JITTER: f32 = 5.0;
/// Baseline hourly volume.
const VOLUME_BASE: f32 = 100.0;
/// Amplitude of the daily volume swing.
const VOLUME_AMPLITUDE: f32 = 80.0;
/// Uniform jitter added to each hourly volume sample.
const VOLUME_JITTER: f32 = 20.0;
/// Volume curve lags the day by this many hours (morning commute shift).
const VOLUME_PHASE_HOURS: f32 = 6.0;

/// One sampled hour of the synthetic daily curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub hour: u32,
    pub speed: f32,
    pub volume: f32,
}

/// Latest synthesized daily curve, one point per hour.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficTrend {
    pub points: Vec<TrendPoint>,
    pub generation: u64,
}

impl TrafficTrend {
    pub fn replace(&mut self, points: Vec<TrendPoint>) {
        self.points = points;
        self.generation += 1;
    }
}

/// Synthesize one 24-point daily curve.
pub fn generate_trend(rng: &mut impl Rng) -> Vec<TrendPoint> {
    (0..TREND_HOURS)
        .map(|hour| {
            let day_angle = hour as f32 / TREND_HOURS as f32 * std::f32::consts::TAU;
            let commute_angle =
                (hour as f32 - VOLUME_PHASE_HOURS) / TREND_HOURS as f32 * std::f32::consts::TAU;
            TrendPoint {
                hour: hour as u32,
                speed: SPEED_BASE
                    + day_angle.sin() * SPEED_AMPLITUDE
                    + rng.gen_range(0.0..SPEED_JITTER),
                volume: VOLUME_BASE
                    + commute_angle.sin() * VOLUME_AMPLITUDE
                    + rng.gen_range(0.0..VOLUME_JITTER),
            }
        })
        .collect()
}

/// System: resynthesize the daily curve on the refresh cadence.
pub fn refresh_trend(
    tick: Res<TickCounter>,
    stream: Res<StreamControl>,
    mut rng: ResMut<SimRng>,
    mut trend: ResMut<TrafficTrend>,
) {
    if !tick.0.is_multiple_of(REFRESH_INTERVAL_TICKS) {
        return;
    }
    if !stream.is_streaming() {
        return;
    }

    let points = generate_trend(&mut rng.0);
    trend.replace(points);
}

pub struct TrendsPlugin;

impl Plugin for TrendsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrafficTrend>().add_systems(
            FixedUpdate,
            refresh_trend.after(crate::alerts::refresh_alerts),
        );
    }
}
