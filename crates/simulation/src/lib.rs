use bevy::prelude::*;

pub mod alerts;
pub mod config;
pub mod metrics;
pub mod sim_rng;
pub mod snapshot;
pub mod stream;
pub mod trends;
pub mod zones;

#[cfg(test)]
pub mod test_harness;

use alerts::{generate_alerts, ActiveAlerts, AlertCatalog};
use sim_rng::SimRng;
use snapshot::{generate_snapshot, TrafficSnapshot};
use trends::{generate_trend, TrafficTrend};
use zones::ZoneCatalog;

/// Global tick counter incremented each FixedUpdate, used to gate the feed
/// refresh systems to the 3-second cadence.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn advance_tick(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Wall clock in Unix seconds. Captured once per refresh by the driving
/// systems and passed into the pure generators.
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Startup: fill the feed once so every panel has data on the first frame,
/// before the first refresh cycle fires.
fn seed_dashboard(
    zone_catalog: Res<ZoneCatalog>,
    alert_catalog: Res<AlertCatalog>,
    mut rng: ResMut<SimRng>,
    mut traffic: ResMut<TrafficSnapshot>,
    mut active: ResMut<ActiveAlerts>,
    mut trend: ResMut<TrafficTrend>,
) {
    let now = unix_now();
    traffic.replace(generate_snapshot(&mut rng.0, &zone_catalog, now), now);
    active.replace(generate_alerts(&mut rng.0, &alert_catalog, &zone_catalog, now), now);
    trend.replace(generate_trend(&mut rng.0));
    info!("feed seeded: {} zones monitored", zone_catalog.len());
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(config::TICK_RATE_HZ))
            .init_resource::<TickCounter>()
            .add_systems(Startup, seed_dashboard)
            .add_systems(FixedUpdate, advance_tick);

        app.add_plugins((
            sim_rng::SimRngPlugin,
            zones::ZoneCatalogPlugin,
            stream::StreamControlPlugin,
            snapshot::SnapshotPlugin,
            alerts::AlertsPlugin,
            trends::TrendsPlugin,
            metrics::MetricsPlugin,
        ));
    }
}
