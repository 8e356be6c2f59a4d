//! # TestDashboard: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` with `MinimalPlugins` so the
//! feed loop can be driven tick by tick without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::alerts::{ActiveAlerts, AlertCatalog};
use crate::metrics::DashboardMetrics;
use crate::sim_rng::SimRng;
use crate::snapshot::TrafficSnapshot;
use crate::stream::StreamControl;
use crate::trends::TrafficTrend;
use crate::zones::ZoneCatalog;
use crate::{SimulationPlugin, TickCounter};

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestDashboard {
    app: App,
}

impl TestDashboard {
    /// Default catalogs and the default seed.
    pub fn new() -> Self {
        Self::build(None, None, None)
    }

    /// Default catalogs, explicit RNG seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(Some(seed), None, None)
    }

    /// Explicit catalogs and seed (small fixtures).
    pub fn with_catalogs(seed: u64, zones: ZoneCatalog, templates: AlertCatalog) -> Self {
        Self::build(Some(seed), Some(zones), Some(templates))
    }

    fn build(
        seed: Option<u64>,
        zones: Option<ZoneCatalog>,
        templates: Option<AlertCatalog>,
    ) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Insert overrides BEFORE SimulationPlugin so init_resource keeps them.
        if let Some(seed) = seed {
            app.insert_resource(SimRng::from_seed_u64(seed));
        }
        if let Some(zones) = zones {
            app.insert_resource(zones);
        }
        if let Some(templates) = templates {
            app.insert_resource(templates);
        }
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems execute and the feed is seeded.
        app.update();

        Self { app }
    }

    /// Run N fixed-update ticks.
    ///
    /// The feed loop runs at 10 Hz (100ms per tick). Each call advances
    /// virtual time by 100ms and calls `app.update()`, which triggers the
    /// `FixedUpdate` schedule.
    pub fn tick(&mut self, n: u32) {
        let dt = std::time::Duration::from_millis(100);
        for _ in 0..n {
            self.app
                .world_mut()
                .resource_mut::<Time<Virtual>>()
                .advance_by(dt);
            self.app.update();
        }
    }

    /// Run one full refresh cycle (30 ticks = 3 seconds).
    pub fn tick_refresh_cycle(&mut self) {
        self.tick(crate::config::REFRESH_INTERVAL_TICKS as u32);
    }

    pub fn snapshot(&self) -> &TrafficSnapshot {
        self.app.world().resource::<TrafficSnapshot>()
    }

    pub fn alerts(&self) -> &ActiveAlerts {
        self.app.world().resource::<ActiveAlerts>()
    }

    pub fn trend(&self) -> &TrafficTrend {
        self.app.world().resource::<TrafficTrend>()
    }

    pub fn metrics(&self) -> &DashboardMetrics {
        self.app.world().resource::<DashboardMetrics>()
    }

    pub fn stream(&self) -> &StreamControl {
        self.app.world().resource::<StreamControl>()
    }

    pub fn tick_count(&self) -> u64 {
        self.app.world().resource::<TickCounter>().0
    }

    pub fn set_streaming(&mut self, on: bool) {
        self.app
            .world_mut()
            .resource_mut::<StreamControl>()
            .set_streaming(on);
    }

    /// Get a reference to any resource.
    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    /// Assert a resource has been initialized (exists in the world).
    pub fn assert_resource_exists<T: Resource>(&self) {
        assert!(
            self.app.world().get_resource::<T>().is_some(),
            "Expected resource {} to exist",
            std::any::type_name::<T>()
        );
    }
}
