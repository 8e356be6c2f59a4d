//! Synthetic incident alert batches.
//!
//! Each regeneration builds a complete batch of 3 to 10 alerts from the
//! template catalog, stamps each one with a timestamp inside the last two
//! hours, and sorts the batch newest-first. The previous batch is discarded
//! wholesale; alert ids are only stable within one batch.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{
    ALERT_BATCH_MAX, ALERT_BATCH_MIN, ALERT_REFRESH_CHANCE, ALERT_WINDOW_SECS,
    REFRESH_INTERVAL_TICKS,
};
use crate::sim_rng::SimRng;
use crate::stream::StreamControl;
use crate::zones::ZoneCatalog;
use crate::TickCounter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    Congestion,
    Incident,
    System,
    Weather,
}

impl AlertKind {
    pub fn label(self) -> &'static str {
        match self {
            AlertKind::Congestion => "Congestion",
            AlertKind::Incident => "Incident",
            AlertKind::System => "System",
            AlertKind::Weather => "Weather",
        }
    }
}

/// Title/description/kind triple the generator draws from.
#[derive(Debug, Clone)]
pub struct AlertTemplate {
    pub title: String,
    pub description: String,
    pub kind: AlertKind,
}

impl AlertTemplate {
    fn new(title: &str, description: &str, kind: AlertKind) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            kind,
        }
    }
}

/// Immutable template catalog, injected at startup like the zone list.
#[derive(Resource, Debug, Clone)]
pub struct AlertCatalog {
    templates: Vec<AlertTemplate>,
}

impl Default for AlertCatalog {
    fn default() -> Self {
        Self {
            templates: vec![
                AlertTemplate::new(
                    "Heavy Traffic Congestion",
                    "Severe slowdown due to high volume",
                    AlertKind::Congestion,
                ),
                AlertTemplate::new(
                    "Multi-Vehicle Accident",
                    "Traffic incident blocking multiple lanes",
                    AlertKind::Incident,
                ),
                AlertTemplate::new(
                    "Road Construction",
                    "Lane closure for emergency repairs",
                    AlertKind::Incident,
                ),
                AlertTemplate::new(
                    "Weather Impact",
                    "Heavy rain affecting visibility and speed",
                    AlertKind::Weather,
                ),
                AlertTemplate::new(
                    "System Anomaly",
                    "Unusual traffic pattern detected",
                    AlertKind::System,
                ),
                AlertTemplate::new(
                    "Event Traffic",
                    "Increased volume due to nearby event",
                    AlertKind::Congestion,
                ),
            ],
        }
    }
}

impl AlertCatalog {
    /// Build a catalog from explicit templates (test fixtures).
    pub fn with_templates(templates: Vec<AlertTemplate>) -> Self {
        Self { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&AlertTemplate> {
        self.templates.get(idx)
    }
}

/// One incident notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique within its batch ("alert-3-1700000000").
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub kind: AlertKind,
    /// Bare zone name from the catalog (no display suffix).
    pub location: String,
    /// Unix seconds, within the two hours before the batch instant.
    pub timestamp: u64,
}

/// Latest alert batch, sorted newest-first; replaced wholesale each
/// regeneration.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveAlerts {
    pub alerts: Vec<Alert>,
    /// Unix seconds of the batch instant.
    pub generated_at: u64,
    /// Monotonic batch counter, 1 = initial fill.
    pub generation: u64,
}

/// Per-severity tally used by the alerts panel summary strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl ActiveAlerts {
    pub fn replace(&mut self, alerts: Vec<Alert>, now: u64) {
        self.alerts = alerts;
        self.generated_at = now;
        self.generation += 1;
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for alert in &self.alerts {
            match alert.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }
}

/// Generate a full batch: uniform template, zone, and severity per slot,
/// timestamps in `[now - ALERT_WINDOW_SECS, now]`, sorted newest-first.
pub fn generate_alerts(
    rng: &mut impl Rng,
    templates: &AlertCatalog,
    catalog: &ZoneCatalog,
    now: u64,
) -> Vec<Alert> {
    if templates.is_empty() || catalog.is_empty() {
        return Vec::new();
    }

    let count = rng.gen_range(ALERT_BATCH_MIN..=ALERT_BATCH_MAX);
    let mut alerts = Vec::with_capacity(count);

    for slot in 0..count {
        let template = templates
            .get(rng.gen_range(0..templates.len()))
            .expect("index drawn from template range");
        let zone = catalog
            .get(rng.gen_range(0..catalog.len()))
            .expect("index drawn from catalog range");
        let severity = Severity::ALL[rng.gen_range(0..Severity::ALL.len())];
        let offset = rng.gen_range(0..ALERT_WINDOW_SECS);

        alerts.push(Alert {
            id: format!("alert-{slot}-{now}"),
            title: template.title.clone(),
            description: format!("{} in {} area", template.description, zone),
            severity,
            kind: template.kind,
            location: zone.to_string(),
            timestamp: now.saturating_sub(offset),
        });
    }

    alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    alerts
}

/// System: on the refresh cadence, regenerate the batch with probability
/// [`ALERT_REFRESH_CHANCE`] while streaming.
pub fn refresh_alerts(
    tick: Res<TickCounter>,
    stream: Res<StreamControl>,
    templates: Res<AlertCatalog>,
    catalog: Res<ZoneCatalog>,
    mut rng: ResMut<SimRng>,
    mut active: ResMut<ActiveAlerts>,
) {
    if !tick.0.is_multiple_of(REFRESH_INTERVAL_TICKS) {
        return;
    }
    if !stream.is_streaming() {
        return;
    }
    if !rng.0.gen_bool(ALERT_REFRESH_CHANCE) {
        return;
    }

    let now = crate::unix_now();
    let batch = generate_alerts(&mut rng.0, &templates, &catalog, now);
    debug!("alert batch regenerated: {} active", batch.len());
    active.replace(batch, now);
}

pub struct AlertsPlugin;

impl Plugin for AlertsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AlertCatalog>()
            .init_resource::<ActiveAlerts>()
            .add_systems(
                FixedUpdate,
                refresh_alerts.after(crate::snapshot::refresh_snapshot),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn test_batch_size_bounds() {
        let templates = AlertCatalog::default();
        let zones = ZoneCatalog::default();
        for seed in 0..50 {
            let batch = generate_alerts(&mut rng(seed), &templates, &zones, NOW);
            assert!(
                (ALERT_BATCH_MIN..=ALERT_BATCH_MAX).contains(&batch.len()),
                "batch size {} out of bounds",
                batch.len()
            );
        }
    }

    #[test]
    fn test_batch_sorted_newest_first_100_runs() {
        let templates = AlertCatalog::default();
        let zones = ZoneCatalog::default();
        let mut r = rng(42);
        for _ in 0..100 {
            let batch = generate_alerts(&mut r, &templates, &zones, NOW);
            for pair in batch.windows(2) {
                assert!(
                    pair[0].timestamp >= pair[1].timestamp,
                    "batch not sorted descending: {} < {}",
                    pair[0].timestamp,
                    pair[1].timestamp
                );
            }
        }
    }

    #[test]
    fn test_timestamps_within_window() {
        let templates = AlertCatalog::default();
        let zones = ZoneCatalog::default();
        for seed in 0..20 {
            for alert in generate_alerts(&mut rng(seed), &templates, &zones, NOW) {
                assert!(alert.timestamp <= NOW);
                assert!(alert.timestamp > NOW - ALERT_WINDOW_SECS);
            }
        }
    }

    #[test]
    fn test_locations_drawn_from_catalog() {
        let templates = AlertCatalog::default();
        let zones = ZoneCatalog::default();
        for alert in generate_alerts(&mut rng(7), &templates, &zones, NOW) {
            assert!(zones.contains(&alert.location), "unknown location {}", alert.location);
            assert!(
                alert.description.ends_with(&format!("in {} area", alert.location)),
                "description does not reference location: {}",
                alert.description
            );
        }
    }

    #[test]
    fn test_ids_unique_within_batch() {
        let templates = AlertCatalog::default();
        let zones = ZoneCatalog::default();
        let batch = generate_alerts(&mut rng(11), &templates, &zones, NOW);
        for i in 0..batch.len() {
            for j in (i + 1)..batch.len() {
                assert_ne!(batch[i].id, batch[j].id);
            }
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let templates = AlertCatalog::default();
        let zones = ZoneCatalog::default();
        let a = generate_alerts(&mut rng(5), &templates, &zones, NOW);
        let b = generate_alerts(&mut rng(5), &templates, &zones, NOW);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_catalog_yields_empty_batch() {
        let templates = AlertCatalog::with_templates(Vec::new());
        let zones = ZoneCatalog::default();
        assert!(generate_alerts(&mut rng(1), &templates, &zones, NOW).is_empty());

        let templates = AlertCatalog::default();
        let zones = ZoneCatalog::with_names(Vec::new());
        assert!(generate_alerts(&mut rng(1), &templates, &zones, NOW).is_empty());
    }

    #[test]
    fn test_severity_counts_tally() {
        let mut active = ActiveAlerts::default();
        let mk = |severity| Alert {
            id: "a".into(),
            title: "t".into(),
            description: "d".into(),
            severity,
            kind: AlertKind::System,
            location: "Chelsea".into(),
            timestamp: 0,
        };
        active.alerts = vec![
            mk(Severity::Critical),
            mk(Severity::Critical),
            mk(Severity::Low),
            mk(Severity::Medium),
        ];
        let counts = active.severity_counts();
        assert_eq!(counts.critical, 2);
        assert_eq!(counts.high, 0);
        assert_eq!(counts.medium, 1);
        assert_eq!(counts.low, 1);
    }

    #[test]
    fn test_replace_bumps_generation() {
        let mut active = ActiveAlerts::default();
        active.replace(Vec::new(), 100);
        assert_eq!(active.generation, 1);
        assert_eq!(active.generated_at, 100);
    }
}
