//! Static catalog of monitored city zones.
//!
//! The catalog is an immutable resource injected at startup. Generators read
//! it but never mutate it; tests swap in smaller fixtures via
//! [`ZoneCatalog::with_names`].

use bevy::prelude::*;

use crate::config::ZONE_SUFFIX;

/// Default monitored zones (Manhattan-flavored demo set).
const DEFAULT_ZONES: [&str; 24] = [
    "Downtown Core",
    "Financial District",
    "Midtown West",
    "Upper East Side",
    "Brooklyn Bridge",
    "Times Square",
    "Central Park",
    "Wall Street",
    "SoHo District",
    "Greenwich Village",
    "Chelsea",
    "Tribeca",
    "Lower Manhattan",
    "Theater District",
    "Garment District",
    "Flatiron",
    "East Village",
    "West Village",
    "Nolita",
    "Little Italy",
    "Chinatown",
    "Battery Park",
    "Civic Center",
    "Two Bridges",
];

/// Name fragments marking chronically slow zones.
const HOTSPOT_MARKERS: [&str; 2] = ["Times Square", "Downtown"];

/// Name fragments marking high vehicle density zones.
const HIGH_DENSITY_MARKERS: [&str; 2] = ["Financial", "Midtown"];

/// Ordered, immutable list of zone names the generators iterate over.
#[derive(Resource, Debug, Clone)]
pub struct ZoneCatalog {
    names: Vec<String>,
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self {
            names: DEFAULT_ZONES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ZoneCatalog {
    /// Build a catalog from an explicit name list (test fixtures).
    pub fn with_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate the catalog names in their fixed order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Chronically slow zone (base speed drawn from the low band).
    pub fn is_hotspot(name: &str) -> bool {
        HOTSPOT_MARKERS.iter().any(|m| name.contains(m))
    }

    /// High vehicle density zone (count drawn from the high base).
    pub fn is_high_density(name: &str) -> bool {
        HIGH_DENSITY_MARKERS.iter().any(|m| name.contains(m))
    }

    /// Display name shown on the dashboard ("Chelsea" -> "Chelsea Zone").
    pub fn display_name(name: &str) -> String {
        format!("{name}{ZONE_SUFFIX}")
    }
}

pub struct ZoneCatalogPlugin;

impl Plugin for ZoneCatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZoneCatalog>();
    }
}
