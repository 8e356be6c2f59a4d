/// Fixed-update rate of the simulation schedule.
pub const TICK_RATE_HZ: f64 = 10.0;

/// Ticks between feed refreshes (30 ticks at 10 Hz = 3 seconds).
pub const REFRESH_INTERVAL_TICKS: u64 = 30;

/// Zones with an average speed below this are counted as congested (mph).
pub const CONGESTED_SPEED_MPH: f32 = 15.0;

/// How many zones the "most congested" ranking keeps.
pub const TOP_CONGESTED_COUNT: usize = 6;

/// Chance that a refresh cycle also regenerates the alert batch.
pub const ALERT_REFRESH_CHANCE: f64 = 0.3;

/// Alert batch size bounds (inclusive).
pub const ALERT_BATCH_MIN: usize = 3;
pub const ALERT_BATCH_MAX: usize = 10;

/// Alert timestamps fall within this many seconds before the batch instant.
pub const ALERT_WINDOW_SECS: u64 = 7200;

/// Suffix appended to catalog names to form zone display names.
pub const ZONE_SUFFIX: &str = " Zone";

/// Points in one synthesized 24-hour trend curve.
pub const TREND_HOURS: usize = 24;
