//! Bridge configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Lookups go through a closure so the
//! same parsing runs against a plain map in tests.

use std::path::Path;
use std::time::Duration;

use crate::domain::{MAX_EVENT_BUS_CAPACITY, Target};
use crate::error::BridgeError;

/// Default angle threshold in degrees.
pub const DEFAULT_ANGLE_THRESHOLD_DEG: f32 = 10.0;

/// Smallest accepted angle threshold in degrees.
pub const MIN_ANGLE_THRESHOLD_DEG: f32 = 1.0;

/// Largest accepted angle threshold in degrees.
pub const MAX_ANGLE_THRESHOLD_DEG: f32 = 45.0;

/// Default keepalive period in milliseconds.
pub const DEFAULT_KEEPALIVE_MS: u64 = 500;

/// Default event bus capacity.
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;

/// Text frame sent once when the connection opens.
pub const DEFAULT_GREETING: &str = "LensStudio: Connected";

/// Top-level bridge configuration.
///
/// Loaded once at startup via [`BridgeConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// WebSocket endpoint. `None` leaves the connection uninitialized.
    pub socket_url: Option<String>,

    /// Gaze angle threshold in degrees, always within 1-45.
    pub angle_threshold_deg: f32,

    /// Targets eligible for gaze selection, in priority order.
    pub targets: Vec<Target>,

    /// Period of the keepalive ping.
    pub keepalive_interval: Duration,

    /// Text frame sent on open.
    pub greeting: String,

    /// Enables the debug overlay.
    pub debug_mode: bool,

    /// Capacity of the EventBus broadcast channel, within
    /// `1..=MAX_EVENT_BUS_CAPACITY`.
    pub event_bus_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            socket_url: None,
            angle_threshold_deg: DEFAULT_ANGLE_THRESHOLD_DEG,
            targets: Vec::new(),
            keepalive_interval: Duration::from_millis(DEFAULT_KEEPALIVE_MS),
            greeting: DEFAULT_GREETING.to_string(),
            debug_mode: false,
            event_bus_capacity: DEFAULT_EVENT_BUS_CAPACITY,
        }
    }
}

impl BridgeConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidConfig`] if the target list is
    /// malformed or the targets file cannot be read.
    pub fn from_env() -> Result<Self, BridgeError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Falls back to defaults when a variable is missing or unparsable.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidConfig`] if `BRIDGE_TARGETS` is not a
    /// valid target array, or `BRIDGE_TARGETS_FILE` cannot be read or
    /// parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let socket_url = lookup("BRIDGE_SOCKET_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let angle_threshold_deg = clamp_threshold(parse_var(
            &lookup,
            "BRIDGE_ANGLE_THRESHOLD",
            DEFAULT_ANGLE_THRESHOLD_DEG,
        ));

        let targets = match (lookup("BRIDGE_TARGETS"), lookup("BRIDGE_TARGETS_FILE")) {
            (Some(json), _) => parse_targets(&json)?,
            (None, Some(path)) => load_targets_file(Path::new(&path))?,
            (None, None) => Vec::new(),
        };

        let keepalive_ms = parse_var(&lookup, "BRIDGE_KEEPALIVE_MS", DEFAULT_KEEPALIVE_MS).max(1);

        let greeting = lookup("BRIDGE_GREETING").unwrap_or_else(|| DEFAULT_GREETING.to_string());
        let debug_mode = parse_var_bool(&lookup, "BRIDGE_DEBUG", false);
        let event_bus_capacity = parse_var(&lookup, "EVENT_BUS_CAPACITY", DEFAULT_EVENT_BUS_CAPACITY)
            .clamp(1, MAX_EVENT_BUS_CAPACITY);

        Ok(Self {
            socket_url,
            angle_threshold_deg,
            targets,
            keepalive_interval: Duration::from_millis(keepalive_ms),
            greeting,
            debug_mode,
            event_bus_capacity,
        })
    }
}

/// Clamps a threshold into the accepted 1-45 degree range. NaN maps to the
/// default.
#[must_use]
pub fn clamp_threshold(deg: f32) -> f32 {
    if deg.is_nan() {
        return DEFAULT_ANGLE_THRESHOLD_DEG;
    }
    deg.clamp(MIN_ANGLE_THRESHOLD_DEG, MAX_ANGLE_THRESHOLD_DEG)
}

/// Parses a JSON target array.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidConfig`] if `json` is not an array of
/// `{"name": .., "position": [x, y, z]}` objects.
pub fn parse_targets(json: &str) -> Result<Vec<Target>, BridgeError> {
    serde_json::from_str(json).map_err(|e| BridgeError::InvalidConfig(format!("targets: {e}")))
}

/// Reads and parses a JSON target file.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidConfig`] if the file cannot be read or
/// does not contain a valid target array.
pub fn load_targets_file(path: &Path) -> Result<Vec<Target>, BridgeError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        BridgeError::InvalidConfig(format!("targets file {}: {e}", path.display()))
    })?;
    parse_targets(&json)
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses a variable as a boolean. Accepts `"true"`, `"1"`, `"false"`,
/// `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_var_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;
    use crate::domain::Vec3;

    fn load(vars: &[(&str, &str)]) -> Result<BridgeConfig, BridgeError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        BridgeConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_empty() {
        let Ok(cfg) = load(&[]) else {
            panic!("empty config should load");
        };
        assert!(cfg.socket_url.is_none());
        assert!(cfg.targets.is_empty());
        assert!((cfg.angle_threshold_deg - 10.0).abs() < f32::EPSILON);
        assert_eq!(cfg.keepalive_interval, Duration::from_millis(500));
        assert_eq!(cfg.greeting, "LensStudio: Connected");
        assert!(!cfg.debug_mode);
    }

    #[test]
    fn threshold_is_clamped() {
        let Ok(high) = load(&[("BRIDGE_ANGLE_THRESHOLD", "90")]) else {
            panic!("config should load");
        };
        assert!((high.angle_threshold_deg - 45.0).abs() < f32::EPSILON);

        let Ok(low) = load(&[("BRIDGE_ANGLE_THRESHOLD", "0.2")]) else {
            panic!("config should load");
        };
        assert!((low.angle_threshold_deg - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_number_falls_back() {
        let Ok(cfg) = load(&[("BRIDGE_KEEPALIVE_MS", "soon")]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.keepalive_interval, Duration::from_millis(500));
    }

    #[test]
    fn event_bus_capacity_is_bounded() {
        let Ok(cfg) = load(&[("EVENT_BUS_CAPACITY", "18446744073709551615")]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.event_bus_capacity, MAX_EVENT_BUS_CAPACITY);

        let Ok(cfg) = load(&[("EVENT_BUS_CAPACITY", "0")]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.event_bus_capacity, 1);

        let Ok(cfg) = load(&[("EVENT_BUS_CAPACITY", "-5")]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.event_bus_capacity, DEFAULT_EVENT_BUS_CAPACITY);
    }

    #[test]
    fn huge_capacity_builds_a_bridge() {
        let Ok(cfg) = load(&[("EVENT_BUS_CAPACITY", "18446744073709551615")]) else {
            panic!("config should load");
        };
        let bridge = crate::bridge::Bridge::new(cfg);
        let _rx = bridge.event_bus().subscribe();
        assert_eq!(bridge.event_bus().receiver_count(), 1);
    }

    #[test]
    fn blank_url_is_none() {
        let Ok(cfg) = load(&[("BRIDGE_SOCKET_URL", "   ")]) else {
            panic!("config should load");
        };
        assert!(cfg.socket_url.is_none());
    }

    #[test]
    fn targets_from_json() {
        let Ok(cfg) = load(&[(
            "BRIDGE_TARGETS",
            r#"[{"name":"MainFan","position":[1,0,2]},{"name":"MainLight","position":[0,1,0]}]"#,
        )]) else {
            panic!("targets should parse");
        };
        assert_eq!(cfg.targets.len(), 2);
        assert_eq!(cfg.targets.first().map(|t| t.name.as_str()), Some("MainFan"));
        assert_eq!(
            cfg.targets.get(1).map(|t| t.position),
            Some(Vec3::new(0.0, 1.0, 0.0))
        );
    }

    #[test]
    fn malformed_targets_rejected() {
        let result = load(&[("BRIDGE_TARGETS", r#"[{"name":"Lamp"}]"#)]);
        assert!(matches!(result, Err(BridgeError::InvalidConfig(_))));
    }

    #[test]
    fn targets_from_file() {
        let Ok(mut file) = tempfile::NamedTempFile::new() else {
            panic!("tempfile");
        };
        let written = file.write_all(br#"[{"name":"Lamp","position":[0,0,1]}]"#);
        assert!(written.is_ok());

        let path = file.path().to_string_lossy().to_string();
        let Ok(cfg) = load(&[("BRIDGE_TARGETS_FILE", path.as_str())]) else {
            panic!("targets file should load");
        };
        assert_eq!(cfg.targets, vec![Target::new("Lamp", Vec3::new(0.0, 0.0, 1.0))]);
    }

    #[test]
    fn missing_targets_file_rejected() {
        let result = load(&[("BRIDGE_TARGETS_FILE", "/nonexistent/targets.json")]);
        assert!(matches!(result, Err(BridgeError::InvalidConfig(_))));
    }

    #[test]
    fn debug_flag_variants() {
        for (raw, expected) in [("TRUE", true), ("1", true), ("0", false), ("maybe", false)] {
            let Ok(cfg) = load(&[("BRIDGE_DEBUG", raw)]) else {
                panic!("config should load");
            };
            assert_eq!(cfg.debug_mode, expected, "BRIDGE_DEBUG={raw}");
        }
    }
}
