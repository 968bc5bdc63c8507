//! Tracker runtime configuration.
//!
//! # Responsibility
//! - Hold the few knobs an adapter may set when building a tracker.
//! - Parse them from a JSON document with per-field defaults.

use serde::Deserialize;

const DEFAULT_EXPORT_BASENAME: &str = "homework_stats";

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Seed two demo books when the collection starts empty.
    pub seed_sample_data: bool,
    /// File name prefix for exported snapshots.
    pub export_basename: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            export_basename: DEFAULT_EXPORT_BASENAME.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Parses configuration JSON; missing fields fall back to defaults.
    ///
    /// A blank `export_basename` is replaced by the default prefix.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(raw)?;
        if config.export_basename.trim().is_empty() {
            config.export_basename = DEFAULT_EXPORT_BASENAME.to_string();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::TrackerConfig;

    #[test]
    fn empty_object_uses_defaults() {
        let config = TrackerConfig::from_json("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config =
            TrackerConfig::from_json(r#"{"seed_sample_data": false, "export_basename": "hw"}"#)
                .unwrap();
        assert!(!config.seed_sample_data);
        assert_eq!(config.export_basename, "hw");
    }

    #[test]
    fn blank_basename_falls_back() {
        let config = TrackerConfig::from_json(r#"{"export_basename": "  "}"#).unwrap();
        assert_eq!(config.export_basename, "homework_stats");
    }
}
