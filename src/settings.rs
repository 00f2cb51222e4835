//! Game settings and preferences
//!
//! Read from an optional JSON file at startup. Every field has a default, so a
//! file only needs the keys it wants to change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::tuning::Tuning;

/// Environment variable naming the settings file for the native binary
pub const CONFIG_ENV: &str = "FLAPPY_COOKIE_CONFIG";

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Run ===
    /// RNG seed; a fresh one is picked each launch when absent
    pub seed: Option<u64>,
    /// How long the headless demo plays (seconds of game time)
    pub demo_seconds: f32,
    /// Write the final demo frame here as a PNG image
    pub snapshot_path: Option<PathBuf>,
    /// Pace the demo to the wall clock instead of a fixed 60 Hz step
    pub realtime: bool,

    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            seed: None,
            demo_seconds: 30.0,
            snapshot_path: None,
            realtime: false,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_volumes();
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, GameError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Serialize settings as pretty JSON
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configured seed, or one derived from the system clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    fn clamp_volumes(&mut self) {
        for vol in [
            &mut self.master_volume,
            &mut self.sfx_volume,
            &mut self.music_volume,
        ] {
            if !(0.0..=1.0).contains(&*vol) {
                log::warn!("Volume {} out of range, clamping", vol);
                *vol = vol.clamp(0.0, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "seed": 42, "muted": true, "tuning": {{ "gravity": 800.0 }} }}"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.muted);
        assert_eq!(settings.tuning.gravity, 800.0);
        // Untouched fields keep their defaults
        assert_eq!(settings.tuning.ground_speed, 360.0);
        assert_eq!(settings.music_volume, 0.7);
        assert!(!settings.realtime);
    }

    #[test]
    fn test_realtime_flag() {
        let settings = Settings::from_json(r#"{ "realtime": true, "demo_seconds": 5.0 }"#).unwrap();
        assert!(settings.realtime);
        assert_eq!(settings.demo_seconds, 5.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, GameError::Json(_)));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let err = Settings::from_json(r#"{ "tuning": { "score_interval_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));
    }

    #[test]
    fn test_volumes_clamped() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.0 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_json_roundtrip_keeps_seed() {
        let settings = Settings {
            seed: Some(7),
            ..Default::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back.seed, Some(7));
    }

    #[test]
    fn test_resolve_seed_prefers_configured() {
        let settings = Settings {
            seed: Some(99),
            ..Default::default()
        };
        assert_eq!(settings.resolve_seed(), 99);
    }
}
