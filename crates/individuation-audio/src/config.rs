//! Audio configuration.

use individuation_core::error::DomainError;
use serde::Deserialize;

use crate::domain::tracks::{BgmTrack, SfxCue};

/// Environment variable overriding [`AudioConfig::base_path`].
pub const AUDIO_BASE_VAR: &str = "INDIVIDUATION_AUDIO_BASE";
/// Environment variable overriding [`AudioConfig::bgm_volume`].
pub const BGM_VOLUME_VAR: &str = "INDIVIDUATION_BGM_VOLUME";
/// Environment variable overriding [`AudioConfig::sfx_volume`].
pub const SFX_VOLUME_VAR: &str = "INDIVIDUATION_SFX_VOLUME";

/// Where audio assets live and how loud they play.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// URL prefix of every audio asset, without a trailing slash.
    pub base_path: String,
    /// Background track volume in `0.0..=1.0`.
    pub bgm_volume: f32,
    /// Sound cue volume in `0.0..=1.0`.
    pub sfx_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            base_path: "/audio".to_owned(),
            bgm_volume: 0.6,
            sfx_volume: 0.5,
        }
    }
}

impl AudioConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if a volume is not a number in
    /// `0.0..=1.0`.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`; unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if a volume is not a number in
    /// `0.0..=1.0`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let mut config = Self::default();
        if let Some(base) = lookup(AUDIO_BASE_VAR) {
            config.base_path = base.trim_end_matches('/').to_owned();
        }
        if let Some(raw) = lookup(BGM_VOLUME_VAR) {
            config.bgm_volume = parse_volume(BGM_VOLUME_VAR, &raw)?;
        }
        if let Some(raw) = lookup(SFX_VOLUME_VAR) {
            config.sfx_volume = parse_volume(SFX_VOLUME_VAR, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks both volumes are within range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` naming the offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, volume) in [("bgm_volume", self.bgm_volume), ("sfx_volume", self.sfx_volume)] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(DomainError::Configuration(format!(
                    "{field} must be within 0.0..=1.0, got {volume}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn track_url(&self, track: BgmTrack) -> String {
        format!("{}/{}.{}", self.base_path, track.key(), track.extension())
    }

    #[must_use]
    pub fn cue_url(&self, cue: SfxCue) -> String {
        format!("{}/{}.mp3", self.base_path, cue.key())
    }
}

fn parse_volume(name: &str, raw: &str) -> Result<f32, DomainError> {
    raw.trim()
        .parse()
        .map_err(|e| DomainError::Configuration(format!("{name} must be a number: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let config = AudioConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, AudioConfig::default());
        assert_eq!(config.track_url(BgmTrack::Jitan), "/audio/bgm-jitan.wav");
        assert_eq!(config.cue_url(SfxCue::Item), "/audio/sfx-item.mp3");
    }

    #[test]
    fn test_overrides_are_read_and_trailing_slash_dropped() {
        // Arrange
        let vars = lookup(&[
            (AUDIO_BASE_VAR, "https://cdn.example.org/sound/"),
            (BGM_VOLUME_VAR, " 0.25 "),
            (SFX_VOLUME_VAR, "1"),
        ]);

        // Act
        let config = AudioConfig::from_lookup(vars).unwrap();

        // Assert
        assert_eq!(config.base_path, "https://cdn.example.org/sound");
        assert!((config.bgm_volume - 0.25).abs() < f32::EPSILON);
        assert!((config.sfx_volume - 1.0).abs() < f32::EPSILON);
        assert_eq!(
            config.track_url(BgmTrack::Title),
            "https://cdn.example.org/sound/bgm-title.mp3"
        );
    }

    #[test]
    fn test_unparsable_volume_is_a_configuration_error() {
        let result = AudioConfig::from_lookup(lookup(&[(BGM_VOLUME_VAR, "loud")]));

        match result.unwrap_err() {
            DomainError::Configuration(msg) => assert!(msg.contains(BGM_VOLUME_VAR)),
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_volume_is_a_configuration_error() {
        let result = AudioConfig::from_lookup(lookup(&[(SFX_VOLUME_VAR, "1.5")]));

        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_deserialize_fills_missing_fields_with_defaults() {
        let config: AudioConfig = serde_json::from_str(r#"{ "bgm_volume": 0.3 }"#).unwrap();

        assert_eq!(config.base_path, "/audio");
        assert!((config.bgm_volume - 0.3).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_deserialized_out_of_range_volume() {
        let config: AudioConfig = serde_json::from_str(r#"{ "sfx_volume": -0.1 }"#).unwrap();

        assert!(matches!(config.validate(), Err(DomainError::Configuration(_))));
    }
}
