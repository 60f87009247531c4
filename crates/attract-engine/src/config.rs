//! Engine configuration.
//!
//! [`EngineConfig`] deserializes from JSON with every field optional; missing
//! fields take the [`Default`] values.
//!
//! ```
//! use attract_engine::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "title": "PINS", "is_rewind_enabled": true }"#)
//!     .unwrap();
//! assert!(config.has_title());
//! assert!(config.replay_enabled()); // rewind implies recording
//! assert_eq!(config.rewind_capacity, 600);
//! ```

use attract_core::rewind::DEFAULT_REWIND_CAPACITY;
use serde::{Deserialize, Serialize};

/// Errors produced while loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Rewind is enabled but the window cannot hold a single frame.
    #[error("rewind is enabled but rewind_capacity is 0; the window must hold at least one frame")]
    ZeroRewindCapacity,

    /// The JSON text could not be parsed.
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Master seed for the session seed stream.
    pub seed: u64,
    /// Title shown on the title screen. Blank or absent together with a blank
    /// description means the game has no title screen.
    pub title: Option<String>,
    /// Description shown under the title.
    pub description: Option<String>,
    /// Record sessions for attract-mode replay.
    pub is_replay_enabled: bool,
    /// Allow rewinding recent frames. Implies recording.
    pub is_rewind_enabled: bool,
    /// Ask the frontend to play background music during sessions.
    pub is_playing_bgm: bool,
    /// Ask the frontend to draw the score line.
    pub is_showing_score: bool,
    /// Frames kept in the rewind window.
    pub rewind_capacity: usize,
    /// Compare RNG state and draw counts against the recording on every
    /// replayed frame and warn on mismatch.
    pub check_replay_divergence: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            title: None,
            description: None,
            is_replay_enabled: false,
            is_rewind_enabled: false,
            is_playing_bgm: false,
            is_showing_score: true,
            rewind_capacity: DEFAULT_REWIND_CAPACITY,
            check_replay_divergence: cfg!(debug_assertions),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_rewind_enabled && self.rewind_capacity == 0 {
            return Err(ConfigError::ZeroRewindCapacity);
        }
        Ok(())
    }

    /// Whether sessions are recorded.
    pub fn replay_enabled(&self) -> bool {
        self.is_replay_enabled || self.is_rewind_enabled
    }

    /// Whether the game has a title screen to return to.
    pub fn has_title(&self) -> bool {
        is_present(&self.title) || is_present(&self.description)
    }

    /// The master seed with the description and title folded in, so two
    /// games sharing a numeric seed still get distinct seed streams.
    pub fn effective_seed(&self) -> u64 {
        let mut seed = self.seed as i64;
        for text in [&self.description, &self.title].into_iter().flatten() {
            if !text.trim().is_empty() {
                seed = seed.wrapping_add(string_hash(text) as i64);
            }
        }
        seed as u64
    }
}

fn is_present(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

/// 32-bit `h * 31 + c` hash over UTF-16 code units.
pub fn string_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert!(!config.has_title());
        assert!(!config.replay_enabled());
        assert!(config.is_showing_score);
        assert_eq!(config.rewind_capacity, DEFAULT_REWIND_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_is_default() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn blank_title_is_no_title() {
        let config = EngineConfig {
            title: Some("   ".to_owned()),
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_title());
        assert_eq!(config.effective_seed(), 0);
    }

    #[test]
    fn zero_capacity_with_rewind_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"is_rewind_enabled": true, "rewind_capacity": 0}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroRewindCapacity));

        // Without rewind the capacity is irrelevant.
        assert!(EngineConfig::from_json_str(r#"{"rewind_capacity": 0}"#).is_ok());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = EngineConfig::from_json_str("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn string_hash_matches_known_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
        // Wraps rather than overflowing.
        let long = "x".repeat(64);
        let _ = string_hash(&long);
    }

    #[test]
    fn title_changes_effective_seed() {
        let plain = EngineConfig {
            seed: 3,
            ..Default::default()
        };
        let titled = EngineConfig {
            seed: 3,
            title: Some("ab".to_owned()),
            ..Default::default()
        };
        assert_eq!(plain.effective_seed(), 3);
        assert_eq!(titled.effective_seed(), 3 + (97 * 31 + 98));
    }
}
