//! Board layout and game configuration.

use super::{PLAYER_COLORS, Player};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Numeric shape of the board.
///
/// The board has one spoke per player color, so both rings must be a
/// positive multiple of the number of player colors. Every constructor,
/// deserialization included, enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct BoardLayout {
    /// Number of fields on the outer ring.
    outer_ring: usize,

    /// Number of fields on the inner ring.
    inner_ring: usize,

    /// Connector fields on each spoke between the two rings.
    spoke_length: usize,
}

/// Unvalidated layout as it appears in config files.
#[derive(Deserialize)]
struct RawLayout {
    #[serde(default = "default_outer_ring")]
    outer_ring: usize,
    #[serde(default = "default_inner_ring")]
    inner_ring: usize,
    #[serde(default = "default_spoke_length")]
    spoke_length: usize,
}

impl TryFrom<RawLayout> for BoardLayout {
    type Error = ConfigError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        Self::new(raw.outer_ring, raw.inner_ring, raw.spoke_length)
    }
}

fn default_outer_ring() -> usize {
    20
}

fn default_inner_ring() -> usize {
    20
}

fn default_spoke_length() -> usize {
    6
}

impl BoardLayout {
    /// Creates a validated layout.
    #[instrument]
    pub fn new(
        outer_ring: usize,
        inner_ring: usize,
        spoke_length: usize,
    ) -> Result<Self, ConfigError> {
        let layout = Self {
            outer_ring,
            inner_ring,
            spoke_length,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that both rings can carry one spoke per player color.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, len) in [("outer_ring", self.outer_ring), ("inner_ring", self.inner_ring)] {
            if len == 0 || len % PLAYER_COLORS != 0 {
                return Err(ConfigError::new(format!(
                    "{} must be a positive multiple of {}, got {}",
                    name, PLAYER_COLORS, len
                )));
            }
        }
        Ok(())
    }

    /// Total number of fields the layout produces.
    pub fn field_count(&self) -> usize {
        self.outer_ring + PLAYER_COLORS * self.spoke_length + self.inner_ring
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            outer_ring: default_outer_ring(),
            inner_ring: default_inner_ring(),
            spoke_length: default_spoke_length(),
        }
    }
}

/// Game configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board shape.
    #[serde(default)]
    layout: BoardLayout,

    /// Player who takes the first turn.
    #[serde(default)]
    first_player: Player,
}

impl GameConfig {
    /// Creates a configuration from its parts.
    pub fn new(layout: BoardLayout, first_player: Player) -> Self {
        Self {
            layout,
            first_player,
        }
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            fields = config.layout.field_count(),
            first_player = %config.first_player,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_layout_matches_classic_board() {
        let layout = BoardLayout::default();
        assert_eq!(layout.field_count(), 70);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_rejects_ring_not_divisible_by_colors() {
        let err = BoardLayout::new(18, 20, 6).unwrap_err();
        assert!(err.message.contains("outer_ring"));
        assert!(BoardLayout::new(20, 0, 6).is_err());
    }

    #[test]
    fn test_zero_length_spokes_allowed() {
        let layout = BoardLayout::new(10, 5, 0).unwrap();
        assert_eq!(layout.field_count(), 15);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = "first_player = \"B\"\n[layout]\nspoke_length = 2\n";
        let config = GameConfig::from_toml(toml).unwrap();
        assert_eq!(*config.first_player(), Player::B);
        assert_eq!(*config.layout().spoke_length(), 2);
        assert_eq!(*config.layout().outer_ring(), 20);
    }

    #[test]
    fn test_invalid_toml_layout_rejected() {
        let err = GameConfig::from_toml("[layout]\ninner_ring = 7\n").unwrap_err();
        assert!(err.message.contains("inner_ring"));
    }

    #[test]
    fn test_deserialize_rejects_invalid_layout() {
        let zero = serde_json::from_str::<GameConfig>(r#"{"layout":{"inner_ring":0}}"#);
        assert!(zero.is_err());

        let uneven = serde_json::from_str::<BoardLayout>(r#"{"outer_ring":12}"#);
        let err = uneven.unwrap_err().to_string();
        assert!(err.contains("outer_ring must be a positive multiple of 5"));

        let valid = serde_json::from_str::<BoardLayout>(r#"{"outer_ring":10}"#).unwrap();
        assert_eq!(valid.field_count(), 60);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nouter_ring = 10\ninner_ring = 10\nspoke_length = 1").unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.layout().field_count(), 25);
        assert_eq!(*config.first_player(), Player::A);
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_file("/nonexistent/strictly_rings.toml").unwrap_err();
        assert!(err.message.contains("Failed to read"));
    }
}
