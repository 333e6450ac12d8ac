use std::path::Path;

use crate::ai::Difficulty;
use crate::error::{ConfigError, EngineError};
use crate::game::{check_dimensions, GameState, Player};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub players: PlayersConfig,
    pub ui: UiConfig,
}

/// Board shape and winning run length.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 6,
            cols: 7,
            win_length: 4,
        }
    }
}

impl GameConfig {
    /// Start a fresh game with these settings
    pub fn new_state(&self) -> Result<GameState, EngineError> {
        GameState::new(self.rows, self.cols, self.win_length)
    }
}

/// Who controls a seat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    Human,
    Computer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub kind: Controller,
    /// Only used when `kind` is computer
    pub difficulty: Difficulty,
}

impl PlayerConfig {
    pub fn human() -> Self {
        PlayerConfig {
            kind: Controller::Human,
            difficulty: Difficulty::Tactical,
        }
    }

    pub fn computer(difficulty: Difficulty) -> Self {
        PlayerConfig {
            kind: Controller::Computer,
            difficulty,
        }
    }

    pub fn is_human(&self) -> bool {
        self.kind == Controller::Human
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::human()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub first: PlayerConfig,
    pub second: PlayerConfig,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            first: PlayerConfig::human(),
            second: PlayerConfig::computer(Difficulty::Tactical),
        }
    }
}

impl PlayersConfig {
    /// Seat configuration for `player`
    pub fn seat(&self, player: Player) -> &PlayerConfig {
        match player {
            Player::One => &self.first,
            Player::Two => &self.second,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause before a computer move, so people can follow the game
    pub computer_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            computer_delay_ms: 1000,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(
                "config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimensions(self.game.rows, self.game.cols, self.game.win_length)
            .map_err(|e| ConfigError::Validation(format!("game: {e}")))?;
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
