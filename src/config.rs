use serde::{Deserialize, Serialize};
use tracing::warn;

use std::path::{Path, PathBuf};

use crate::{
    board::Player,
    error::ConfigError,
    search::{Difficulty, SearchConfig},
};

/// The deepest search accepted from configuration
pub const MAX_DEPTH: usize = 8;

const COMPUTER_NAME: &str = "Computer";
const SECOND_HUMAN_NAME: &str = "Player 2";

/// Values given on the command line, which win over the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub depth: Option<usize>,
    /// Wins over `depth` when both are given
    pub difficulty: Option<Difficulty>,
    pub seed: Option<u64>,
    pub record_path: Option<PathBuf>,
}

/// Application configuration, loadable from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    /// Overrides `search.depth` when set
    pub difficulty: Option<Difficulty>,
    pub player_one: String,
    pub player_two: String,
    /// NDJSON file finished games are appended to
    pub record_path: Option<PathBuf>,
    /// Seed for reproducible tie-breaks
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            search: SearchConfig::default(),
            difficulty: None,
            player_one: "Player 1".to_string(),
            player_two: COMPUTER_NAME.to_string(),
            record_path: None,
            seed: None,
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
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command line values on top of the loaded file
    pub fn merge(&mut self, overrides: Overrides) {
        if let Some(depth) = overrides.depth {
            self.search.depth = depth;
            // an explicit depth replaces the file's difficulty
            self.difficulty = None;
        }
        if overrides.difficulty.is_some() {
            self.difficulty = overrides.difficulty;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.record_path.is_some() {
            self.record_path = overrides.record_path;
        }
    }

    /// Player one and player two names when `computer` is the side the computer plays
    ///
    /// `player_two` names the computer. In a game between two people it names
    /// the second person, unless it is still the default computer name.
    pub fn player_names(&self, computer: Option<Player>) -> (String, String) {
        match computer {
            Some(Player::One) => (self.player_two.clone(), self.player_one.clone()),
            Some(Player::Two) => (self.player_one.clone(), self.player_two.clone()),
            None if self.player_two == COMPUTER_NAME => {
                (self.player_one.clone(), SECOND_HUMAN_NAME.to_string())
            }
            None => (self.player_one.clone(), self.player_two.clone()),
        }
    }

    /// The search parameters after applying the difficulty
    pub fn search_config(&self) -> SearchConfig {
        match self.difficulty {
            Some(difficulty) => SearchConfig {
                depth: difficulty.depth(),
                ..self.search
            },
            None => self.search,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_config().depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.depth must be at most {}",
                MAX_DEPTH
            )));
        }
        if self.player_one.trim().is_empty() || self.player_two.trim().is_empty() {
            return Err(ConfigError::Validation(
                "player names must not be empty".into(),
            ));
        }
        Ok(())
    }
}
