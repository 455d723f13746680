use std::path::Path;

use crate::error::ConfigError;
use crate::game::{Board, COLS, MAX_COLS, MAX_ROWS, ROWS};
use crate::search::{CacheScope, SearchMode};

/// Board shape used when no board file is given.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
        }
    }
}

impl BoardConfig {
    /// Empty, fully playable board of this shape
    pub fn empty_board(&self) -> Board {
        Board::new(self.rows, self.cols)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched from the position, the first move included
    pub depth: usize,
    pub mode: SearchMode,
    /// Search each first move on a worker pool
    pub parallel: bool,
    /// Worker threads; 0 lets rayon choose
    pub threads: usize,
    pub cache: CacheScope,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 4,
            mode: SearchMode::Exhaustive,
            parallel: false,
            threads: 0,
            cache: CacheScope::PerWorker,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
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
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be >= 1".into()));
        }
        if self.board.cols == 0 {
            return Err(ConfigError::Validation("board.cols must be >= 1".into()));
        }
        if self.board.rows > MAX_ROWS {
            return Err(ConfigError::Validation(format!(
                "board.rows must be <= {MAX_ROWS}"
            )));
        }
        if self.board.cols > MAX_COLS {
            return Err(ConfigError::Validation(format!(
                "board.cols must be <= {MAX_COLS}"
            )));
        }

        let cells = self
            .board
            .rows
            .checked_mul(self.board.cols)
            .ok_or_else(|| ConfigError::Validation("board.rows * board.cols overflows".into()))?;
        if self.search.depth > cells {
            return Err(ConfigError::Validation(format!(
                "search.depth must be <= {cells}"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
    }
}
