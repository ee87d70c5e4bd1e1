// Configuration loading and parsing (config/keepscore.toml).

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use keepscore_core::player::PlayerScore;
use serde::Deserialize;
use thiserror::Error;

/// File name of the configuration, under both `defaults/` and `config/`.
pub const CONFIG_FILE: &str = "keepscore.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// keepscore.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub roster: RosterConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Players can't be deleted once the roster is down to this many.
    pub min_players: usize,
    /// One entry per starting player; an empty string leaves it unnamed.
    pub initial_players: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsConfig {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        SuggestionsConfig {
            names: Vec::new(),
            limit: default_suggestion_limit(),
        }
    }
}

fn default_suggestion_limit() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "keepscore_app=info,keepscore_core=info,warn".to_string()
}

impl Config {
    /// The starting roster described by `roster.initial_players`.
    pub fn initial_players(&self) -> Vec<PlayerScore> {
        self.roster
            .initial_players
            .iter()
            .enumerate()
            .map(|(number, name)| PlayerScore::new(Some(name.as_str()), number))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/keepscore.toml` relative to `base_dir`.
///
/// Does not copy defaults; see [`load_config`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy every file in `defaults/` that is missing from `config/`.
///
/// Returns the paths that were written. Existing files in `config/` are never
/// overwritten, and `.example` templates are skipped.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither defaults/ nor config/ directory found in {}",
                base_dir.display()
            ),
        });
    }

    let copy_error = |message: String| ConfigError::DefaultsCopyError { message };

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("failed to create config directory: {e}")))?;

    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_error(format!("failed to read defaults directory: {e}")))?;

    let mut copied = Vec::new();
    for entry in entries {
        let source = entry
            .map_err(|e| copy_error(format!("failed to read defaults entry: {e}")))?
            .path();
        let Some(file_name) = source.file_name().filter(|_| source.is_file()) else {
            continue;
        };
        if file_name.to_string_lossy().ends_with(".example") {
            continue;
        }

        let target = config_dir.join(file_name);

        // `create_new` refuses to open a file that already exists, even one
        // created after the directory was listed.
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&source)
                    .map_err(|e| copy_error(format!("failed to read {}: {e}", source.display())))?;
                dest.write_all(&content)
                    .map_err(|e| copy_error(format!("failed to write {}: {e}", target.display())))?;
                copied.push(target);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(copy_error(format!(
                    "failed to create {}: {e}",
                    target.display()
                )));
            }
        }
    }

    Ok(copied)
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let roster = &config.roster;
    if roster.min_players == 0 {
        return Err(ConfigError::ValidationError {
            field: "roster.min_players".into(),
            message: "must be at least 1".into(),
        });
    }

    if roster.initial_players.len() < roster.min_players {
        return Err(ConfigError::ValidationError {
            field: "roster.initial_players".into(),
            message: format!(
                "needs at least {} entries (roster.min_players), got {}",
                roster.min_players,
                roster.initial_players.len()
            ),
        });
    }

    if config.suggestions.limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "suggestions.limit".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}
