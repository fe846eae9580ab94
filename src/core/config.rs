//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lectio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LectioConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub pronouns: PronounsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DataConfig {
    pub dir: Option<String>,
    pub old_testament: Option<String>,
    pub new_testament: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub addr: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReaderConfig {
    pub endpoint: Option<String>,
    pub show_verse_numbers: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PronounsConfig {
    pub rules_file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OLD_TESTAMENT_FILE: &str = "old-testament-data.json";
pub const DEFAULT_NEW_TESTAMENT_FILE: &str = "new-testament-data.json";
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub old_testament_path: PathBuf,
    pub new_testament_path: PathBuf,
    pub server_addr: String,
    pub endpoint: String,
    pub show_verse_numbers: bool,
    pub rules_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Corpus files in processing order: Old Testament, then New Testament.
    pub fn corpus_files(&self) -> [PathBuf; 2] {
        [
            self.old_testament_path.clone(),
            self.new_testament_path.clone(),
        ]
    }
}

/// Values that came from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub addr: Option<String>,
    pub endpoint: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.lectio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lectio").join("config.toml"))
}

/// Load config from `~/.lectio/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LectioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LectioConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LectioConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LectioConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: LectioConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Lectio Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [data]
# dir = "data"                               # Or set LECTIO_DATA_DIR env var
# old_testament = "old-testament-data.json"
# new_testament = "new-testament-data.json"

# [server]
# addr = "127.0.0.1:3000"                    # Or set LECTIO_ADDR env var

# [reader]
# endpoint = "http://127.0.0.1:3000"         # Or set LECTIO_ENDPOINT env var
# show_verse_numbers = true

# [pronouns]
# rules_file = "pronoun-rules.toml"          # Path relative to ~/.lectio/
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LectioConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Data dir: env → config → default
    let data_dir = PathBuf::from(
        std::env::var("LECTIO_DATA_DIR")
            .ok()
            .or_else(|| config.data.dir.clone())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
    );

    let old_testament_path = data_dir.join(
        config
            .data
            .old_testament
            .as_deref()
            .unwrap_or(DEFAULT_OLD_TESTAMENT_FILE),
    );
    let new_testament_path = data_dir.join(
        config
            .data
            .new_testament
            .as_deref()
            .unwrap_or(DEFAULT_NEW_TESTAMENT_FILE),
    );

    // Server address: CLI → env → config → default
    let server_addr = cli
        .addr
        .clone()
        .or_else(|| std::env::var("LECTIO_ADDR").ok())
        .or_else(|| config.server.addr.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());

    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| std::env::var("LECTIO_ENDPOINT").ok())
        .or_else(|| config.reader.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Rules file is relative to ~/.lectio/ unless absolute
    let rules_file = config.pronouns.rules_file.as_ref().map(|file| {
        let path = PathBuf::from(file);
        if path.is_absolute() {
            path
        } else {
            dirs::home_dir()
                .map(|h| h.join(".lectio").join(&path))
                .unwrap_or(path)
        }
    });

    ResolvedConfig {
        old_testament_path,
        new_testament_path,
        server_addr,
        endpoint,
        show_verse_numbers: config.reader.show_verse_numbers.unwrap_or(true),
        rules_file,
    }
}
