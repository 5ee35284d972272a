//! Ripple configuration system
//!
//! User-level configuration merged under CLI arguments and environment variables.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Environment variables (RIPPLE_LANG, RIPPLE_INIT)
//! 3. User-level (~/.config/ripple/config.toml)
//! 4. Default values
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use ripple::util::config::load_user_config;
//!
//! // Returns defaults when no config file exists
//! let config = load_user_config().unwrap();
//! println!("{}", config.repl.prompt);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User-level configuration for Ripple
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Internationalization settings
    #[serde(default)]
    pub i18n: I18nConfig,
    /// REPL settings
    #[serde(default)]
    pub repl: ReplConfig,
}

/// I18n configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Language for log and console messages
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
        }
    }
}

/// REPL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReplConfig {
    /// Primary prompt in stream mode
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Prompt shown while a block is still open
    #[serde(default = "default_continuation_prompt")]
    pub continuation_prompt: String,
    /// Primary prompt in the windowed console
    #[serde(default = "default_gui_prompt")]
    pub gui_prompt: String,
    /// History file for the line editor
    #[serde(default)]
    pub history_file: Option<PathBuf>,
    /// History size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Use the line editor when stdin is a terminal
    #[serde(default = "default_line_editing")]
    pub line_editing: bool,
    /// Inputs that end the session
    #[serde(default = "default_exit_commands")]
    pub exit_commands: Vec<String>,
    /// Definitions file loaded when none is given on the command line
    #[serde(default)]
    pub init_file: Option<PathBuf>,
}

fn default_prompt() -> String {
    "# ".to_string()
}

fn default_continuation_prompt() -> String {
    ". ".to_string()
}

fn default_gui_prompt() -> String {
    "> ".to_string()
}

fn default_history_size() -> usize {
    1000
}

fn default_line_editing() -> bool {
    true
}

fn default_exit_commands() -> Vec<String> {
    ["exit", "quit", ":q", ":quit", ":exit"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            continuation_prompt: default_continuation_prompt(),
            gui_prompt: default_gui_prompt(),
            history_file: None,
            history_size: default_history_size(),
            line_editing: default_line_editing(),
            exit_commands: default_exit_commands(),
            init_file: None,
        }
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("ripple"));
    }

    // Fallback to ~/.config/ripple
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("ripple"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("ripple"));
    }

    None
}

/// Get the user config file path (~/.config/ripple/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load user-level configuration
/// Returns default config if file doesn't exist
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(UserConfig::default()),
    }
}

/// Load configuration from an explicit path
pub fn load_config_from(path: &Path) -> Result<UserConfig, ConfigError> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = fs::read_to_string(path).map_err(ConfigError::IoError)?;
    parse_config(&content)
}

/// Parse configuration text
pub fn parse_config(content: &str) -> Result<UserConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::ParseError)
}

/// Save user-level configuration
pub fn save_user_config(config: &UserConfig) -> Result<(), ConfigError> {
    let dir = get_config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    // Create directory if not exists
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(ConfigError::IoError)?;
    }

    let content = toml::to_string_pretty(config).map_err(ConfigError::SerializeError)?;
    fs::write(&path, content).map_err(ConfigError::IoError)?;

    Ok(())
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(toml::de::Error),
    SerializeError(toml::ser::Error),
    NoConfigDir,
}

impl std::fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Config serialize error: {}", e),
            ConfigError::NoConfigDir => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for ConfigError {}
