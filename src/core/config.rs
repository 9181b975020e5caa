//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.vertex-chat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::state::{ReplyPolicy, Theme};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
    pub reply_delay_ms: Option<u64>,
    pub reply_policy: Option<ReplyPolicy>,
    pub copy_feedback_ms: Option<u64>,
    pub time_format: Option<String>,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub theme: Option<Theme>,
    pub reply_delay_ms: Option<u64>,
    pub reply_policy: Option<ReplyPolicy>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPLY_DELAY_MS: u64 = 2000;
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 2000;
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

const ENV_THEME: &str = "VERTEX_CHAT_THEME";
const ENV_REPLY_DELAY_MS: &str = "VERTEX_CHAT_REPLY_DELAY_MS";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub theme: Theme,
    pub reply_delay: Duration,
    pub reply_policy: ReplyPolicy,
    pub copy_feedback: Duration,
    pub time_format: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            reply_policy: ReplyPolicy::default(),
            copy_feedback: Duration::from_millis(DEFAULT_COPY_FEEDBACK_MS),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
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

/// Returns the path to `~/.vertex-chat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".vertex-chat").join("config.toml"))
}

/// Load config from `~/.vertex-chat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(ChatConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ChatConfig::default());
    }

    load_config_from(&path)
}

/// Parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<ChatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# vertex-chat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "light"              # "light" or "dark" (env VERTEX_CHAT_THEME)
# reply_delay_ms = 2000        # simulated reply latency (env VERTEX_CHAT_REPLY_DELAY_MS)
# reply_policy = "queue"       # "queue" or "concurrent"
# copy_feedback_ms = 2000      # how long "Copied!" stays visible
# time_format = "%H:%M"        # strftime format for message timestamps
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &ChatConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| env(ENV_THEME).and_then(|v| parse_theme(&v)))
        .or(config.general.theme)
        .unwrap_or_default();

    // Reply delay: CLI → env → config → default
    let reply_delay_ms = cli
        .reply_delay_ms
        .or_else(|| {
            env(ENV_REPLY_DELAY_MS).and_then(|v| match v.trim().parse() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    warn!("Ignoring {ENV_REPLY_DELAY_MS}={v:?}: {e}");
                    None
                }
            })
        })
        .or(config.general.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    let time_format = config
        .general
        .time_format
        .clone()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string());

    ResolvedConfig {
        theme,
        reply_delay: Duration::from_millis(reply_delay_ms),
        reply_policy: cli
            .reply_policy
            .or(config.general.reply_policy)
            .unwrap_or_default(),
        copy_feedback: Duration::from_millis(
            config
                .general
                .copy_feedback_ms
                .unwrap_or(DEFAULT_COPY_FEEDBACK_MS),
        ),
        time_format,
    }
}

fn parse_theme(value: &str) -> Option<Theme> {
    match value.trim().to_ascii_lowercase().as_str() {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        other => {
            warn!("Ignoring unknown theme {other:?} from {ENV_THEME}");
            None
        }
    }
}
