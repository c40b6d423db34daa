//! Configuration management for awsbreeze.
//!
//! Configuration is read from `~/.config/awsbreeze/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_FEED_URL: &str = "https://aws.amazon.com/about-aws/whats-new/recent/feed/";
pub const DEFAULT_FEED_TITLE: &str = "AWS What's New";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Which feed to read and how to label it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub title: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            title: DEFAULT_FEED_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        config.validate()
    }

    /// Replace the feed URL, e.g. from a command-line override.
    pub fn with_feed_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.feed.url = url.to_string();
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        url::Url::parse(&self.feed.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.feed.url.clone(),
            source: e,
        })?;
        self.keybindings
            .validate()
            .map_err(ConfigError::InvalidKeybinding)?;
        Ok(self)
    }

    /// Get the default config file path: `~/.config/awsbreeze/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("awsbreeze").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        format!(
            r##"# awsbreeze configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
# - 256-color palette indices: "0" to "255"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Named keys: Enter, Esc, Space, Up, Down, Left, Right, Home, End,
#   PageUp, PageDown
# - With modifiers: "Ctrl+c", "Alt+Enter", "Shift+Up"

[feed]
url = "{url}"
title = "{title}"

[colors]
title_fg = "White"
title_bg = "62"
border = "DarkGray"

# List entries
item_title = "White"
item_summary = "DarkGray"
item_date = "Cyan"
new_item = "LightGreen"

# Selection highlight
selection_bg = "62"
selection_fg = "White"

prompt_border = "Cyan"
error = "LightRed"
status_fg = "Gray"

[keybindings]
# Navigation
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["PageDown"]
prev_page = ["PageUp"]
first = ["g", "Home"]
last = ["G", "End"]

# Actions
open = ["Enter"]
refresh = ["r"]
filter = ["f"]
clear_filter = ["c"]
mark_all_seen = ["n"]
toggle_help = ["h"]
"##,
            url = DEFAULT_FEED_URL,
            title = DEFAULT_FEED_TITLE,
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid feed URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Invalid keybinding: {0}")]
    InvalidKeybinding(String),
}
