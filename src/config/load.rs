//! The main config loading module for runls.
//!
//! Handles loading and deserializing settings from `runls.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//! A missing config file is not an error: runls simply uses its internal defaults.

use crate::config::{Display, General, InternalDisplay, Theme};
use crate::core::{Formatter, ListOptions, Palette};
use crate::utils::cli::Invocation;
use crate::utils::get_home;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file and then converted into [Config].
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    display: Display,
    theme: Theme,
}

/// Main configuration struct for runls
#[derive(Debug, Clone, Copy)]
pub struct Config {
    general: General,
    display: InternalDisplay,
    theme: Theme,
}

/// Conversion from RawConfig to Config
/// This handles the range checks of the display values.
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            display: InternalDisplay::from(raw.display),
            theme: raw.theme,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Cannot read config {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_toml(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Error parsing config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a configuration from toml text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &InternalDisplay {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Merges the command-line flags onto the configured defaults.
    pub fn list_options(&self, invocation: &Invocation) -> ListOptions {
        ListOptions {
            show_hidden: self.general.show_hidden() || invocation.show_all(),
            long_format: self.general.long_format() || invocation.long_format(),
            dot_entries: self.general.dot_entries(),
        }
    }

    /// Colors used by the renderers, or a plain palette when color is disabled.
    pub fn palette(&self) -> Palette {
        if self.display.color() {
            self.theme.palette()
        } else {
            Palette::plain()
        }
    }

    /// Builds the renderer for this configuration.
    pub fn formatter(&self) -> Formatter {
        Formatter::new(
            self.display.width(),
            self.display.max_name_len(),
            self.palette(),
        )
    }

    /// Determine the default configuration file path.
    /// Checks the RUNLS_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/runls/runls.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("RUNLS_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("runls/runls.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/runls/runls.toml");
        }
        PathBuf::from("runls.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

const DEFAULT_TOML: &str = r##"# runls.toml - default configuration for runls

# Note:
# Commented values are the internal defaults of runls
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan", "bright_blue")
# Command-line flags (-a, -l) are added on top of the [general] values.

[general]
# show_hidden = false
# long_format = false
# dot_entries = false

[display]
# width = 80
# color = true
# max_name_len = 1023

[theme]
# directory = "blue"
# symlink = "cyan"
# executable = "green"
# bold = true
"##;
