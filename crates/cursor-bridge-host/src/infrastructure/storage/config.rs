//! TOML-based configuration for the host.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\CursorBridge\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/cursorbridge/config.toml` or
//!   `~/.config/cursorbridge/config.toml`
//! - macOS:    `~/Library/Application Support/CursorBridge/config.toml`
//!
//! Example:
//!
//! ```toml
//! [host]
//! log_level = "debug"
//! start_locked = true
//!
//! [display]
//! primary_width = 1024
//! primary_height = 768
//! external_edge = "trailing"
//! external_width = 800      # both external_* present: connected at startup
//! external_height = 600
//!
//! [[controls]]
//! id = "unlock"
//! surface = "external"
//! x = 20
//! y = 20
//! width = 160
//! height = 44
//! unlocks_pointer = true
//! ```
//!
//! Every field has a default, so a missing file, an empty file and a file
//! written by an older version all load.

use std::path::{Path, PathBuf};

use cursor_bridge_core::{Edge, Rect, Size, Surface};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A surface dimension is zero, negative or not finite.
    #[error("invalid {field}: {value} (must be a positive number)")]
    InvalidDimension { field: &'static str, value: f64 },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub controls: Vec<ControlEntry>,
}

/// General host behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// Schema version string.
    #[serde(default = "default_version")]
    pub version: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Lock the pointer as soon as the host starts.
    #[serde(default)]
    pub start_locked: bool,
}

/// Surface sizes and placement of the external surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_primary_width")]
    pub primary_width: f64,
    #[serde(default = "default_primary_height")]
    pub primary_height: f64,
    /// Edge of the primary the external surface attaches to.
    #[serde(default)]
    pub external_edge: Edge,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_height: Option<f64>,
}

/// One interactive control, in surface-local coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlEntry {
    pub id: String,
    pub surface: Surface,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Releasing the button over this control unlocks the pointer.
    #[serde(default)]
    pub unlocks_pointer: bool,
}

impl DisplayConfig {
    /// Size of the primary surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] for a non-positive or
    /// non-finite dimension.
    pub fn primary_size(&self) -> Result<Size, ConfigError> {
        Ok(Size::new(
            positive("primary_width", self.primary_width)?,
            positive("primary_height", self.primary_height)?,
        ))
    }

    /// Size of the external surface when both of its dimensions are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] for a non-positive or
    /// non-finite dimension.
    pub fn external_size(&self) -> Result<Option<Size>, ConfigError> {
        match (self.external_width, self.external_height) {
            (Some(width), Some(height)) => Ok(Some(Size::new(
                positive("external_width", width)?,
                positive("external_height", height)?,
            ))),
            _ => Ok(None),
        }
    }
}

impl ControlEntry {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidDimension { field, value })
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_version() -> String {
    "1.0".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_primary_width() -> f64 {
    1024.0
}
fn default_primary_height() -> f64 {
    768.0
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_level: default_log_level(),
            start_locked: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            primary_width: default_primary_width(),
            primary_height: default_primary_height(),
            external_edge: Edge::default(),
            external_width: None,
            external_height: None,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to the platform config file.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_file_path()?)
}

/// Persists `config` to `path`, creating its directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory, including the `CursorBridge`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("CursorBridge"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("cursorbridge"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("CursorBridge")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("cursorbridge_test_{}", Uuid::new_v4()))
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_config_default_has_expected_display() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.display.primary_width, 1024.0);
        assert_eq!(cfg.display.primary_height, 768.0);
        assert_eq!(cfg.display.external_edge, Edge::Trailing);
        assert!(cfg.display.external_size().unwrap().is_none());
    }

    #[test]
    fn test_host_config_default_is_unlocked_at_info() {
        let cfg = HostConfig::default();
        assert_eq!(cfg.log_level, "info");
        assert!(!cfg.start_locked);
    }

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_deserialize_full_config() {
        // Arrange
        let toml_str = r#"
[host]
log_level = "debug"
start_locked = true

[display]
primary_width = 768
primary_height = 1024
external_edge = "bottom"
external_width = 800
external_height = 600

[[controls]]
id = "unlock"
surface = "external"
x = 20
y = 20
width = 160
height = 44
unlocks_pointer = true

[[controls]]
id = "settings"
surface = "primary"
x = 0
y = 0
width = 10
height = 10
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize");

        // Assert
        assert!(cfg.host.start_locked);
        assert_eq!(cfg.host.log_level, "debug");
        assert_eq!(cfg.display.external_edge, Edge::Bottom);
        assert_eq!(
            cfg.display.external_size().unwrap(),
            Some(Size::new(800.0, 600.0))
        );
        assert_eq!(cfg.controls.len(), 2);
        assert_eq!(cfg.controls[0].surface, Surface::External);
        assert!(cfg.controls[0].unlocks_pointer);
        assert!(!cfg.controls[1].unlocks_pointer);
        assert_eq!(cfg.controls[0].bounds(), Rect::new(20.0, 20.0, 160.0, 44.0));
    }

    #[test]
    fn test_external_size_requires_both_dimensions() {
        let display = DisplayConfig {
            external_width: Some(800.0),
            ..DisplayConfig::default()
        };
        assert_eq!(display.external_size().unwrap(), None);
    }

    #[test]
    fn test_non_positive_dimensions_are_rejected() {
        let display = DisplayConfig {
            primary_width: 0.0,
            ..DisplayConfig::default()
        };
        assert!(matches!(
            display.primary_size(),
            Err(ConfigError::InvalidDimension {
                field: "primary_width",
                ..
            })
        ));

        let display = DisplayConfig {
            external_width: Some(800.0),
            external_height: Some(-1.0),
            ..DisplayConfig::default()
        };
        assert!(matches!(
            display.external_size(),
            Err(ConfigError::InvalidDimension {
                field: "external_height",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_edge_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[display]\nexternal_edge = \"left\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_absent_external_dimensions_are_not_serialized() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).expect("serialize");
        assert!(!toml_str.contains("external_width"));
        assert!(!toml_str.contains("external_height"));
    }

    // ── Files ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        let path = temp_dir().join("config.toml");
        let cfg = load_config_from(&path).expect("missing file is not an error");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_save_then_load_via_temp_dir() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.host.log_level = "trace".to_string();
        cfg.display.external_width = Some(1280.0);
        cfg.display.external_height = Some(720.0);
        cfg.controls.push(ControlEntry {
            id: "unlock".to_string(),
            surface: Surface::Primary,
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
            unlocks_pointer: true,
        });

        // Act
        save_config_to(&cfg, &path).expect("save creates directories");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_from_malformed_file_is_parse_error() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("config.toml"), "got {path:?}");
        }
    }

    #[test]
    fn test_platform_config_dir_uses_cursorbridge_directory() {
        #[cfg(target_os = "linux")]
        if let Some(dir) = platform_config_dir() {
            assert!(dir.ends_with("cursorbridge"), "got {dir:?}");
        }
    }
}
