use crate::scene::LayerMask;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from reading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sight: SightConfig,
    #[serde(default)]
    pub observer: ObserverConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunables for one sight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightConfig {
    /// Maximum sight distance in world units
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Sideways offset of the two straddling rays cast beside each obstacle vertex
    #[serde(default = "default_vertex_offset")]
    pub vertex_offset: f32,
    /// Evenly spaced rays around the full circle
    #[serde(default = "default_uniform_rays")]
    pub uniform_rays: usize,
    /// Obstacle layers the sight can see
    #[serde(default)]
    pub layers: LayerMask,
    /// Initial facing, radians clockwise from up
    #[serde(default)]
    pub facing: f32,
    /// Initial spread in radians; 2π sees all around
    #[serde(default = "default_spread")]
    pub spread: f32,
}

#[derive(Debug, Deserialize)]
pub struct ObserverConfig {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

/// Waypoint following and spread oscillation for the demo observer
#[derive(Debug, Deserialize)]
pub struct MotionConfig {
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_lerp_speed")]
    pub lerp_speed: f32,
    #[serde(default = "default_min_spread")]
    pub min_spread: f32,
    #[serde(default = "default_max_spread")]
    pub max_spread: f32,
    #[serde(default = "default_spread_period")]
    pub spread_period: f32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    /// Screen pixels per world unit
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_vertices")]
    pub show_vertices: bool,
    #[serde(default)]
    pub show_waypoints: bool,
}

#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_scene_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also write log lines to this file
    #[serde(default)]
    pub file: Option<String>,
}

// Default values
fn default_radius() -> f32 { 8.0 }
fn default_vertex_offset() -> f32 { 0.01 }
fn default_uniform_rays() -> usize { 16 }
fn default_spread() -> f32 { TAU }
fn default_speed() -> f32 { 1.0 }
fn default_lerp_speed() -> f32 { 1.0 }
fn default_min_spread() -> f32 { 1.0 }
fn default_max_spread() -> f32 { 1.5 * std::f32::consts::PI }
fn default_spread_period() -> f32 { 2.0 }
fn default_window_title() -> String { "Sightcone - Field of View Demo".to_string() }
fn default_pixels_per_unit() -> f32 { 40.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_vertices() -> bool { true }
fn default_scene_path() -> String { "scene.json".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            vertex_offset: default_vertex_offset(),
            uniform_rays: default_uniform_rays(),
            layers: LayerMask::ALL,
            facing: 0.0,
            spread: default_spread(),
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            lerp_speed: default_lerp_speed(),
            min_spread: default_min_spread(),
            max_spread: default_max_spread(),
            spread_period: default_spread_period(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            pixels_per_unit: default_pixels_per_unit(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_vertices: default_show_vertices(),
            show_waypoints: false,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: default_scene_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl SightConfig {
    /// Reject values that would make every ray meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "sight.radius",
                message: format!("must be a positive number, got {}", self.radius),
            });
        }
        if !self.vertex_offset.is_finite() || self.vertex_offset < 0.0 {
            return Err(ConfigError::Invalid {
                field: "sight.vertex_offset",
                message: format!("must be zero or positive, got {}", self.vertex_offset),
            });
        }
        if !self.facing.is_finite() || self.spread.is_nan() {
            return Err(ConfigError::Invalid {
                field: "sight.facing",
                message: "facing and spread must be numbers".to_string(),
            });
        }
        Ok(())
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.sight.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Load configuration from config.toml, or use defaults if it is missing or broken
    pub fn load() -> Self {
        match Self::load_from("config.toml") {
            Ok(config) => {
                info!("Loaded configuration from config.toml");
                config
            }
            Err(ConfigError::Io { .. }) => {
                info!("No config.toml found, using default configuration");
                Config::default()
            }
            Err(e) => {
                warn!("Failed to load config.toml: {}", e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }
}
