//! Configuration loading and validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::layout::LayoutPresets;
use crate::orbit::OrbitSettings;
use crate::skill::{CatalogError, Rgb, SkillCatalog, SkillEntry};

/// Configuration compiled into every build
pub const EMBEDDED_CONFIG: &str = include_str!("../data/galaxy.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid skill catalog: {0}")]
    CatalogError(#[from] CatalogError),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn check(ok: bool, field: &'static str, value: impl std::fmt::Debug, expected: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{:?} is not {}", value, expected),
        })
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check(value.is_finite() && value > 0.0, field, value, "a positive number")
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check(value.is_finite() && value >= 0.0, field, value, "a non-negative number")
}

fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check((0.0..=1.0).contains(&value), field, value, "within 0..=1")
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalaxyConfig {
    #[serde(default)]
    pub layout: LayoutPresets,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub controls: OrbitSettings,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_background")]
    pub background: Rgb,
    #[serde(default = "default_ambient_color")]
    pub ambient_color: Rgb,
    #[serde(default = "default_ambient_intensity")]
    pub ambient_intensity: f32,
    #[serde(default = "default_light_position")]
    pub light_position: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub light_intensity: f32,
    /// Number of background stars
    #[serde(default = "default_star_count")]
    pub star_count: usize,
    /// Edge length of the cube the stars are scattered in
    #[serde(default = "default_star_spread")]
    pub star_spread: f32,
    #[serde(default = "default_star_opacity")]
    pub star_opacity: f32,
    /// Seed for the starfield RNG, so every load draws the same sky
    #[serde(default = "default_star_seed")]
    pub star_seed: u64,
    /// Planet emissive color is the base color times this factor
    #[serde(default = "default_emissive_factor")]
    pub emissive_factor: f32,
    #[serde(default)]
    pub rings: RingPolicy,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            ambient_color: default_ambient_color(),
            ambient_intensity: default_ambient_intensity(),
            light_position: default_light_position(),
            light_intensity: default_light_intensity(),
            star_count: default_star_count(),
            star_spread: default_star_spread(),
            star_opacity: default_star_opacity(),
            star_seed: default_star_seed(),
            emissive_factor: default_emissive_factor(),
            rings: RingPolicy::default(),
        }
    }
}

fn default_background() -> Rgb {
    Rgb::new(0x00, 0x08, 0x14)
}

fn default_ambient_color() -> Rgb {
    Rgb::new(0x40, 0x40, 0x40)
}

fn default_ambient_intensity() -> f32 {
    0.5
}

fn default_light_position() -> [f32; 3] {
    [5.0, 5.0, 5.0]
}

fn default_light_intensity() -> f32 {
    1.0
}

fn default_star_count() -> usize {
    1500
}

fn default_star_spread() -> f32 {
    2000.0
}

fn default_star_opacity() -> f32 {
    0.8
}

fn default_star_seed() -> u64 {
    42
}

fn default_emissive_factor() -> f32 {
    0.2
}

/// Which planets carry an accent ring while idle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RingPolicy {
    /// Every planet
    All,
    /// Only planets whose skill name is listed
    Named { names: Vec<String> },
    /// Rings only appear on hover or selection
    Off,
}

impl Default for RingPolicy {
    fn default() -> Self {
        Self::Named {
            names: vec!["Angular".to_string(), "React".to_string(), "GitHub".to_string()],
        }
    }
}

impl RingPolicy {
    pub fn is_eligible(&self, skill_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named { names } => names.iter().any(|n| n == skill_name),
            Self::Off => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// How long the first-use hint stays up without a selection
    #[serde(default = "default_hint_delay")]
    pub hint_delay_ms: u64,
    /// Quiet period before a burst of resize events is applied
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hint_delay_ms: default_hint_delay(),
            resize_debounce_ms: default_resize_debounce(),
        }
    }
}

impl InteractionConfig {
    pub fn hint_delay(&self) -> Duration {
        Duration::from_millis(self.hint_delay_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

fn default_hint_delay() -> u64 {
    5000
}

fn default_resize_debounce() -> u64 {
    100
}

impl GalaxyConfig {
    /// Parse the compiled-in configuration
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build and validate the skill catalog described by this configuration
    pub fn catalog(&self) -> Result<SkillCatalog, CatalogError> {
        SkillCatalog::from_entries(&self.skills)
    }

    /// Reject values the layout, camera or starfield cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        check_positive("layout.breakpoint_px", layout.breakpoint_px)?;
        for (radius, fov, distance, preset) in [
            ("layout.mobile.radius", "layout.mobile.fov_degrees", "layout.mobile.camera_distance", &layout.mobile),
            ("layout.desktop.radius", "layout.desktop.fov_degrees", "layout.desktop.camera_distance", &layout.desktop),
        ] {
            check_positive(radius, preset.radius)?;
            check(
                preset.fov_degrees > 0.0 && preset.fov_degrees < 180.0,
                fov,
                preset.fov_degrees,
                "between 0 and 180 degrees",
            )?;
            check_positive(distance, preset.camera_distance)?;
        }

        let controls = &self.controls;
        check_unit("controls.damping_factor", controls.damping_factor)?;
        check_non_negative("controls.rotate_speed", controls.rotate_speed)?;
        check_non_negative("controls.zoom_speed", controls.zoom_speed)?;
        check_non_negative("controls.auto_rotate_speed", controls.auto_rotate_speed)?;
        check_positive("controls.min_distance", controls.min_distance)?;
        check_positive("controls.max_distance", controls.max_distance)?;
        check(
            controls.min_distance <= controls.max_distance,
            "controls.max_distance",
            controls.max_distance,
            "at least controls.min_distance",
        )?;

        let scene = &self.scene;
        check_non_negative("scene.ambient_intensity", scene.ambient_intensity)?;
        check_non_negative("scene.light_intensity", scene.light_intensity)?;
        check(
            scene.light_position.iter().all(|v| v.is_finite()),
            "scene.light_position",
            scene.light_position,
            "finite",
        )?;
        check_non_negative("scene.star_spread", scene.star_spread)?;
        check_unit("scene.star_opacity", scene.star_opacity)?;
        check_non_negative("scene.emissive_factor", scene.emissive_factor)?;

        self.catalog()?;
        Ok(())
    }
}

/// Load configuration from file, falling back to the embedded defaults
///
/// A file without `[[skills]]` keeps the embedded skill list.
pub fn load_config(path: &Path) -> Result<GalaxyConfig, ConfigError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let mut config = GalaxyConfig::from_toml_str(&content)?;
        if config.skills.is_empty() {
            config.skills = GalaxyConfig::embedded()?.skills;
            info!(path = %path.display(), "Configuration has no skills, using embedded catalog");
        }
        config.validate()?;
        info!(path = %path.display(), skills = config.skills.len(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using embedded defaults"
        );
        GalaxyConfig::embedded()
    }
}
