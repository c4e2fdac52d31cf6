//! Configuration sections with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skyview_catalog::Lang;
use skyview_view::ProjectionMode;

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub observer: ObserverConfig,
    pub view: ViewConfig,
    pub picking: PickingConfig,
    pub targeting: TargetingConfig,
    pub display: DisplayConfig,
    pub debug: DebugConfig,
}

/// Where the observer stands when no geolocation is supplied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObserverConfig {
    /// Degrees, north positive.
    pub latitude_deg: f64,
    /// Degrees, east positive.
    pub longitude_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub projection: ProjectionMode,
    pub initial_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Degrees of rotation per dragged pixel at scale 1.
    pub drag_degrees_per_pixel: f64,
    /// Zoom factor per wheel line.
    pub wheel_zoom_step: f64,
    /// Start with device orientation driving the view.
    pub sensor_mode: bool,
}

/// Click hit radius: `base + (faintest - magnitude) * per_magnitude`, capped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickingConfig {
    pub base_radius_px: f64,
    pub radius_per_magnitude_px: f64,
    pub faintest_magnitude: f64,
    pub max_radius_px: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TargetingConfig {
    /// Distance from the viewport center that counts as on target.
    pub lock_radius_px: f64,
    /// Dwell before a lock change is confirmed, in milliseconds.
    pub dwell_ms: u64,
    /// Inset of the off-screen arrow from the viewport edge.
    pub edge_margin_px: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Which star names to show. Does not affect geometry.
    pub lang: Lang,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            latitude_deg: 35.0,
            longitude_deg: 139.0,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Stereographic,
            initial_scale: 1.0,
            min_scale: 0.5,
            max_scale: 10.0,
            drag_degrees_per_pixel: 0.25,
            wheel_zoom_step: 1.1,
            sensor_mode: false,
        }
    }
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            base_radius_px: 4.0,
            radius_per_magnitude_px: 2.0,
            faintest_magnitude: 6.0,
            max_radius_px: 24.0,
        }
    }
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            lock_radius_px: 40.0,
            dwell_ms: 1000,
            edge_margin_px: 24.0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            lang: Lang::Primary,
            width: 1280,
            height: 720,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Per-user config directory, e.g. `~/.config/skyview` on Linux.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("skyview"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::InvalidValue { field, reason });

        if !(-90.0..=90.0).contains(&self.observer.latitude_deg) {
            return invalid("observer.latitude_deg", "must be within [-90, 90]");
        }
        if !self.observer.longitude_deg.is_finite() {
            return invalid("observer.longitude_deg", "must be finite");
        }
        let v = &self.view;
        if !(v.min_scale > 0.0 && v.min_scale <= v.max_scale && v.max_scale.is_finite()) {
            return invalid("view.min_scale", "must be positive and not above a finite max_scale");
        }
        if !(v.min_scale..=v.max_scale).contains(&v.initial_scale) {
            return invalid("view.initial_scale", "must be within [min_scale, max_scale]");
        }
        if !v.drag_degrees_per_pixel.is_finite() {
            return invalid("view.drag_degrees_per_pixel", "must be finite");
        }
        if !(v.wheel_zoom_step > 0.0 && v.wheel_zoom_step.is_finite()) {
            return invalid("view.wheel_zoom_step", "must be positive and finite");
        }
        let p = &self.picking;
        for (field, value) in [
            ("picking.base_radius_px", p.base_radius_px),
            ("picking.radius_per_magnitude_px", p.radius_per_magnitude_px),
            ("picking.faintest_magnitude", p.faintest_magnitude),
            ("picking.max_radius_px", p.max_radius_px),
            ("targeting.edge_margin_px", self.targeting.edge_margin_px),
        ] {
            if !value.is_finite() {
                return invalid(field, "must be finite");
            }
        }
        if self.display.width == 0 || self.display.height == 0 {
            return invalid("display", "width and height must be non-zero");
        }
        if !(self.targeting.lock_radius_px > 0.0) {
            return invalid("targeting.lock_radius_px", "must be positive");
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(2))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("projection: Stereographic"));
        assert!(ron_str.contains("dwell_ms: 1000"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(observer: (latitude_deg: -33.9))").unwrap();
        assert_eq!(config.observer.latitude_deg, -33.9);
        assert_eq!(config.observer.longitude_deg, 139.0);
        assert_eq!(config.targeting, TargetingConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(planner_api_key: \"x\")");
        assert!(result.is_ok());
    }

    #[test]
    fn test_enum_fields_parse() {
        let config: Config =
            ron::from_str("(view: (projection: Orthographic), display: (lang: Localized))").unwrap();
        assert_eq!(config.view.projection, ProjectionMode::Orthographic);
        assert_eq!(config.display.lang, Lang::Localized);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.observer.latitude_deg = 51.48;
        config.observer.longitude_deg = 0.0;
        config.view.projection = ProjectionMode::Orthographic;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("skyview");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.targeting.dwell_ms = 500;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().targeting.dwell_ms, 500);
        assert!(modified.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.observer.latitude_deg = 95.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "observer.latitude_deg", .. })
        ));

        let mut config = Config::default();
        config.view.min_scale = 20.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut config = Config::default();
        config.view.drag_degrees_per_pixel = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "view.drag_degrees_per_pixel", .. })
        ));

        let mut config = Config::default();
        config.targeting.edge_margin_px = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "targeting.edge_margin_px", .. })
        ));

        let mut config = Config::default();
        config.picking.max_radius_px = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "picking.max_radius_px", .. })
        ));

        let mut config = Config::default();
        config.view.max_scale = f64::INFINITY;
        assert!(config.validate().is_err());
    }
}
