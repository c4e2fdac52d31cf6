use std::time::Duration;

use skyview_catalog::Lang;
use skyview_config::Config;
use skyview_targeting::{PickSettings, TargetingSettings};
use skyview_view::{ProjectionMode, ViewSettings, ViewState, Viewport};

/// Everything the engine reads from configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    pub view: ViewSettings,
    pub picking: PickSettings,
    pub targeting: TargetingSettings,
    pub projection: ProjectionMode,
    pub initial_scale: f64,
    pub sensor_mode: bool,
    pub lang: Lang,
    pub viewport: Viewport,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl EngineSettings {
    pub(crate) fn initial_view(&self) -> ViewState {
        ViewState {
            scale: self.initial_scale,
            projection: self.projection,
            ..ViewState::default()
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        let v = &config.view;
        let p = &config.picking;
        let t = &config.targeting;
        Self {
            view: ViewSettings {
                min_scale: v.min_scale,
                max_scale: v.max_scale,
                drag_degrees_per_pixel: v.drag_degrees_per_pixel,
                wheel_zoom_step: v.wheel_zoom_step,
            },
            picking: PickSettings {
                base_radius_px: p.base_radius_px,
                radius_per_magnitude_px: p.radius_per_magnitude_px,
                faintest_magnitude: p.faintest_magnitude,
                max_radius_px: p.max_radius_px,
            },
            targeting: TargetingSettings {
                lock_radius_px: t.lock_radius_px,
                dwell: Duration::from_millis(t.dwell_ms),
                edge_margin_px: t.edge_margin_px,
            },
            projection: v.projection,
            initial_scale: v.initial_scale,
            sensor_mode: v.sensor_mode,
            lang: config.display.lang,
            viewport: Viewport::new(
                f64::from(config.display.width),
                f64::from(config.display.height),
            ),
        }
    }
}
