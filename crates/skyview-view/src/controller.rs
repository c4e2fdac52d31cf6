//! Single owner of the [`ViewState`]: every input event is reduced into it here.
//!
//! Rotation is driven by exactly one source at a time:
//!
//! - [`RotationSource::Observer`]: re-centered on the observer's zenith
//!   whenever the observation time or location changes.
//! - [`RotationSource::Sensor`]: follows raw device-orientation angles.
//! - [`RotationSource::Dragging`]: follows the pointer between pointer-down
//!   and pointer-up, then returns to the configured source.
//!
//! Zoom is independent of the rotation source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyview_ephemeris::{ObserverLocation, local_sidereal_time};
use tracing::debug;

use crate::projection::ProjectionMode;
use crate::view_state::{Rotation, ViewState};

/// Tunables for the reducer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Rotation per dragged pixel at `scale = 1`.
    pub drag_degrees_per_pixel: f64,
    /// Zoom factor per wheel line.
    pub wheel_zoom_step: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 10.0,
            drag_degrees_per_pixel: 0.25,
            wheel_zoom_step: 1.1,
        }
    }
}

/// Which input currently drives the rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationSource {
    Observer,
    Sensor,
    Dragging,
}

/// Emitted when an input moved the rotation to a different source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceChange {
    pub from: RotationSource,
    pub to: RotationSource,
}

/// One event for the view reducer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewInput {
    /// Primary pointer pressed; starts a drag unless sensor mode is on.
    PointerDown,
    /// Pointer moved by `(dx, dy)` pixels while pressed.
    PointerDrag { dx: f64, dy: f64 },
    /// Primary pointer released.
    PointerUp,
    /// Multiplicative zoom, e.g. a pinch distance ratio.
    Zoom { factor: f64 },
    /// Wheel movement in lines; positive zooms in.
    Wheel { lines: f64 },
    /// Absolute zoom level.
    SetScale(f64),
    /// Raw device-orientation angles in degrees.
    Orientation { alpha: f64, beta: f64, gamma: f64 },
    /// Switch between sensor-driven and observer-driven rotation.
    SetSensorMode(bool),
    /// New observation time or location.
    Observe {
        time: DateTime<Utc>,
        location: ObserverLocation,
    },
    SetProjection(ProjectionMode),
    SetRotation(Rotation),
}

/// Owns the view state and applies [`ViewInput`]s to it.
#[derive(Clone, Debug)]
pub struct ViewController {
    state: ViewState,
    settings: ViewSettings,
    sensor_mode: bool,
    dragging: bool,
}

impl ViewSettings {
    /// Same settings with usable zoom bounds: swapped bounds are reordered
    /// and non-finite or non-positive bounds fall back to the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let usable = |v: f64| v.is_finite() && v > 0.0;
        let (min, max) = match (usable(self.min_scale), usable(self.max_scale)) {
            (true, true) => (
                self.min_scale.min(self.max_scale),
                self.min_scale.max(self.max_scale),
            ),
            (true, false) => (self.min_scale, defaults.max_scale.max(self.min_scale)),
            (false, true) => (defaults.min_scale.min(self.max_scale), self.max_scale),
            (false, false) => (defaults.min_scale, defaults.max_scale),
        };
        Self {
            min_scale: min,
            max_scale: max,
            drag_degrees_per_pixel: if self.drag_degrees_per_pixel.is_finite() {
                self.drag_degrees_per_pixel
            } else {
                defaults.drag_degrees_per_pixel
            },
            wheel_zoom_step: if usable(self.wheel_zoom_step) {
                self.wheel_zoom_step
            } else {
                defaults.wheel_zoom_step
            },
        }
    }
}

impl ViewController {
    pub fn new(state: ViewState, settings: ViewSettings) -> Self {
        let mut controller = Self {
            state,
            settings: settings.sanitized(),
            sensor_mode: false,
            dragging: false,
        };
        controller.set_scale(state.scale);
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn is_sensor_mode(&self) -> bool {
        self.sensor_mode
    }

    /// The source currently driving rotation.
    pub fn source(&self) -> RotationSource {
        if self.dragging {
            RotationSource::Dragging
        } else if self.sensor_mode {
            RotationSource::Sensor
        } else {
            RotationSource::Observer
        }
    }

    /// Applies one input. Returns the source transition it caused, if any.
    pub fn apply(&mut self, input: ViewInput) -> Option<SourceChange> {
        let from = self.source();
        match input {
            ViewInput::PointerDown => {
                if !self.sensor_mode {
                    self.dragging = true;
                }
            }
            ViewInput::PointerDrag { dx, dy } => {
                if self.dragging {
                    self.drag(dx, dy);
                }
            }
            ViewInput::PointerUp => self.dragging = false,
            ViewInput::Zoom { factor } => self.zoom_by(factor),
            ViewInput::Wheel { lines } => self.zoom_by(self.settings.wheel_zoom_step.powf(lines)),
            ViewInput::SetScale(scale) => self.set_scale(scale),
            ViewInput::Orientation { alpha, beta, gamma } => {
                self.sync_to_sensor(alpha, beta, gamma);
            }
            ViewInput::SetSensorMode(on) => {
                self.sensor_mode = on;
                if on {
                    self.dragging = false;
                }
            }
            ViewInput::Observe { time, location } => {
                self.sync_to_observer(time, location);
            }
            ViewInput::SetProjection(mode) => self.state.projection = mode,
            ViewInput::SetRotation(rotation) => self.set_rotation(rotation),
        }

        let to = self.source();
        if from == to {
            return None;
        }
        debug!(?from, ?to, "rotation source changed");
        Some(SourceChange { from, to })
    }

    /// Replaces the rotation outright.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.state.rotation = rotation.wrapped();
    }

    /// Rotates by angular deltas in degrees, divided by the current scale so
    /// that drag speed feels constant on screen at any zoom.
    pub fn rotate_by(&mut self, d_lambda: f64, d_phi: f64) {
        let scale = self.state.scale;
        let r = self.state.rotation;
        self.set_rotation(Rotation::new(
            r.lambda + d_lambda / scale,
            r.phi + d_phi / scale,
            r.gamma,
        ));
    }

    /// Converts a pixel drag into a rotation. Dragging down lowers the sky.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        let k = self.settings.drag_degrees_per_pixel;
        self.rotate_by(dx * k, -dy * k);
    }

    /// Sets the zoom, clamped to `[min_scale, max_scale]`.
    pub fn set_scale(&mut self, scale: f64) {
        let scale = if scale.is_finite() { scale } else { 1.0 };
        self.state.scale = scale.clamp(self.settings.min_scale, self.settings.max_scale);
    }

    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.set_scale(self.state.scale * factor);
        }
    }

    /// Centers the meridian overhead at `time` for `location`, looking at the
    /// zenith. Ignored unless the observer source is active.
    pub fn sync_to_observer(&mut self, time: DateTime<Utc>, location: ObserverLocation) -> bool {
        if self.source() != RotationSource::Observer {
            return false;
        }
        let lst = local_sidereal_time(time, location.longitude_deg);
        self.set_rotation(Rotation::new(-lst, -location.latitude_deg, 0.0));
        true
    }

    /// Maps device-orientation angles onto the rotation with the fixed
    /// transform `(-alpha, -(beta - 90), -gamma)`. The 90 degree offset turns
    /// the sensor's flat-on-table zero into screen-facing-the-sky. Ignored
    /// unless sensor mode is on.
    pub fn sync_to_sensor(&mut self, alpha: f64, beta: f64, gamma: f64) -> bool {
        if !self.sensor_mode {
            return false;
        }
        self.set_rotation(Rotation::new(-alpha, -(beta - 90.0), -gamma));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn controller() -> ViewController {
        ViewController::new(ViewState::default(), ViewSettings::default())
    }

    fn j2000() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()
    }

    fn drag_lambda(scale: f64) -> f64 {
        let mut c = controller();
        c.set_scale(scale);
        c.apply(ViewInput::PointerDown);
        c.apply(ViewInput::PointerDrag { dx: 40.0, dy: 0.0 });
        c.apply(ViewInput::PointerUp);
        c.state().rotation.lambda
    }

    #[test]
    fn test_drag_sensitivity_is_inverse_to_scale() {
        let at_one = drag_lambda(1.0);
        let at_two = drag_lambda(2.0);
        assert!((at_one - 10.0).abs() < 1e-12);
        assert!((at_two - at_one / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_drag_without_pointer_down_is_ignored() {
        let mut c = controller();
        c.apply(ViewInput::PointerDrag { dx: 40.0, dy: 40.0 });
        assert_eq!(c.state().rotation, Rotation::default());
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut c = controller();
        c.apply(ViewInput::SetScale(100.0));
        assert_eq!(c.state().scale, 10.0);
        c.apply(ViewInput::Zoom { factor: 0.001 });
        assert_eq!(c.state().scale, 0.5);
        c.apply(ViewInput::Zoom { factor: -2.0 });
        assert_eq!(c.state().scale, 0.5);
        c.apply(ViewInput::SetScale(f64::NAN));
        assert_eq!(c.state().scale, 1.0);
    }

    #[test]
    fn test_swapped_or_broken_bounds_do_not_panic() {
        let swapped = ViewSettings {
            min_scale: 10.0,
            max_scale: 0.5,
            ..ViewSettings::default()
        };
        let mut c = ViewController::new(ViewState::default(), swapped);
        assert_eq!(c.settings().min_scale, 0.5);
        assert_eq!(c.settings().max_scale, 10.0);
        c.apply(ViewInput::SetScale(50.0));
        assert_eq!(c.state().scale, 10.0);

        let broken = ViewSettings {
            min_scale: f64::NAN,
            max_scale: -1.0,
            drag_degrees_per_pixel: f64::INFINITY,
            wheel_zoom_step: 0.0,
        };
        let c = ViewController::new(ViewState::default(), broken);
        assert_eq!(*c.settings(), ViewSettings::default());
        assert_eq!(c.state().scale, 1.0);
    }

    #[test]
    fn test_wheel_zooms_by_step() {
        let mut c = controller();
        c.apply(ViewInput::Wheel { lines: 2.0 });
        assert!((c.state().scale - 1.21).abs() < 1e-12);
        c.apply(ViewInput::Wheel { lines: -2.0 });
        assert!((c.state().scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_observer_sync_centers_zenith() {
        let mut c = controller();
        let location = ObserverLocation::new(51.5, 0.0);
        assert!(c.sync_to_observer(j2000(), location));
        let r = c.state().rotation;
        assert!((r.lambda - (360.0 - 280.460_618_37)).abs() < 1e-6, "{r:?}");
        assert!((r.phi + 51.5).abs() < 1e-12);
        assert_eq!(r.gamma, 0.0);
    }

    #[test]
    fn test_sensor_mapping() {
        let mut c = controller();
        assert!(!c.sync_to_sensor(10.0, 20.0, 30.0));
        c.apply(ViewInput::SetSensorMode(true));
        c.apply(ViewInput::Orientation {
            alpha: 10.0,
            beta: 20.0,
            gamma: 30.0,
        });
        assert_eq!(c.state().rotation, Rotation::new(-10.0, 70.0, -30.0));
    }

    #[test]
    fn test_observer_sync_ignored_in_sensor_mode() {
        let mut c = controller();
        c.apply(ViewInput::SetSensorMode(true));
        let change = c.apply(ViewInput::Observe {
            time: j2000(),
            location: ObserverLocation::new(10.0, 10.0),
        });
        assert!(change.is_none());
        assert_eq!(c.state().rotation, Rotation::default());
    }

    #[test]
    fn test_drag_disabled_in_sensor_mode() {
        let mut c = controller();
        c.apply(ViewInput::SetSensorMode(true));
        assert!(c.apply(ViewInput::PointerDown).is_none());
        c.apply(ViewInput::PointerDrag { dx: 50.0, dy: 0.0 });
        assert_eq!(c.source(), RotationSource::Sensor);
        assert_eq!(c.state().rotation, Rotation::default());
    }

    #[test]
    fn test_drag_returns_to_configured_source() {
        let mut c = controller();
        let down = c.apply(ViewInput::PointerDown).unwrap();
        assert_eq!(down.from, RotationSource::Observer);
        assert_eq!(down.to, RotationSource::Dragging);

        // Observer re-centering does not fight an active drag.
        assert!(!c.sync_to_observer(j2000(), ObserverLocation::default()));

        let up = c.apply(ViewInput::PointerUp).unwrap();
        assert_eq!(up.to, RotationSource::Observer);
    }

    #[test]
    fn test_enabling_sensor_cancels_drag() {
        let mut c = controller();
        c.apply(ViewInput::PointerDown);
        let change = c.apply(ViewInput::SetSensorMode(true)).unwrap();
        assert_eq!(change.from, RotationSource::Dragging);
        assert_eq!(change.to, RotationSource::Sensor);
        assert!(c.apply(ViewInput::PointerUp).is_none());
    }

    #[test]
    fn test_zoom_independent_of_source() {
        let mut c = controller();
        c.apply(ViewInput::SetSensorMode(true));
        c.apply(ViewInput::Zoom { factor: 2.0 });
        assert_eq!(c.state().scale, 2.0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut c = controller();
        c.rotate_by(350.0, 0.0);
        c.rotate_by(20.0, 0.0);
        assert!((c.state().rotation.lambda - 10.0).abs() < 1e-9);
    }
}
