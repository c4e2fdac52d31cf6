//! The viewer's orientation, zoom, and projection style.

use serde::{Deserialize, Serialize};

use crate::projection::ProjectionMode;

/// Wraps an angle into `[-180, 180)` degrees.
pub fn wrap_degrees(deg: f64) -> f64 {
    let r = (deg + 180.0).rem_euclid(360.0);
    if r >= 360.0 { -180.0 } else { r - 180.0 }
}

/// Three-axis rotation applied to the celestial sphere before projecting,
/// in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Longitude rotation about the polar axis.
    pub lambda: f64,
    /// Latitude rotation; `-90` looks at the north pole.
    pub phi: f64,
    /// Roll about the viewing axis.
    pub gamma: f64,
}

impl Rotation {
    pub fn new(lambda: f64, phi: f64, gamma: f64) -> Self {
        Self { lambda, phi, gamma }
    }

    /// Same rotation with every angle wrapped into `[-180, 180)`.
    pub fn wrapped(self) -> Self {
        Self {
            lambda: wrap_degrees(self.lambda),
            phi: wrap_degrees(self.phi),
            gamma: wrap_degrees(self.gamma),
        }
    }
}

/// Everything the projection needs to place a point on screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub rotation: Rotation,
    /// Zoom factor; `1.0` fits the horizon of the projection to the viewport.
    pub scale: f64,
    pub projection: ProjectionMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation: Rotation::default(),
            scale: 1.0,
            projection: ProjectionMode::default(),
        }
    }
}

impl ViewState {
    pub fn new(rotation: Rotation, scale: f64, projection: ProjectionMode) -> Self {
        Self {
            rotation,
            scale,
            projection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees_range() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(180.0), -180.0);
        assert_eq!(wrap_degrees(-180.0), -180.0);
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(720.0 + 45.0), 45.0);
    }

    #[test]
    fn test_rotation_wrapped() {
        let r = Rotation::new(370.0, -270.0, 90.0).wrapped();
        assert_eq!(r, Rotation::new(10.0, 90.0, 90.0));
    }
}
