//! Where a resolved target lands relative to the viewport.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use skyview_ephemeris::Equatorial;
use skyview_view::{ViewState, Viewport, project};

/// Arrow drawn at the viewport edge for a projected but off-screen target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeIndicator {
    /// Arrow anchor, inset from the viewport edge.
    pub position: DVec2,
    /// Screen bearing from the viewport center, clockwise from up, `[0, 360)`.
    pub bearing_deg: f64,
    /// Distance in pixels from the viewport center to the target.
    pub distance_px: f64,
}

/// Exactly one of three outcomes per target and frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visibility {
    OnScreen { point: DVec2 },
    /// Projected, but outside the viewport bounds.
    OffScreen { point: DVec2, indicator: EdgeIndicator },
    /// Beyond the projection's clip angle. No bearing is attempted across
    /// the hidden hemisphere.
    Occluded,
}

impl Visibility {
    pub fn is_on_screen(&self) -> bool {
        matches!(self, Visibility::OnScreen { .. })
    }

    /// Projected point, if any.
    pub fn point(&self) -> Option<DVec2> {
        match self {
            Visibility::OnScreen { point } | Visibility::OffScreen { point, .. } => Some(*point),
            Visibility::Occluded => None,
        }
    }
}

/// Bearing of `offset` on screen (y down), clockwise from up, in `[0, 360)`.
pub fn screen_bearing_deg(offset: DVec2) -> f64 {
    let deg = offset.x.atan2(-offset.y).to_degrees();
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Classifies `target` under the current view.
pub fn classify(target: &Equatorial, view: &ViewState, viewport: &Viewport, edge_margin_px: f64) -> Visibility {
    let Some(point) = project(target.longitude_deg(), target.latitude_deg(), view, viewport) else {
        return Visibility::Occluded;
    };
    if viewport.contains(point) {
        return Visibility::OnScreen { point };
    }

    let center = viewport.center();
    let offset = point - center;
    let half_w = (viewport.width / 2.0 - edge_margin_px).max(0.0);
    let half_h = (viewport.height / 2.0 - edge_margin_px).max(0.0);
    let tx = if offset.x != 0.0 { half_w / offset.x.abs() } else { f64::INFINITY };
    let ty = if offset.y != 0.0 { half_h / offset.y.abs() } else { f64::INFINITY };
    let t = tx.min(ty).min(1.0);

    Visibility::OffScreen {
        point,
        indicator: EdgeIndicator {
            position: center + offset * t,
            bearing_deg: screen_bearing_deg(offset),
            distance_px: offset.length(),
        },
    }
}
