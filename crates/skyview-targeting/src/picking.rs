//! Nearest-star hit testing for pointer clicks.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use skyview_catalog::Catalog;
use skyview_ephemeris::Equatorial;
use skyview_view::{ViewState, Viewport, project};

/// Hit radius model. Brighter stars get a larger target, matching their
/// larger glyph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickSettings {
    /// Radius of a star at `faintest_magnitude` or fainter.
    pub base_radius_px: f64,
    /// Extra radius per magnitude brighter than `faintest_magnitude`.
    pub radius_per_magnitude_px: f64,
    pub faintest_magnitude: f64,
    pub max_radius_px: f64,
}

impl Default for PickSettings {
    fn default() -> Self {
        Self {
            base_radius_px: 4.0,
            radius_per_magnitude_px: 2.0,
            faintest_magnitude: 6.0,
            max_radius_px: 24.0,
        }
    }
}

impl PickSettings {
    /// Click radius in pixels for a star of `magnitude`.
    pub fn hit_radius(&self, magnitude: f64) -> f64 {
        let brighter_by = (self.faintest_magnitude - magnitude).max(0.0);
        (self.base_radius_px + brighter_by * self.radius_per_magnitude_px).min(self.max_radius_px)
    }
}

/// A successful hit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    /// Catalog index of the star.
    pub index: usize,
    pub point: DVec2,
    pub distance_px: f64,
}

/// Picks among already projected `(index, point, magnitude)` candidates.
/// The nearest candidate inside its own hit radius wins.
pub fn pick_nearest<I>(candidates: I, click: DVec2, settings: &PickSettings) -> Option<Pick>
where
    I: IntoIterator<Item = (usize, DVec2, f64)>,
{
    let mut best: Option<Pick> = None;
    for (index, point, magnitude) in candidates {
        let distance_px = point.distance(click);
        if distance_px > settings.hit_radius(magnitude) {
            continue;
        }
        if best.is_none_or(|b| distance_px < b.distance_px) {
            best = Some(Pick {
                index,
                point,
                distance_px,
            });
        }
    }
    best
}

/// Projects every catalog star under `view` and picks the one under `click`.
pub fn pick_star(
    catalog: &Catalog,
    view: &ViewState,
    viewport: &Viewport,
    click: DVec2,
    settings: &PickSettings,
) -> Option<Pick> {
    let candidates = catalog.stars().iter().enumerate().filter_map(|(index, star)| {
        let eq = Equatorial::new(star.ra_hours, star.dec_deg);
        project(eq.longitude_deg(), eq.latitude_deg(), view, viewport)
            .map(|point| (index, point, star.magnitude))
    });
    pick_nearest(candidates, click, settings)
}
