//! Azimuthal sky projections with clip-angle culling.
//!
//! A celestial point `(lon, lat)` is first rotated so that the view center
//! sits at `(0, 0)`, then mapped by a stereographic or orthographic azimuthal
//! projection. Points farther than the projection's clip angle from the center
//! are not visible and produce `None`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::view_state::{Rotation, ViewState};

/// Slack on the clip test so points exactly on the boundary still project.
const CLIP_EPSILON: f64 = 1e-9;

/// The two map families the sky can be drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Conformal "wide sky" view, clipped at 120 degrees from center.
    #[default]
    Stereographic,
    /// "3D globe" view, clipped at the 90 degree horizon.
    Orthographic,
}

impl ProjectionMode {
    /// Maximum angular distance from the view center that is drawn.
    pub fn clip_angle_deg(&self) -> f64 {
        match self {
            ProjectionMode::Stereographic => 120.0,
            ProjectionMode::Orthographic => 90.0,
        }
    }

    /// Unit-sphere azimuthal mapping of a rotated point, before scaling.
    fn raw(&self, lambda: f64, phi: f64) -> DVec2 {
        let (sin_l, cos_l) = lambda.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        let k = match self {
            ProjectionMode::Stereographic => 1.0 / (1.0 + cos_p * cos_l),
            ProjectionMode::Orthographic => 1.0,
        };
        DVec2::new(k * cos_p * sin_l, k * sin_p)
    }
}

/// Screen area in pixels. The origin is the top-left corner, y grows down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Pixels per unit of projected distance at `scale = 1`.
    pub fn base_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Whether `p` lies inside the viewport (edges included).
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Rotates `(lon, lat)` degrees by `rotation`, returning radians.
///
/// Longitude rotation is applied first, then the latitude and roll
/// rotations about the resulting x and view axes.
pub fn rotate(lon_deg: f64, lat_deg: f64, rotation: &Rotation) -> (f64, f64) {
    let lambda = (lon_deg + rotation.lambda).to_radians();
    let phi = lat_deg.to_radians();
    let (sin_dp, cos_dp) = rotation.phi.to_radians().sin_cos();
    let (sin_dg, cos_dg) = rotation.gamma.to_radians().sin_cos();

    let cos_phi = phi.cos();
    let x = lambda.cos() * cos_phi;
    let y = lambda.sin() * cos_phi;
    let z = phi.sin();
    let k = z * cos_dp + x * sin_dp;

    let out_lambda = (y * cos_dg - k * sin_dg).atan2(x * cos_dp - z * sin_dp);
    let out_phi = (k * cos_dg + y * sin_dg).clamp(-1.0, 1.0).asin();
    (out_lambda, out_phi)
}

/// Great-circle distance in degrees between the view center and `(lon, lat)`.
pub fn angular_distance_from_center(lon_deg: f64, lat_deg: f64, rotation: &Rotation) -> f64 {
    let (lambda, phi) = rotate(lon_deg, lat_deg, rotation);
    (phi.cos() * lambda.cos()).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Maps a celestial point to screen pixels, or `None` beyond the clip angle.
pub fn project(lon_deg: f64, lat_deg: f64, view: &ViewState, viewport: &Viewport) -> Option<DVec2> {
    let (lambda, phi) = rotate(lon_deg, lat_deg, &view.rotation);
    let cos_c = phi.cos() * lambda.cos();
    let cos_clip = view.projection.clip_angle_deg().to_radians().cos();
    // Written as a negated `>=` so a NaN rotation is never visible.
    if !(cos_c >= cos_clip - CLIP_EPSILON) {
        return None;
    }

    let raw = view.projection.raw(lambda, phi);
    let k = viewport.base_radius() * view.scale;
    let center = viewport.center();
    Some(DVec2::new(center.x + k * raw.x, center.y - k * raw.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [ProjectionMode; 2] = [ProjectionMode::Stereographic, ProjectionMode::Orthographic];

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn view(rotation: Rotation, projection: ProjectionMode) -> ViewState {
        ViewState::new(rotation, 1.0, projection)
    }

    fn assert_close(a: DVec2, b: DVec2) {
        assert!((a - b).length() < 1e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn test_rotation_center_projects_to_viewport_center() {
        let rotations = [
            Rotation::new(0.0, 0.0, 0.0),
            Rotation::new(-100.0, -35.0, 0.0),
            Rotation::new(42.0, 60.0, 15.0),
        ];
        for mode in MODES {
            for rot in rotations {
                // The center is the point that rotates onto (0, 0).
                let lon = -rot.lambda;
                let lat = -rot.phi;
                let p = project(lon, lat, &view(rot, mode), &viewport()).unwrap();
                assert_close(p, viewport().center());
            }
        }
    }

    #[test]
    fn test_north_pole_view_orthographic() {
        let v = view(Rotation::new(0.0, -90.0, 0.0), ProjectionMode::Orthographic);
        for lon in [0.0, 75.0, 180.0, 333.0] {
            let north = project(lon, 90.0, &v, &viewport()).unwrap();
            assert_close(north, viewport().center());
            assert!(project(lon, -90.0, &v, &viewport()).is_none());
        }
    }

    #[test]
    fn test_clip_boundary_transition() {
        for mode in MODES {
            let clip = mode.clip_angle_deg();
            let v = view(Rotation::default(), mode);
            for offset in [0.0, 1e-6, 0.01, 1.0] {
                let inside = clip - offset;
                assert!(project(inside, 0.0, &v, &viewport()).is_some(), "{mode:?} {inside}");
            }
            for offset in [0.001, 0.01, 1.0] {
                let outside = clip + offset;
                assert!(project(outside, 0.0, &v, &viewport()).is_none(), "{mode:?} {outside}");
            }
        }
    }

    #[test]
    fn test_non_finite_rotation_projects_nothing() {
        let view = view(Rotation::new(f64::NAN, 0.0, 0.0), ProjectionMode::Stereographic);
        assert_eq!(project(0.0, 0.0, &view, &viewport()), None);
        assert_eq!(project(10.0, -20.0, &view, &viewport()), None);
    }

    #[test]
    fn test_project_is_pure() {
        let v = ViewState::new(Rotation::new(12.0, -30.0, 4.0), 2.5, ProjectionMode::Stereographic);
        let a = project(101.0, 22.0, &v, &viewport());
        let b = project(101.0, 22.0, &v, &viewport());
        assert_eq!(a, b);
    }

    #[test]
    fn test_horizon_radius_at_unit_scale() {
        let vp = viewport();
        for mode in MODES {
            let p = project(90.0, 0.0, &view(Rotation::default(), mode), &vp).unwrap();
            assert_close(p, DVec2::new(vp.center().x + vp.base_radius(), vp.center().y));
        }
    }

    #[test]
    fn test_stereographic_margin_lands_off_screen() {
        let vp = viewport();
        let v = view(Rotation::default(), ProjectionMode::Stereographic);
        let p = project(110.0, 0.0, &v, &vp).unwrap();
        assert!(!vp.contains(p), "{p:?}");
    }

    #[test]
    fn test_north_is_up_east_is_right() {
        let vp = viewport();
        let v = view(Rotation::default(), ProjectionMode::Orthographic);
        let north = project(0.0, 10.0, &v, &vp).unwrap();
        let east = project(10.0, 0.0, &v, &vp).unwrap();
        assert!(north.y < vp.center().y);
        assert!(east.x > vp.center().x);
    }

    #[test]
    fn test_scale_multiplies_distance_from_center() {
        let vp = viewport();
        let mut v = view(Rotation::default(), ProjectionMode::Stereographic);
        let near = project(20.0, 10.0, &v, &vp).unwrap() - vp.center();
        v.scale = 3.0;
        let far = project(20.0, 10.0, &v, &vp).unwrap() - vp.center();
        assert_close(far, near * 3.0);
    }

    #[test]
    fn test_angular_distance_matches_clip() {
        let rot = Rotation::new(30.0, -45.0, 0.0);
        assert!(angular_distance_from_center(-30.0, 45.0, &rot) < 1e-6);
        let d = angular_distance_from_center(-30.0, -45.0, &rot);
        assert!((d - 90.0).abs() < 1e-6, "d = {d}");
    }
}
