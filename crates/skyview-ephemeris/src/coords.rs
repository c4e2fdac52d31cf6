//! Equatorial coordinates and ecliptic-to-equatorial rotation.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::time::ra_to_screen_longitude;

/// Wraps an angle into `[0, 360)` degrees.
pub fn normalize_degrees(deg: f64) -> f64 {
    wrap(deg, 360.0)
}

/// Wraps an hour angle into `[0, 24)` hours.
pub fn normalize_hours(hours: f64) -> f64 {
    wrap(hours, 24.0)
}

fn wrap(value: f64, period: f64) -> f64 {
    let r = value.rem_euclid(period);
    // rem_euclid rounds tiny negatives up to exactly `period`.
    if r >= period { 0.0 } else { r }
}

/// Mean obliquity of the ecliptic in degrees, `d` days after J2000.0.
pub fn obliquity_of_ecliptic(d: f64) -> f64 {
    23.4393 - 3.563e-7 * d
}

/// An apparent position on the celestial sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in hours `[0, 24)`.
    pub ra_hours: f64,
    /// Declination in degrees `[-90, 90]`.
    pub dec_deg: f64,
}

impl Equatorial {
    /// Builds a position, wrapping RA and clamping Dec into range.
    pub fn new(ra_hours: f64, dec_deg: f64) -> Self {
        Self {
            ra_hours: normalize_hours(ra_hours),
            dec_deg: dec_deg.clamp(-90.0, 90.0),
        }
    }

    /// Converts an equatorial rectangular vector (any length) to RA/Dec.
    pub fn from_rectangular(v: DVec3) -> Self {
        let ra = v.y.atan2(v.x).to_degrees() / 15.0;
        let dec = v.z.atan2(v.x.hypot(v.y)).to_degrees();
        Self::new(ra, dec)
    }

    /// Converts an ecliptic rectangular vector to RA/Dec by rotating about
    /// the x axis through the obliquity `ecl_deg`.
    pub fn from_ecliptic(v: DVec3, ecl_deg: f64) -> Self {
        Self::from_rectangular(ecliptic_to_equatorial(v, ecl_deg))
    }

    /// Longitude on the projection sphere in degrees `[0, 360)`.
    pub fn longitude_deg(&self) -> f64 {
        ra_to_screen_longitude(self.ra_hours)
    }

    /// Latitude on the projection sphere (the declination).
    pub fn latitude_deg(&self) -> f64 {
        self.dec_deg
    }
}

/// Where the observer stands on the Earth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
}

impl ObserverLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }
}

/// Rotates an ecliptic rectangular vector into the equatorial frame.
pub fn ecliptic_to_equatorial(v: DVec3, ecl_deg: f64) -> DVec3 {
    let (sin_e, cos_e) = ecl_deg.to_radians().sin_cos();
    DVec3::new(v.x, v.y * cos_e - v.z * sin_e, v.y * sin_e + v.z * cos_e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees_handles_negatives() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-1e-17), 0.0);
        assert!((normalize_degrees(1e12 + 0.5) - (1e12 + 0.5) % 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_normalize_hours_stays_below_24() {
        assert_eq!(normalize_hours(-1e-17), 0.0);
        assert_eq!(normalize_hours(25.0), 1.0);
        assert_eq!(normalize_hours(-1.0), 23.0);
    }

    #[test]
    fn test_rectangular_axes_map_to_expected_ra_dec() {
        let x = Equatorial::from_rectangular(DVec3::X);
        assert!(x.ra_hours.abs() < 1e-12 && x.dec_deg.abs() < 1e-12);
        let y = Equatorial::from_rectangular(DVec3::Y * 3.0);
        assert!((y.ra_hours - 6.0).abs() < 1e-12);
        let z = Equatorial::from_rectangular(DVec3::Z);
        assert!((z.dec_deg - 90.0).abs() < 1e-12);
        let neg_y = Equatorial::from_rectangular(DVec3::NEG_Y);
        assert!((neg_y.ra_hours - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_ecliptic_pole_maps_to_obliquity_offset() {
        let pole = Equatorial::from_ecliptic(DVec3::Z, 23.4393);
        assert!((pole.dec_deg - (90.0 - 23.4393)).abs() < 1e-9);
        assert!((pole.ra_hours - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_new_clamps_declination() {
        let p = Equatorial::new(-2.0, 91.0);
        assert_eq!(p.ra_hours, 22.0);
        assert_eq!(p.dec_deg, 90.0);
        assert_eq!(p.longitude_deg(), 330.0);
    }
}
