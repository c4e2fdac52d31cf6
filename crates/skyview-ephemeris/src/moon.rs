//! Geocentric position of the Moon: Keplerian mean orbit plus the principal
//! periodic perturbations in longitude, latitude and distance.

use chrono::{DateTime, Utc};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::coords::{Equatorial, normalize_degrees, obliquity_of_ecliptic};
use crate::kepler::{Element, OrbitalElements};
use crate::sun::{sun_mean_anomaly, sun_mean_longitude};
use crate::time::days_since_j2000;

/// Mean elements of the lunar orbit at J2000.0. Semi-major axis in Earth radii.
pub const MOON: OrbitalElements = OrbitalElements {
    ascending_node: Element::new(125.043_369, -0.052_953_808_3),
    inclination: Element::fixed(5.1454),
    perihelion_arg: Element::new(318.309_936, 0.164_357_322_3),
    semi_major_axis: 60.2666,
    eccentricity: Element::fixed(0.054_900),
    mean_anomaly: Element::new(134.962_889, 13.064_992_950_9),
};

/// Where the Moon is, seen from the geocentre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoonPosition {
    /// Apparent RA/Dec.
    pub equatorial: Equatorial,
    /// Ecliptic longitude in degrees `[0, 360)`.
    pub ecliptic_longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub ecliptic_latitude_deg: f64,
    /// Distance in Earth radii.
    pub distance_earth_radii: f64,
}

/// Periodic corrections to the Keplerian lunar orbit, in degrees and Earth radii.
struct Perturbation {
    longitude: f64,
    latitude: f64,
    distance: f64,
}

fn perturbations(d: f64) -> Perturbation {
    let ms = sun_mean_anomaly(d);
    let ls = sun_mean_longitude(d);
    let mm = MOON.mean_anomaly.at(d);
    let nm = MOON.ascending_node.at(d);
    let lm = mm + MOON.perihelion_arg.at(d) + nm;
    let dd = lm - ls;
    let f = lm - nm;

    let s = |deg: f64| deg.to_radians().sin();
    let c = |deg: f64| deg.to_radians().cos();

    let longitude = -1.274 * s(mm - 2.0 * dd) // evection
        + 0.658 * s(2.0 * dd) // variation
        - 0.186 * s(ms) // yearly equation
        - 0.059 * s(2.0 * mm - 2.0 * dd)
        - 0.057 * s(mm - 2.0 * dd + ms)
        + 0.053 * s(mm + 2.0 * dd)
        + 0.046 * s(2.0 * dd - ms)
        + 0.041 * s(mm - ms)
        - 0.035 * s(dd) // parallactic equation
        - 0.031 * s(mm + ms)
        - 0.015 * s(2.0 * f - 2.0 * dd)
        + 0.011 * s(mm - 4.0 * dd);

    let latitude = -0.173 * s(f - 2.0 * dd)
        - 0.055 * s(mm - f - 2.0 * dd)
        - 0.046 * s(mm + f - 2.0 * dd)
        + 0.033 * s(f + 2.0 * dd)
        + 0.017 * s(2.0 * mm + f);

    let distance = -0.58 * c(mm - 2.0 * dd) - 0.46 * c(2.0 * dd);

    Perturbation {
        longitude,
        latitude,
        distance,
    }
}

/// Low-precision geocentric position of the Moon at `date`.
pub fn moon_position(date: DateTime<Utc>) -> MoonPosition {
    let d = days_since_j2000(date);
    let mean = MOON.ecliptic_position(d);
    let p = perturbations(d);

    let lon = mean.y.atan2(mean.x).to_degrees() + p.longitude;
    let lat = mean.z.atan2(mean.x.hypot(mean.y)).to_degrees() + p.latitude;
    let r = mean.length() + p.distance;

    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let ecliptic = DVec3::new(cos_lon * cos_lat, sin_lon * cos_lat, sin_lat) * r;

    MoonPosition {
        equatorial: Equatorial::from_ecliptic(ecliptic, obliquity_of_ecliptic(d)),
        ecliptic_longitude_deg: normalize_degrees(lon),
        ecliptic_latitude_deg: lat,
        distance_earth_radii: r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_moon_at_j2000() {
        // Reference (geocentric): lon 223.3 deg, lat +5.17 deg, 402 000 km.
        let moon = moon_position(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
        assert!((moon.ecliptic_longitude_deg - 223.3).abs() < 0.1, "{moon:?}");
        assert!((moon.ecliptic_latitude_deg - 5.17).abs() < 0.1, "{moon:?}");
        assert!((moon.equatorial.ra_hours - 14.83).abs() < 0.05, "{moon:?}");
        assert!((moon.equatorial.dec_deg + 10.9).abs() < 0.3, "{moon:?}");
        assert!((moon.distance_earth_radii - 63.1).abs() < 0.5, "{moon:?}");
    }

    #[test]
    fn test_moon_latitude_bounded_by_inclination() {
        let mut date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        for _ in 0..400 {
            let moon = moon_position(date);
            assert!(moon.ecliptic_latitude_deg.abs() < 5.5, "{moon:?}");
            assert!((55.0..64.5).contains(&moon.distance_earth_radii), "{moon:?}");
            date += Duration::hours(23);
        }
    }

    #[test]
    fn test_moon_moves_about_thirteen_degrees_per_day() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let a = moon_position(t0).ecliptic_longitude_deg;
        let b = moon_position(t0 + Duration::days(1)).ecliptic_longitude_deg;
        let step = normalize_degrees(b - a);
        assert!((11.0..15.5).contains(&step), "step {step}");
    }

    #[test]
    fn test_moon_stays_in_domain_for_extreme_dates() {
        for year in [-2000, 1, 1600, 2100, 9000] {
            let date = Utc.with_ymd_and_hms(year, 7, 4, 6, 30, 0).unwrap();
            let moon = moon_position(date);
            assert!((0.0..24.0).contains(&moon.equatorial.ra_hours));
            assert!((-90.0..=90.0).contains(&moon.equatorial.dec_deg));
        }
    }
}
