//! Apparent position of the Sun from the Earth's mean orbit.

use chrono::{DateTime, Utc};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::coords::{Equatorial, normalize_degrees, obliquity_of_ecliptic};
use crate::kepler::{Element, OrbitalElements};
use crate::time::days_since_j2000;

/// Mean elements of the Sun's apparent geocentric orbit at J2000.0.
pub const SUN: OrbitalElements = OrbitalElements {
    ascending_node: Element::fixed(0.0),
    inclination: Element::fixed(0.0),
    perihelion_arg: Element::new(282.940_471, 4.709_35e-5),
    semi_major_axis: 1.0,
    eccentricity: Element::new(0.016_709, -1.151e-9),
    mean_anomaly: Element::new(357.525_400, 0.985_600_258_5),
};

/// Where the Sun is, seen from the geocentre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    /// Apparent RA/Dec.
    pub equatorial: Equatorial,
    /// Ecliptic longitude in degrees `[0, 360)`.
    pub ecliptic_longitude_deg: f64,
    /// Distance in astronomical units.
    pub distance_au: f64,
}

/// Geocentric ecliptic rectangular position of the Sun in AU.
pub(crate) fn sun_ecliptic(d: f64) -> DVec3 {
    SUN.ecliptic_position(d)
}

/// Mean longitude of the Sun in degrees, `M + w`.
pub(crate) fn sun_mean_longitude(d: f64) -> f64 {
    normalize_degrees(SUN.mean_anomaly.at(d) + SUN.perihelion_arg.at(d))
}

/// Mean anomaly of the Sun in degrees.
pub(crate) fn sun_mean_anomaly(d: f64) -> f64 {
    normalize_degrees(SUN.mean_anomaly.at(d))
}

/// Low-precision apparent position of the Sun at `date`.
pub fn sun_position(date: DateTime<Utc>) -> SunPosition {
    let d = days_since_j2000(date);
    let ecliptic = sun_ecliptic(d);
    SunPosition {
        equatorial: Equatorial::from_ecliptic(ecliptic, obliquity_of_ecliptic(d)),
        ecliptic_longitude_deg: normalize_degrees(ecliptic.y.atan2(ecliptic.x).to_degrees()),
        distance_au: ecliptic.length(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_sun_at_j2000() {
        let sun = sun_position(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
        // Reference: RA 18h45.2m, Dec -23.03 deg, 0.9833 AU.
        assert!((sun.equatorial.ra_hours - 18.753).abs() < 0.02, "{sun:?}");
        assert!((sun.equatorial.dec_deg + 23.03).abs() < 0.05, "{sun:?}");
        assert!((sun.distance_au - 0.9833).abs() < 0.001, "{sun:?}");
    }

    #[test]
    fn test_sun_crosses_equator_at_march_equinox() {
        let sun = sun_position(Utc.with_ymd_and_hms(2024, 3, 20, 3, 6, 0).unwrap());
        assert!(sun.equatorial.dec_deg.abs() < 0.05, "{sun:?}");
        let ra = sun.equatorial.ra_hours;
        assert!(ra < 0.01 || ra > 23.99, "ra = {ra}");
    }

    #[test]
    fn test_sun_reaches_obliquity_at_june_solstice() {
        let sun = sun_position(Utc.with_ymd_and_hms(2024, 6, 20, 20, 51, 0).unwrap());
        assert!((sun.equatorial.dec_deg - 23.44).abs() < 0.05, "{sun:?}");
        assert!((sun.equatorial.ra_hours - 6.0).abs() < 0.02, "{sun:?}");
        assert!((sun.ecliptic_longitude_deg - 90.0).abs() < 0.1);
    }

    #[test]
    fn test_sun_stays_in_domain_over_centuries() {
        let mut date = Utc.with_ymd_and_hms(1000, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(3000, 1, 1, 0, 0, 0).unwrap();
        while date < end {
            let sun = sun_position(date);
            assert!((0.0..24.0).contains(&sun.equatorial.ra_hours));
            assert!((-90.0..=90.0).contains(&sun.equatorial.dec_deg));
            assert!(sun.equatorial.dec_deg.abs() < 24.5);
            date += Duration::days(7919);
        }
    }
}
