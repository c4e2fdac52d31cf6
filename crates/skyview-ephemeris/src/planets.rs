//! Geocentric positions of the outer planets from heliocentric mean orbits.

use chrono::{DateTime, Utc};

use crate::coords::{Equatorial, obliquity_of_ecliptic};
use crate::kepler::{Element, OrbitalElements};
use crate::sun::sun_ecliptic;
use crate::time::days_since_j2000;

/// Mean heliocentric elements of Mars at J2000.0.
pub const MARS: OrbitalElements = OrbitalElements {
    ascending_node: Element::new(49.557_432, 2.110_81e-5),
    inclination: Element::new(1.8497, -1.78e-8),
    perihelion_arg: Element::new(286.501_644, 2.929_61e-5),
    semi_major_axis: 1.523_688,
    eccentricity: Element::new(0.093_405, 2.516e-9),
    mean_anomaly: Element::new(19.388_131, 0.524_020_776_6),
};

/// Mean heliocentric elements of Jupiter at J2000.0.
pub const JUPITER: OrbitalElements = OrbitalElements {
    ascending_node: Element::new(100.454_242, 2.768_54e-5),
    inclination: Element::new(1.3030, -1.557e-7),
    perihelion_arg: Element::new(273.877_725, 1.645_05e-5),
    semi_major_axis: 5.202_56,
    eccentricity: Element::new(0.048_498, 4.469e-9),
    mean_anomaly: Element::new(20.019_628, 0.083_085_300_1),
};

/// Geocentric RA/Dec of a body on the heliocentric orbit `elements`.
///
/// The heliocentric ecliptic vector is shifted to the geocentre by adding the
/// Sun's geocentric vector, then rotated through the obliquity.
pub fn planet_position(date: DateTime<Utc>, elements: &OrbitalElements) -> Equatorial {
    let d = days_since_j2000(date);
    let geocentric = elements.ecliptic_position(d) + sun_ecliptic(d);
    Equatorial::from_ecliptic(geocentric, obliquity_of_ecliptic(d))
}

/// Geocentric RA/Dec of Mars.
pub fn mars_position(date: DateTime<Utc>) -> Equatorial {
    planet_position(date, &MARS)
}

/// Geocentric RA/Dec of Jupiter.
pub fn jupiter_position(date: DateTime<Utc>) -> Equatorial {
    planet_position(date, &JUPITER)
}
