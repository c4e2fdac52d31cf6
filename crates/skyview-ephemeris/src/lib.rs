//! Low-precision ephemeris: sidereal time and apparent equatorial positions of
//! the Sun, Moon, Mars and Jupiter.
//!
//! Every function here is total over its numeric inputs. Results always land in
//! their documented domains (RA in `[0, 24)` hours, Dec in `[-90, 90]` degrees,
//! sidereal time in `[0, 360)` degrees) however far the date is from J2000.

pub mod body;
pub mod coords;
pub mod kepler;
pub mod moon;
pub mod planets;
pub mod sun;
pub mod time;

pub use body::{BodyKind, BodyPosition, ParseBodyError, all_bodies};
pub use coords::{
    Equatorial, ObserverLocation, ecliptic_to_equatorial, normalize_degrees, normalize_hours,
    obliquity_of_ecliptic,
};
pub use kepler::{Element, KEPLER_ITERATIONS, OrbitPoint, OrbitalElements, solve_kepler};
pub use moon::{MOON, MoonPosition, moon_position};
pub use planets::{JUPITER, MARS, jupiter_position, mars_position, planet_position};
pub use sun::{SUN, SunPosition, sun_position};
pub use time::{
    J2000_JD, days_since_j2000, julian_date, local_sidereal_time, ra_to_screen_longitude,
};
