//! Julian day arithmetic and mean sidereal time.

use chrono::{DateTime, Utc};

use crate::coords::normalize_degrees;

/// Julian date of the J2000.0 epoch (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Unix time of J2000.0 in milliseconds.
const J2000_UNIX_MS: i64 = 946_728_000_000;

const MS_PER_DAY: f64 = 86_400_000.0;

/// GMST at J2000.0 in degrees.
pub const GMST_AT_J2000_DEG: f64 = 280.460_618_37;

/// Sidereal rotation of the Earth per solar day, in degrees.
pub const GMST_DEG_PER_DAY: f64 = 360.985_647_366_29;

/// Fractional days elapsed since J2000.0 (negative before the epoch).
pub fn days_since_j2000(date: DateTime<Utc>) -> f64 {
    (date.timestamp_millis() - J2000_UNIX_MS) as f64 / MS_PER_DAY
}

/// Julian date of `date`, with UTC standing in for UT1.
pub fn julian_date(date: DateTime<Utc>) -> f64 {
    J2000_JD + days_since_j2000(date)
}

/// Local mean sidereal time in degrees `[0, 360)`.
///
/// Uses the linear GMST model `280.46061837 + 360.98564736629 * d` where `d`
/// is days since J2000.0, then adds the observer's east longitude.
pub fn local_sidereal_time(date: DateTime<Utc>, longitude_deg: f64) -> f64 {
    let d = days_since_j2000(date);
    normalize_degrees(GMST_AT_J2000_DEG + GMST_DEG_PER_DAY * d + longitude_deg)
}

/// Maps right ascension in hours onto the projection's longitude axis.
pub fn ra_to_screen_longitude(ra_hours: f64) -> f64 {
    normalize_degrees(ra_hours * 15.0)
}
