//! Mean orbital elements and the Kepler equation.

use glam::DVec3;

use crate::coords::normalize_degrees;

/// Number of Newton refinements applied to the eccentric anomaly.
///
/// Fixed count, no convergence test. For the eccentricities used here
/// (`e < 0.1`) five steps settle well below the arc-minute level; a
/// tolerance-based loop can replace this without changing any signature.
pub const KEPLER_ITERATIONS: usize = 5;

/// A mean element that drifts linearly with time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Element {
    /// Value at J2000.0.
    pub at_epoch: f64,
    /// Change per day.
    pub per_day: f64,
}

impl Element {
    /// A time-varying element.
    pub const fn new(at_epoch: f64, per_day: f64) -> Self {
        Self { at_epoch, per_day }
    }

    /// An element with no secular drift.
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Value `d` days after J2000.0.
    pub fn at(&self, d: f64) -> f64 {
        self.at_epoch + self.per_day * d
    }
}

/// Six mean orbital elements, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Longitude of the ascending node `N`.
    pub ascending_node: Element,
    /// Inclination to the ecliptic `i`.
    pub inclination: Element,
    /// Argument of perihelion `w`.
    pub perihelion_arg: Element,
    /// Semi-major axis `a` (AU for planets, Earth radii for the Moon).
    pub semi_major_axis: f64,
    /// Eccentricity `e`.
    pub eccentricity: Element,
    /// Mean anomaly `M`.
    pub mean_anomaly: Element,
}

/// Position of a body in its orbital plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPoint {
    /// True anomaly in degrees.
    pub true_anomaly: f64,
    /// Distance from the focus, in the units of `semi_major_axis`.
    pub radius: f64,
}

impl OrbitalElements {
    /// Solves the orbit `d` days after J2000.0.
    pub fn orbit_point(&self, d: f64) -> OrbitPoint {
        let e = self.eccentricity.at(d);
        let ecc_anomaly = solve_kepler(self.mean_anomaly.at(d), e).to_radians();
        let xv = self.semi_major_axis * (ecc_anomaly.cos() - e);
        let yv = self.semi_major_axis * ((1.0 - e * e).sqrt() * ecc_anomaly.sin());
        OrbitPoint {
            true_anomaly: yv.atan2(xv).to_degrees(),
            radius: xv.hypot(yv),
        }
    }

    /// Rectangular ecliptic coordinates relative to the focus.
    pub fn ecliptic_position(&self, d: f64) -> DVec3 {
        let OrbitPoint {
            true_anomaly,
            radius,
        } = self.orbit_point(d);
        let (sin_n, cos_n) = self.ascending_node.at(d).to_radians().sin_cos();
        let (sin_i, cos_i) = self.inclination.at(d).to_radians().sin_cos();
        let (sin_vw, cos_vw) = (true_anomaly + self.perihelion_arg.at(d))
            .to_radians()
            .sin_cos();

        DVec3::new(
            radius * (cos_n * cos_vw - sin_n * sin_vw * cos_i),
            radius * (sin_n * cos_vw + cos_n * sin_vw * cos_i),
            radius * (sin_vw * sin_i),
        )
    }
}

/// Eccentric anomaly in degrees for mean anomaly `m_deg` and eccentricity `e`.
/// The mean anomaly is wrapped first, so the result lies near `[0, 360)`.
///
/// Starts from the second-order series guess and applies
/// [`KEPLER_ITERATIONS`] Newton steps on `E - e sin E = M`.
pub fn solve_kepler(m_deg: f64, e: f64) -> f64 {
    let m = normalize_degrees(m_deg).to_radians();
    let mut ecc = m + e * m.sin() * (1.0 + e * m.cos());
    for _ in 0..KEPLER_ITERATIONS {
        let delta = ecc - e * ecc.sin() - m;
        let derivative = 1.0 - e * ecc.cos();
        ecc -= delta / derivative;
    }
    ecc.to_degrees()
}
