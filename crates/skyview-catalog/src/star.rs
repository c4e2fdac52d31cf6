//! Catalog star entries.

use serde::{Deserialize, Serialize};

/// Which name variant to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lang {
    /// The catalog's proper name.
    #[default]
    Primary,
    /// The localized name, where the catalog has one.
    Localized,
}

/// An immutable catalog star.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Catalog identifier (Hipparcos number in the bundled catalog).
    pub id: u32,
    /// Proper name.
    pub name: String,
    /// Localized proper name.
    #[serde(default)]
    pub name_localized: Option<String>,
    /// Right ascension in hours `[0, 24)`.
    pub ra_hours: f64,
    /// Declination in degrees `[-90, 90]`.
    pub dec_deg: f64,
    /// Apparent visual magnitude (smaller is brighter).
    pub magnitude: f64,
    /// IAU constellation abbreviation.
    pub constellation: String,
}

impl Star {
    /// The name to display for `lang`, falling back to the proper name.
    pub fn display_name(&self, lang: Lang) -> &str {
        match (lang, &self.name_localized) {
            (Lang::Localized, Some(local)) => local,
            _ => &self.name,
        }
    }

    /// Whether `query` matches the proper or localized name, ignoring case.
    pub fn matches_name(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.eq_ignore_ascii_case(query)
            || self
                .name_localized
                .as_deref()
                .is_some_and(|local| local == query || local.eq_ignore_ascii_case(query))
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..24.0).contains(&self.ra_hours) {
            return Err("right ascension outside [0, 24) hours");
        }
        if !(-90.0..=90.0).contains(&self.dec_deg) {
            return Err("declination outside [-90, 90] degrees");
        }
        if !self.magnitude.is_finite() {
            return Err("magnitude is not finite");
        }
        Ok(())
    }
}
