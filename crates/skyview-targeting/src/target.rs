//! Scavenger-hunt target identifiers and their per-frame resolution.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyview_catalog::Catalog;
use skyview_ephemeris::{BodyKind, Equatorial};

/// What the hunt is looking for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetId {
    /// A solar-system body, resolved from the ephemeris.
    Body(BodyKind),
    /// A catalog star, by proper or localized name.
    Star(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("empty target identifier")]
pub struct ParseTargetError;

impl TargetId {
    /// Where the target sits at `time`, or `None` when the star name is not
    /// in the catalog.
    pub fn resolve(&self, catalog: &Catalog, time: DateTime<Utc>) -> Option<Equatorial> {
        match self {
            TargetId::Body(kind) => Some(kind.position(time)),
            TargetId::Star(name) => catalog
                .find_by_name(name)
                .map(|star| Equatorial::new(star.ra_hours, star.dec_deg)),
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetId::Body(kind) => f.write_str(kind.id()),
            TargetId::Star(name) => f.write_str(name),
        }
    }
}

impl FromStr for TargetId {
    type Err = ParseTargetError;

    /// Body ids win over star names; anything else is taken as a star name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseTargetError);
        }
        Ok(match s.parse::<BodyKind>() {
            Ok(kind) => TargetId::Body(kind),
            Err(_) => TargetId::Star(s.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!("mars".parse::<TargetId>().unwrap(), TargetId::Body(BodyKind::Mars));
        assert_eq!(" Moon ".parse::<TargetId>().unwrap(), TargetId::Body(BodyKind::Moon));
        assert_eq!(
            "Vega".parse::<TargetId>().unwrap(),
            TargetId::Star("Vega".to_string())
        );
        assert_eq!("  ".parse::<TargetId>(), Err(ParseTargetError));
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["sun", "jupiter", "Betelgeuse"] {
            let id: TargetId = text.parse().unwrap();
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn test_resolve_star_and_body() {
        let catalog = Catalog::bundled().unwrap();
        let vega = TargetId::Star("vega".into()).resolve(&catalog, now()).unwrap();
        assert!((vega.ra_hours - 18.6156).abs() < 1e-9);
        assert!((vega.dec_deg - 38.7837).abs() < 1e-9);

        let localized = TargetId::Star("ベガ".into()).resolve(&catalog, now()).unwrap();
        assert_eq!(localized, vega);

        let sun = TargetId::Body(BodyKind::Sun).resolve(&catalog, now()).unwrap();
        assert_eq!(sun, BodyKind::Sun.position(now()));
    }

    #[test]
    fn test_unknown_star_resolves_to_none() {
        let catalog = Catalog::bundled().unwrap();
        assert!(TargetId::Star("Nope".into()).resolve(&catalog, now()).is_none());
    }
}
