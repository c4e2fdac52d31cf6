//! The dynamic bodies drawn over the star catalog.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coords::Equatorial;
use crate::moon::moon_position;
use crate::planets::{jupiter_position, mars_position};
use crate::sun::sun_position;

/// A solar-system body whose position is recomputed from the observation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Sun,
    Moon,
    Mars,
    Jupiter,
}

impl BodyKind {
    /// Every body, in draw order.
    pub const ALL: [BodyKind; 4] = [
        BodyKind::Sun,
        BodyKind::Moon,
        BodyKind::Mars,
        BodyKind::Jupiter,
    ];

    /// Stable lowercase identifier.
    pub fn id(&self) -> &'static str {
        match self {
            BodyKind::Sun => "sun",
            BodyKind::Moon => "moon",
            BodyKind::Mars => "mars",
            BodyKind::Jupiter => "jupiter",
        }
    }

    /// Capitalized English name.
    pub fn display_name(&self) -> &'static str {
        match self {
            BodyKind::Sun => "Sun",
            BodyKind::Moon => "Moon",
            BodyKind::Mars => "Mars",
            BodyKind::Jupiter => "Jupiter",
        }
    }

    /// Apparent position at `date`.
    pub fn position(&self, date: DateTime<Utc>) -> Equatorial {
        match self {
            BodyKind::Sun => sun_position(date).equatorial,
            BodyKind::Moon => moon_position(date).equatorial,
            BodyKind::Mars => mars_position(date),
            BodyKind::Jupiter => jupiter_position(date),
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string names no known body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown body: {0}")]
pub struct ParseBodyError(pub String);

impl FromStr for BodyKind {
    type Err = ParseBodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BodyKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseBodyError(trimmed.to_string()))
    }
}

/// A body paired with its computed position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub kind: BodyKind,
    pub equatorial: Equatorial,
}

/// Positions of every body at `date`. Recomputed from scratch on each call.
pub fn all_bodies(date: DateTime<Utc>) -> [BodyPosition; 4] {
    BodyKind::ALL.map(|kind| BodyPosition {
        kind,
        equatorial: kind.position(date),
    })
}
