//! Catalog loading, line resolution and lookup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::star::Star;

const BUNDLED: &str = include_str!("../data/bright_stars.ron");

/// A reference to a star from a constellation line, by id or proper name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarRef {
    Id(u32),
    Name(String),
}

/// An unresolved line segment as it appears in the catalog file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstellationLine {
    pub from: StarRef,
    pub to: StarRef,
}

/// On-disk catalog layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub stars: Vec<Star>,
    pub lines: Vec<ConstellationLine>,
}

/// A line segment whose endpoints are indices into [`Catalog::stars`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLine {
    pub from: usize,
    pub to: usize,
}

/// The loaded, immutable star catalog.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    stars: Vec<Star>,
    lines: Vec<ResolvedLine>,
}

impl Catalog {
    /// Validates stars and resolves lines. Lines with an unknown endpoint are
    /// dropped; an invalid star is an error.
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        for star in &file.stars {
            star.validate()
                .map_err(|reason| CatalogError::InvalidStar {
                    name: star.name.clone(),
                    reason,
                })?;
        }

        let mut catalog = Self {
            stars: file.stars,
            lines: Vec::with_capacity(file.lines.len()),
        };

        let mut dropped = 0usize;
        for line in &file.lines {
            match (catalog.resolve(&line.from), catalog.resolve(&line.to)) {
                (Some(from), Some(to)) => catalog.lines.push(ResolvedLine { from, to }),
                _ => {
                    dropped += 1;
                    warn!(?line.from, ?line.to, "dropping constellation line with unknown star");
                }
            }
        }

        info!(
            stars = catalog.stars.len(),
            lines = catalog.lines.len(),
            dropped,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses a catalog from RON text.
    pub fn from_ron(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = ron::from_str(text).map_err(CatalogError::Parse)?;
        Self::from_file(file)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(CatalogError::Read)?;
        Self::from_ron(&text)
    }

    /// The bright-star catalog compiled into the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_ron(BUNDLED)
    }

    /// All stars, in file order.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Resolved constellation lines.
    pub fn lines(&self) -> &[ResolvedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn star(&self, index: usize) -> Option<&Star> {
        self.stars.get(index)
    }

    /// Index of the star with catalog id `id`.
    pub fn index_of_id(&self, id: u32) -> Option<usize> {
        self.stars.iter().position(|s| s.id == id)
    }

    /// Index of the first star whose proper or localized name matches `name`.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.stars.iter().position(|s| s.matches_name(name))
    }

    /// Looks a star up by proper or localized name.
    pub fn find_by_name(&self, name: &str) -> Option<&Star> {
        self.index_of_name(name).map(|i| &self.stars[i])
    }

    /// Resolves a [`StarRef`] to a star index.
    pub fn resolve(&self, star_ref: &StarRef) -> Option<usize> {
        match star_ref {
            StarRef::Id(id) => self.index_of_id(*id),
            StarRef::Name(name) => self.index_of_name(name),
        }
    }
}
