//! Static star catalog and constellation line figures.
//!
//! Loaded once at startup from RON and never mutated. Constellation lines whose
//! endpoints do not resolve to a catalog star are dropped while loading.

mod catalog;
mod error;
mod star;

pub use catalog::{Catalog, CatalogFile, ConstellationLine, ResolvedLine, StarRef};
pub use error::CatalogError;
pub use star::{Lang, Star};
