//! Catalog error types.

/// Errors that can occur when reading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse catalog: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// A star entry has coordinates or magnitude outside their domain.
    #[error("invalid star {name:?}: {reason}")]
    InvalidStar { name: String, reason: &'static str },
}
