//! Configuration error types.

/// Errors from loading, saving, or checking `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A value parsed but makes no sense, e.g. `min_scale > max_scale`.
    #[error("invalid config value `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    /// The platform has no per-user config directory and none was given.
    #[error("no config directory available; pass --config")]
    NoConfigDir,
}
