use thiserror::Error;

/// Errors that can occur while building the Nazuke engine.
///
/// Analysis itself never fails: extractors report "not found" as `None` or an
/// empty suffix. Only construction and configuration are fallible.
#[derive(Debug, Error)]
pub enum NazukeError {
    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// A configuration value broke one of the engine's invariants.
    #[error("invalid rename config: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be decoded.
    #[error("failed to parse rename config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// An unrecognized media kind name.
    #[error("unknown media kind: {0:?}")]
    UnknownMediaKind(String),
}

/// Result type alias for Nazuke operations.
pub type Result<T> = std::result::Result<T, NazukeError>;
