use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty version input")]
    EmptyInput,

    #[error("invalid version or range: {0}")]
    InvalidSyntax(String),

    #[error("invalid ~> token '{token}': {reason}")]
    InvalidShorthandToken { token: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("invalid target version: {0}")]
    InvalidTarget(#[from] ParseError),

    #[error("exact strategy requires an exact version (e.g., '2.1.1'), got: {0}")]
    InvalidTargetForStrategy(String),

    #[error("cannot build a range above {0}: major version out of range")]
    MajorOutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}', expected one of: dynamic, exact, range")]
pub struct UnknownStrategy(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
