pub mod config;
pub mod version;

pub use version::{
    Constraint, ParseError, ResolutionError, Resolver, SearchBounds, SemanticVersion, Strategy,
    VersionTerm, apply_strategy,
};
