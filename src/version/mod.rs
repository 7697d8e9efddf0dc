//! Version resolution engine
//!
//! This module decides which version or range literal to write for a single
//! dependency declaration after an update request, without ever moving the
//! declaration to a lower version set than it already had.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Shorthand  │────▶│    Term     │────▶│  Strategy   │──▶ normalize
//! │   (~> X)    │     │(exact/range)│     │  (Resolver) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │ Constraint  │────▶│   Decide    │
//!                     │ (intervals) │     │(keep/adopt) │
//!                     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────────────────────────┐
//!                     │  Bounds / Overlap (grid search) │
//!                     └─────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`term`]: Parsing of a declaration into an exact version or a range
//! - [`shorthand`]: Terraform `~>` expansion
//! - [`constraint`]: Range grammar and comparator matching
//! - [`interval`]: Effective interval of an AND-conjunction
//! - [`bounds`]: Lowest/highest version of a range inside the search space
//! - [`overlap`]: Whether two ranges share a version
//! - [`decide`]: Keep-or-replace rules with backward protection
//! - [`strategy`]: Dynamic, exact and range strategies
//! - [`normalize`]: Canonical spacing of literals
//! - [`error`]: Error types for parsing and resolution
//! - [`semver`]: Shared semver utilities

pub mod bounds;
pub mod constraint;
pub mod decide;
pub mod error;
pub mod interval;
pub mod matcher;
pub mod normalize;
pub mod overlap;
pub mod semver;
pub mod shorthand;
pub mod strategy;
pub mod term;

pub use bounds::{SearchBounds, highest, lowest};
pub use constraint::Constraint;
pub use decide::decide;
pub use error::{ParseError, ResolutionError};
pub use matcher::VersionMatcher;
pub use normalize::{is_equivalent, normalize};
pub use overlap::overlaps;
pub use self::semver::SemanticVersion;
pub use shorthand::expand_shorthand;
pub use strategy::{Resolver, Strategy, apply_strategy};
pub use term::{VersionTerm, parse};
