//! Location resolution for free-text toilet queries.
//!
//! Extracts a place name from the query, matches it to a known bus stop,
//! and builds walking directions to that stop's nearest public toilet.

pub mod fuzzy;
pub mod ner;
pub mod resolver;
pub mod text;
pub mod types;

pub use ner::{Entity, EntityLabel, EntityRecognizer, RuleRecognizer};
pub use resolver::{walking_directions_url, LocationResolver, EXTRACTION_THRESHOLD, STOP_MATCH_THRESHOLD};
pub use types::{ResolutionFailure, ResolutionResult};
