//! Usable Public Toilet Locator.
//!
//! Turns a free-text request such as "I need a washroom near Connaught Place"
//! into the nearest bus stand, its closest public toilet, and a Google Maps
//! walking-directions link.

pub mod config;
pub mod facility;
pub mod location;
pub mod server;

pub use facility::{DataError, DataSource, FacilityRecord, FacilityTable};
pub use location::{LocationResolver, ResolutionFailure, ResolutionResult};
