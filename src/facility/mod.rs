//! Bus-stop and public-toilet reference data.

pub mod geo;
pub mod table;
pub mod types;

pub use table::FacilityTable;
pub use types::{DataError, DataSource, FacilityRecord, StopInfo};
