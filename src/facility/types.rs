//! Core types for the facility reference data.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// One bus stop and the public toilet nearest to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityRecord {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub facility_id: String,
    pub facility_lat: f64,
    pub facility_lon: f64,
    /// Walking-distance estimate from stop to facility, in metres.
    pub distance_meters: f64,
    pub facility_address: String,
}

/// A stop entry for the public stop list API.
#[derive(Debug, Clone, Serialize)]
pub struct StopInfo {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

impl From<&FacilityRecord> for StopInfo {
    fn from(r: &FacilityRecord) -> Self {
        Self {
            stop_id: r.stop_id.clone(),
            stop_name: r.stop_name.clone(),
            stop_lat: r.stop_lat,
            stop_lon: r.stop_lon,
        }
    }
}

/// Where the reference table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Sample,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Sample => write!(f, "built-in sample"),
        }
    }
}

/// Reference-data loading errors.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV at row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row} ({stop_id}): {field} {value} is out of range")]
    InvalidCoordinate {
        row: usize,
        stop_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("row {row} ({stop_id}): stop_name is empty")]
    MissingStopName { row: usize, stop_id: String },

    #[error("reference table is empty")]
    Empty,
}
