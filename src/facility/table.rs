//! The immutable stop → facility reference table.
//!
//! Loaded once at startup from a CSV file (or the embedded sample) and
//! never mutated afterwards, so it can be shared freely between readers.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use super::geo::{haversine_meters, valid_lat, valid_lon};
use super::types::{DataError, DataSource, FacilityRecord, StopInfo};

const SAMPLE_CSV: &str = include_str!("../../data/sample_facilities.csv");

/// Raw CSV row. Accepts both the canonical column names and the
/// washroom-centric names used by older survey exports.
#[derive(Debug, Deserialize)]
struct CsvRow {
    stop_id: String,
    stop_name: String,
    stop_lat: f64,
    stop_lon: f64,
    #[serde(alias = "nearest_washroom_id")]
    facility_id: String,
    #[serde(alias = "washroom_latitude")]
    facility_lat: f64,
    #[serde(alias = "washroom_longitude")]
    facility_lon: f64,
    #[serde(alias = "distance", default)]
    distance_meters: Option<f64>,
    #[serde(alias = "washroom_address")]
    facility_address: String,
}

/// Read-only reference table with a name index.
#[derive(Debug, Clone)]
pub struct FacilityTable {
    records: Vec<FacilityRecord>,
    /// Distinct stop names in order of first appearance.
    stop_names: Vec<String>,
    /// Stop name → index of the row with the lowest stop_id.
    by_name: HashMap<String, usize>,
    source: DataSource,
}

impl FacilityTable {
    /// Load the table described by `source`.
    pub fn open(source: &DataSource) -> Result<Self, DataError> {
        match source {
            DataSource::File(path) => Self::load(path),
            DataSource::Sample => Self::sample(),
        }
    }

    /// Load from a CSV file on disk.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, DataSource::File(path.to_path_buf()))
    }

    /// The five-stop demonstration dataset compiled into the binary.
    pub fn sample() -> Result<Self, DataError> {
        Self::from_reader(SAMPLE_CSV.as_bytes(), DataSource::Sample)
    }

    /// Parse CSV rows from any reader.
    pub fn from_reader<R: Read>(reader: R, source: DataSource) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (i, result) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = i + 1;
            let raw = result.map_err(|source| DataError::Csv { row, source })?;
            records.push(into_record(row, raw)?);
        }

        Self::from_records(records, source)
    }

    /// Build the table from already-parsed records.
    pub fn from_records(records: Vec<FacilityRecord>, source: DataSource) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        for (i, r) in records.iter().enumerate() {
            validate(i + 1, r)?;
        }

        let mut stop_names = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for (idx, r) in records.iter().enumerate() {
            match by_name.get(&r.stop_name).copied() {
                None => {
                    stop_names.push(r.stop_name.clone());
                    by_name.insert(r.stop_name.clone(), idx);
                }
                Some(existing) => {
                    warn!(
                        stop_name = %r.stop_name,
                        kept = %records[existing].stop_id.as_str().min(r.stop_id.as_str()),
                        "duplicate stop name in reference table"
                    );
                    // Lowest stop_id wins, regardless of row order
                    if r.stop_id < records[existing].stop_id {
                        by_name.insert(r.stop_name.clone(), idx);
                    }
                }
            }
        }

        debug!(rows = records.len(), stops = stop_names.len(), %source, "reference table built");

        Ok(Self {
            records,
            stop_names,
            by_name,
            source,
        })
    }

    /// Look up the record for an exact stop name.
    pub fn get(&self, stop_name: &str) -> Option<&FacilityRecord> {
        self.by_name.get(stop_name).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, stop_name: &str) -> bool {
        self.by_name.contains_key(stop_name)
    }

    /// Distinct stop names, in order of first appearance.
    pub fn stop_names(&self) -> &[String] {
        &self.stop_names
    }

    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }

    /// One entry per distinct stop, for listing endpoints.
    pub fn stop_list(&self) -> Vec<StopInfo> {
        self.stop_names
            .iter()
            .filter_map(|name| self.get(name))
            .map(StopInfo::from)
            .collect()
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn into_record(row: usize, raw: CsvRow) -> Result<FacilityRecord, DataError> {
    if raw.stop_name.is_empty() {
        return Err(DataError::MissingStopName { row, stop_id: raw.stop_id });
    }

    let distance_meters = match raw.distance_meters {
        Some(d) => d,
        None => {
            check_coords(row, &raw.stop_id, raw.stop_lat, raw.stop_lon, raw.facility_lat, raw.facility_lon)?;
            haversine_meters(raw.stop_lat, raw.stop_lon, raw.facility_lat, raw.facility_lon).round()
        }
    };

    Ok(FacilityRecord {
        stop_id: raw.stop_id,
        stop_name: raw.stop_name,
        stop_lat: raw.stop_lat,
        stop_lon: raw.stop_lon,
        facility_id: raw.facility_id,
        facility_lat: raw.facility_lat,
        facility_lon: raw.facility_lon,
        distance_meters,
        facility_address: raw.facility_address,
    })
}

fn validate(row: usize, r: &FacilityRecord) -> Result<(), DataError> {
    if r.stop_name.trim().is_empty() {
        return Err(DataError::MissingStopName { row, stop_id: r.stop_id.clone() });
    }
    check_coords(row, &r.stop_id, r.stop_lat, r.stop_lon, r.facility_lat, r.facility_lon)
}

fn check_coords(
    row: usize,
    stop_id: &str,
    stop_lat: f64,
    stop_lon: f64,
    facility_lat: f64,
    facility_lon: f64,
) -> Result<(), DataError> {
    let checks = [
        ("stop_lat", stop_lat, valid_lat(stop_lat)),
        ("stop_lon", stop_lon, valid_lon(stop_lon)),
        ("facility_lat", facility_lat, valid_lat(facility_lat)),
        ("facility_lon", facility_lon, valid_lon(facility_lon)),
    ];
    for (field, value, ok) in checks {
        if !ok {
            return Err(DataError::InvalidCoordinate {
                row,
                stop_id: stop_id.to_string(),
                field,
                value,
            });
        }
    }
    Ok(())
}
