//! Core types for location resolution.

use serde::Serialize;
use thiserror::Error;

use crate::facility::FacilityRecord;

/// Why a query could not be resolved. Both kinds are terminal for the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionFailure {
    /// Neither entity extraction nor the fuzzy fallback found a place.
    #[error("No location identified in query. Please mention a specific bus stand or area.")]
    NoLocationIdentified,

    /// A place was extracted but no stop name is close enough to it.
    #[error("No matching stop for '{name}' in the reference table.")]
    NoMatchingStop { name: String },
}

/// Outcome of one query, ready for a presentation layer to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    pub success: bool,
    pub matched_record: Option<FacilityRecord>,
    pub message: String,
    pub maps_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ResolutionFailure>,
}

impl ResolutionResult {
    pub(crate) fn found(record: FacilityRecord, maps_link: String) -> Self {
        let message = format!(
            "I found a public toilet near {} bus stand. It's located at {}, \
             approximately {} meters away. You can use the Google Maps link \
             below for directions.",
            record.stop_name, record.facility_address, record.distance_meters,
        );
        Self {
            success: true,
            matched_record: Some(record),
            message,
            maps_link: Some(maps_link),
            failure: None,
        }
    }

    pub(crate) fn failed(failure: ResolutionFailure) -> Self {
        Self {
            success: false,
            matched_record: None,
            message: failure.to_string(),
            maps_link: None,
            failure: Some(failure),
        }
    }

    /// Multi-line summary for terminal output.
    pub fn display_lines(&self) -> String {
        match &self.matched_record {
            Some(r) => format!(
                "\u{1F68F} {} ({})\n  \u{1F6BB} {} [{}]\n  \u{1F4CF} {} m\n  \u{1F5FA}\u{FE0F}  {}",
                r.stop_name,
                r.stop_id,
                r.facility_address,
                r.facility_id,
                r.distance_meters,
                self.maps_link.as_deref().unwrap_or(""),
            ),
            None => format!("\u{2717} {}", self.message),
        }
    }
}
