//! Location resolver — free text to stop to nearest toilet.
//!
//! Extraction:  entity recognizer → filtered-token partial match (> 70) → none
//! Stop lookup: exact stop name → weighted best match (≥ 60) → none

use tracing::debug;

use crate::facility::{FacilityRecord, FacilityTable};

use super::fuzzy::{best_match, partial_ratio, weighted_ratio};
use super::ner::{EntityRecognizer, RuleRecognizer};
use super::text::filter_query;
use super::types::{ResolutionFailure, ResolutionResult};

/// Minimum partial-ratio score (exclusive) for the extraction fallback.
pub const EXTRACTION_THRESHOLD: u8 = 70;

/// Minimum weighted-ratio score (inclusive) for accepting a stop match.
pub const STOP_MATCH_THRESHOLD: u8 = 60;

/// Resolves queries against one immutable reference table.
pub struct LocationResolver {
    table: FacilityTable,
    recognizer: Box<dyn EntityRecognizer>,
}

impl LocationResolver {
    /// Resolver using the rule-based recognizer, seeded with the table's
    /// stop names as its gazetteer.
    pub fn new(table: FacilityTable) -> Self {
        let recognizer = RuleRecognizer::with_gazetteer(table.stop_names());
        Self::with_recognizer(table, recognizer)
    }

    /// Resolver with a custom entity recognizer.
    pub fn with_recognizer<R>(table: FacilityTable, recognizer: R) -> Self
    where
        R: EntityRecognizer + 'static,
    {
        Self {
            table,
            recognizer: Box::new(recognizer),
        }
    }

    pub fn table(&self) -> &FacilityTable {
        &self.table
    }

    /// Pull a candidate place name out of a query.
    ///
    /// The first location entity (in document order) wins. When the
    /// recognizer finds none, the stop-word-filtered query is partially
    /// matched against every stop name and the best one is returned if it
    /// scores above [`EXTRACTION_THRESHOLD`].
    pub fn extract_location(&self, query: &str) -> Option<String> {
        let first_entity = self
            .recognizer
            .entities(query)
            .into_iter()
            .find(|e| e.label.is_location());

        if let Some(entity) = first_entity {
            debug!(entity = %entity.text, label = ?entity.label, "location entity found");
            return Some(entity.text);
        }

        let filtered = filter_query(query);
        let lowered: Vec<String> = self
            .table
            .stop_names()
            .iter()
            .map(|n| n.to_lowercase())
            .collect();

        let (idx, score) = best_match(&filtered, &lowered, partial_ratio)?;
        debug!(%filtered, candidate = %self.table.stop_names()[idx], score, "fuzzy extraction fallback");

        (score > EXTRACTION_THRESHOLD).then(|| self.table.stop_names()[idx].clone())
    }

    /// Map a place name to the record of the closest known stop.
    pub fn find_nearest_toilet(&self, name: &str) -> Option<&FacilityRecord> {
        if let Some(record) = self.table.get(name) {
            return Some(record);
        }

        let names = self.table.stop_names();
        let (idx, score) = best_match(name, names, weighted_ratio)?;
        debug!(%name, candidate = %names[idx], score, "stop name best match");

        if score < STOP_MATCH_THRESHOLD {
            return None;
        }
        self.table.get(&names[idx])
    }

    /// Full pipeline: extract, match, and build the directions link.
    pub fn resolve(&self, query: &str) -> ResolutionResult {
        let Some(name) = self.extract_location(query) else {
            return ResolutionResult::failed(ResolutionFailure::NoLocationIdentified);
        };

        let Some(record) = self.find_nearest_toilet(&name) else {
            return ResolutionResult::failed(ResolutionFailure::NoMatchingStop { name });
        };

        let link = walking_directions_url(record);
        ResolutionResult::found(record.clone(), link)
    }
}

/// Google Maps walking directions from the stop to its facility.
pub fn walking_directions_url(record: &FacilityRecord) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode=walking",
        record.stop_lat, record.stop_lon, record.facility_lat, record.facility_lon,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::DataSource;
    use crate::location::ner::{Entity, EntityLabel};

    fn sample_resolver() -> LocationResolver {
        LocationResolver::new(FacilityTable::sample().unwrap())
    }

    /// Recognizer returning a fixed entity list.
    struct Fixed(Vec<(&'static str, EntityLabel)>);

    impl EntityRecognizer for Fixed {
        fn entities(&self, _text: &str) -> Vec<Entity> {
            self.0
                .iter()
                .enumerate()
                .map(|(i, (text, label))| Entity {
                    text: text.to_string(),
                    start: i * 100,
                    end: i * 100 + text.len(),
                    label: *label,
                })
                .collect()
        }
    }

    fn record(stop_id: &str, stop_name: &str) -> FacilityRecord {
        FacilityRecord {
            stop_id: stop_id.into(),
            stop_name: stop_name.into(),
            stop_lat: 12.9716,
            stop_lon: 77.5946,
            facility_id: format!("F-{stop_id}"),
            facility_lat: 12.9726,
            facility_lon: 77.5956,
            distance_meters: 140.0,
            facility_address: format!("{stop_name} Gate"),
        }
    }

    #[test]
    fn test_connaught_place_example() {
        let result = sample_resolver().resolve("I need a washroom near Connaught Place");
        assert!(result.success);
        assert!(result.failure.is_none());

        let r = result.matched_record.as_ref().unwrap();
        assert_eq!(r.stop_name, "Connaught Place");
        assert_eq!(r.facility_address, "Connaught Place Block A");
        assert_eq!(r.distance_meters, 100.0);
        assert_eq!(
            result.maps_link.as_deref(),
            Some("https://www.google.com/maps/dir/?api=1&origin=28.6329,77.2495&destination=28.6339,77.2505&travelmode=walking")
        );
        assert_eq!(
            result.message,
            "I found a public toilet near Connaught Place bus stand. It's located at \
             Connaught Place Block A, approximately 100 meters away. You can use the \
             Google Maps link below for directions."
        );
    }

    #[test]
    fn test_dashboard_example_queries() {
        let resolver = sample_resolver();
        let cases = [
            ("Where can I find a toilet near Arjun Nagar?", "BS001"),
            ("Public toilet close to Hauz Khas please", "BS005"),
            ("Where is the nearest washroom from Karol Bagh bus stand?", "BS002"),
            ("I'm at Lajpat Nagar, need a toilet urgently", "BS004"),
            ("Washroom near Lajpat Nagar", "BS004"),
        ];
        for (query, stop_id) in cases {
            let result = resolver.resolve(query);
            assert!(result.success, "{query}: {}", result.message);
            assert_eq!(result.matched_record.unwrap().stop_id, stop_id, "{query}");
        }
    }

    #[test]
    fn test_exact_stop_name_returns_that_record() {
        let resolver = sample_resolver();
        for expected in resolver.table().records() {
            let result = resolver.resolve(&expected.stop_name);
            assert!(result.success, "{}", expected.stop_name);
            assert_eq!(result.matched_record.as_ref(), Some(expected));
        }
    }

    #[test]
    fn test_stop_words_only_is_no_location() {
        let result = sample_resolver().resolve("please help me");
        assert!(!result.success);
        assert_eq!(result.failure, Some(ResolutionFailure::NoLocationIdentified));
        assert!(result.matched_record.is_none());
        assert!(result.maps_link.is_none());
        assert!(result.message.starts_with("No location identified in query."));
    }

    #[test]
    fn test_empty_query_is_no_location() {
        let result = sample_resolver().resolve("");
        assert_eq!(result.failure, Some(ResolutionFailure::NoLocationIdentified));
    }

    #[test]
    fn test_unknown_place_is_no_matching_stop() {
        let result = sample_resolver().resolve("Is there a toilet near Timbuktu?");
        assert!(!result.success);
        assert_eq!(
            result.failure,
            Some(ResolutionFailure::NoMatchingStop { name: "Timbuktu".into() })
        );
        assert_eq!(result.message, "No matching stop for 'Timbuktu' in the reference table.");
    }

    #[test]
    fn test_fuzzy_fallback_without_entities() {
        // Lowercase and misspelt: no gazetteer hit, no capitalized cue run
        let resolver = sample_resolver();
        assert_eq!(
            resolver.extract_location("toilet near conaught place"),
            Some("Connaught Place".to_string())
        );
        assert_eq!(resolver.extract_location("please help me"), None);
    }

    #[test]
    fn test_partial_entity_matches_stop() {
        let result = sample_resolver().resolve("toilet near Lajpat");
        assert!(result.success, "{}", result.message);
        assert_eq!(result.matched_record.unwrap().stop_name, "Lajpat Nagar");
    }

    #[test]
    fn test_first_location_entity_wins() {
        let resolver = LocationResolver::with_recognizer(
            FacilityTable::sample().unwrap(),
            Fixed(vec![
                ("Block A", EntityLabel::Fac),
                ("Hauz Khas", EntityLabel::Gpe),
                ("Karol Bagh", EntityLabel::Loc),
            ]),
        );
        assert_eq!(resolver.extract_location("anything"), Some("Hauz Khas".to_string()));
    }

    #[test]
    fn test_time_word_after_cue_does_not_hide_stop() {
        let resolver = sample_resolver();
        let result = resolver.resolve("Toilet at Noon near Karol Bagh");
        assert!(result.success, "{}", result.message);
        assert_eq!(result.matched_record.unwrap().stop_id, "BS002");

        let result = resolver.resolve("Toilet by Tomorrow");
        assert!(!matches!(result.failure, Some(ResolutionFailure::NoMatchingStop { .. })));
    }

    fn single_stop(stop_name: &str) -> LocationResolver {
        let table =
            FacilityTable::from_records(vec![record("S1", stop_name)], DataSource::Sample).unwrap();
        LocationResolver::with_recognizer(table, Fixed(vec![]))
    }

    #[test]
    fn test_extraction_threshold_is_exclusive() {
        // three of ten characters differ: exactly 70
        let resolver = single_stop("Whitefield");
        assert_eq!(partial_ratio("whitefiqxz", "whitefield"), EXTRACTION_THRESHOLD);
        assert_eq!(resolver.extract_location("whitefiqxz"), None);

        // two of seven differ: 71
        let resolver = single_stop("Kengeri");
        assert_eq!(partial_ratio("kengeqz", "kengeri"), EXTRACTION_THRESHOLD + 1);
        assert_eq!(resolver.extract_location("kengeqz"), Some("Kengeri".to_string()));
    }

    #[test]
    fn test_stop_match_threshold_is_inclusive() {
        // four of ten characters differ: exactly 60
        let resolver = single_stop("Whitefield");
        assert_eq!(weighted_ratio("Whitefqxvz", "Whitefield"), STOP_MATCH_THRESHOLD);
        assert_eq!(resolver.find_nearest_toilet("Whitefqxvz").unwrap().stop_id, "S1");

        // seven of seventeen differ: 59
        let resolver = single_stop("Bommanahallicross");
        assert_eq!(
            weighted_ratio("Bommanahalzzzzzzz", "Bommanahallicross"),
            STOP_MATCH_THRESHOLD - 1
        );
        assert!(resolver.find_nearest_toilet("Bommanahalzzzzzzz").is_none());
    }

    #[test]
    fn test_find_nearest_toilet() {
        let resolver = sample_resolver();
        assert_eq!(resolver.find_nearest_toilet("Karol Bagh").unwrap().stop_id, "BS002");
        assert_eq!(resolver.find_nearest_toilet("karol bag").unwrap().stop_id, "BS002");
        assert_eq!(resolver.find_nearest_toilet("Khas Hauz").unwrap().stop_id, "BS005");
        assert!(resolver.find_nearest_toilet("Timbuktu").is_none());
        assert!(resolver.find_nearest_toilet("").is_none());
    }

    #[test]
    fn test_duplicate_stop_names_pick_lowest_stop_id() {
        let table = FacilityTable::from_records(
            vec![record("S7", "Majestic"), record("S3", "Majestic"), record("S1", "Shivajinagar")],
            DataSource::Sample,
        )
        .unwrap();
        let resolver = LocationResolver::new(table);
        let result = resolver.resolve("toilet near Majestic");
        assert_eq!(result.matched_record.unwrap().stop_id, "S3");
    }

    #[test]
    fn test_maps_link_order() {
        let r = record("S1", "Majestic");
        assert_eq!(
            walking_directions_url(&r),
            "https://www.google.com/maps/dir/?api=1&origin=12.9716,77.5946&destination=12.9726,77.5956&travelmode=walking"
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = sample_resolver();
        for q in ["Washroom near Hauz Khas", "please help me", "near Timbuktu"] {
            assert_eq!(resolver.resolve(q), resolver.resolve(q));
        }
    }
}
