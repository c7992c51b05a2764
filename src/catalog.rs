/// The accepted-station catalog and the pipeline that fills it.
///
/// `Catalog` is append-only: a station is ranked against every record
/// already present, then pushed. Nothing in it is ever modified or removed,
/// so each record's priority reflects exactly the stations that preceded it.
///
/// `build_catalog` walks an id range in ascending order, one id at a time:
/// fetch → validate → rank → append. A failed fetch is logged and skipped;
/// it never stops the run.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::ingest::FeedSource;
use crate::model::{CandidateStation, FailureKind, FetchError, StationRecord};
use crate::ranking::assign_priority;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<StationRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranks `candidate` against the current records and appends it.
    /// Returns the stored record.
    pub fn accept(&mut self, candidate: CandidateStation) -> &StationRecord {
        let priority = assign_priority(&candidate, &self.records);
        self.records.push(candidate.rank(priority));
        &self.records[self.records.len() - 1]
    }

    /// Records in acceptance order.
    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Tally of one catalog-building run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub attempted: usize,
    pub accepted: usize,
    pub skipped: HashMap<FailureKind, usize>,
}

impl RunSummary {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            attempted: 0,
            accepted: 0,
            skipped: HashMap::new(),
        }
    }

    fn record_failure(&mut self, error: &FetchError) {
        *self.skipped.entry(error.kind()).or_insert(0) += 1;
    }

    /// Number of ids skipped for `kind`.
    pub fn skipped_for(&self, kind: FailureKind) -> usize {
        self.skipped.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Builds a catalog from every id in `ids`, ascending.
pub fn build_catalog<S: FeedSource>(source: &S, ids: RangeInclusive<u32>) -> (Catalog, RunSummary) {
    let mut catalog = Catalog::new();
    let mut summary = RunSummary::start();

    for id in ids {
        summary.attempted += 1;

        match source.fetch(id) {
            Ok(candidate) => {
                let record = catalog.accept(candidate);
                info!(
                    id,
                    name = record.name(),
                    country = record.country(),
                    priority = record.priority(),
                    "accepted station"
                );
                summary.accepted += 1;
            }
            Err(e) => {
                match &e {
                    FetchError::Transport { .. } => warn!(id, error = %e, "skipping station"),
                    _ => debug!(id, error = %e, "skipping station"),
                }
                summary.record_failure(&e);
            }
        }
    }

    summary.finished_at = Utc::now();
    (catalog, summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_PRIORITY;
    use std::cell::RefCell;

    fn candidate(id: u32, latitude: f64, longitude: f64) -> CandidateStation {
        CandidateStation {
            id,
            name: format!("Station {}", id),
            country: "Testland".to_string(),
            latitude,
            longitude,
        }
    }

    /// Serves canned results and remembers which ids were asked for.
    struct ScriptedSource {
        responses: HashMap<u32, Result<CandidateStation, FetchError>>,
        requested: RefCell<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn station(mut self, id: u32, latitude: f64, longitude: f64) -> Self {
            self.responses.insert(id, Ok(candidate(id, latitude, longitude)));
            self
        }

        fn failure(mut self, id: u32, error: FetchError) -> Self {
            self.responses.insert(id, Err(error));
            self
        }
    }

    impl FeedSource for ScriptedSource {
        fn fetch(&self, id: u32) -> Result<CandidateStation, FetchError> {
            self.requested.borrow_mut().push(id);
            match self.responses.get(&id) {
                Some(Ok(c)) => Ok(c.clone()),
                Some(Err(FetchError::MissingCoordinates { latitude, longitude })) => {
                    Err(FetchError::MissingCoordinates {
                        latitude: latitude.clone(),
                        longitude: longitude.clone(),
                    })
                }
                Some(Err(FetchError::Parse(m))) => Err(FetchError::Parse(m.clone())),
                _ => Err(FetchError::Transport {
                    url: format!("http://example.invalid/{}", id),
                    message: "HTTP 404 Not Found".to_string(),
                }),
            }
        }
    }

    // --- Catalog ------------------------------------------------------------

    #[test]
    fn test_first_accepted_station_gets_max_priority() {
        let mut catalog = Catalog::new();
        let record = catalog.accept(candidate(1, 51.5, -0.12));
        assert_eq!(record.priority(), MAX_PRIORITY);
    }

    #[test]
    fn test_second_coincident_station_gets_zero_priority() {
        let mut catalog = Catalog::new();
        catalog.accept(candidate(1, 0.0, 0.0));
        let second = catalog.accept(candidate(2, 0.0, 0.0));
        assert_eq!(second.priority(), 0);
    }

    #[test]
    fn test_accept_does_not_change_earlier_records() {
        let mut catalog = Catalog::new();
        catalog.accept(candidate(1, 10.0, 10.0));
        let before = catalog.records()[0].clone();

        catalog.accept(candidate(2, 10.0, 10.1));
        catalog.accept(candidate(3, 10.0, 10.2));

        assert_eq!(catalog.records()[0], before, "records are immutable once appended");
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_distant_stations_all_keep_max_priority() {
        let mut catalog = Catalog::new();
        catalog.accept(candidate(1, 0.0, 0.0));
        catalog.accept(candidate(2, 0.0, 90.0));
        catalog.accept(candidate(3, 0.0, 180.0));
        catalog.accept(candidate(4, 90.0, 0.0));

        for record in catalog.records() {
            assert_eq!(record.priority(), MAX_PRIORITY, "station {} is isolated", record.id());
        }
    }

    #[test]
    fn test_priority_uses_nearest_not_latest_neighbour() {
        let mut catalog = Catalog::new();
        catalog.accept(candidate(1, 0.0, 0.0));
        catalog.accept(candidate(2, 0.0, 90.0));
        // Far from station 2, on top of station 1.
        let third = catalog.accept(candidate(3, 0.0, 0.0));
        assert_eq!(third.priority(), 0);
    }

    // --- Pipeline -----------------------------------------------------------

    #[test]
    fn test_build_catalog_requests_every_id_in_ascending_order() {
        let source = ScriptedSource::new().station(2, 1.0, 1.0);
        build_catalog(&source, 1..=5);
        assert_eq!(*source.requested.borrow(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_build_catalog_skips_failures_and_continues() {
        let source = ScriptedSource::new()
            .station(6, 40.0, -3.7)
            .failure(
                7,
                FetchError::MissingCoordinates {
                    latitude: "N/A".to_string(),
                    longitude: "69.2".to_string(),
                },
            )
            .station(8, 48.8, 2.3)
            .failure(9, FetchError::Parse("bad markup".to_string()));

        let (catalog, summary) = build_catalog(&source, 6..=10);

        let ids: Vec<u32> = catalog.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![6, 8], "only valid stations, in id order");

        assert_eq!(summary.attempted, 5);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.skipped_for(FailureKind::MissingCoordinates), 1);
        assert_eq!(summary.skipped_for(FailureKind::Parse), 1);
        assert_eq!(summary.skipped_for(FailureKind::Transport), 1);
        assert_eq!(summary.total_skipped(), 3);
    }

    #[test]
    fn test_build_catalog_ranks_in_id_order() {
        let source = ScriptedSource::new()
            .station(1, 0.0, 0.0)
            .station(2, 0.0, 0.0);

        let (catalog, _) = build_catalog(&source, 1..=2);
        let priorities: Vec<u8> = catalog.records().iter().map(|r| r.priority()).collect();
        assert_eq!(priorities, vec![32, 0]);
    }

    #[test]
    fn test_build_catalog_with_no_valid_stations_is_empty() {
        let source = ScriptedSource::new();
        let (catalog, summary) = build_catalog(&source, 1..=3);
        assert!(catalog.is_empty());
        assert_eq!(summary.accepted, 0);
        assert_eq!(summary.skipped_for(FailureKind::Transport), 3);
    }

    #[test]
    fn test_summary_elapsed_is_non_negative() {
        let source = ScriptedSource::new().station(1, 0.0, 0.0);
        let (_, summary) = build_catalog(&source, 1..=1);
        assert!(summary.elapsed() >= Duration::zero());
    }
}
