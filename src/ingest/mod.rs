/// Observation feed ingestion.
///
/// Submodules:
/// - `bbc`      — BBC Weather RSS: URL construction, parsing, HTTP client.
/// - `fixtures` — (test only) representative feed payloads.

pub mod bbc;
pub mod fixtures;

use crate::model::{CandidateStation, FetchError};

/// Anything that can turn a station id into a candidate station.
///
/// The catalog pipeline only talks to this trait, so it can be driven by
/// canned feeds in tests instead of the network.
pub trait FeedSource {
    /// Retrieves and parses the feed for `id`. One attempt, no retries.
    fn fetch(&self, id: u32) -> Result<CandidateStation, FetchError>;
}

impl<T: FeedSource + ?Sized> FeedSource for &T {
    fn fetch(&self, id: u32) -> Result<CandidateStation, FetchError> {
        (**self).fetch(id)
    }
}
