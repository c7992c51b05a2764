/// Shared data types for the station catalog builder.
///
/// A station passes through two stages:
///   - `CandidateStation`: what the fetcher extracted from a feed. Has no
///     priority yet and is never visible to ranking.
///   - `StationRecord`   : a candidate that has been ranked against the
///     accepted set. Only `CandidateStation::rank` can produce one, so a
///     record's priority is assigned exactly once and never changes.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Highest priority the ladder can assign. The first accepted station
/// always receives it.
pub const MAX_PRIORITY: u8 = 32;

/// Literal a feed uses when it has no usable coordinate.
pub const COORDINATE_SENTINEL: &str = "N/A";

// ---------------------------------------------------------------------------
// Stations
// ---------------------------------------------------------------------------

/// A station extracted from its observation feed, not yet ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStation {
    /// Feed identifier the station was fetched with.
    pub id: u32,
    pub name: String,
    /// May be empty when the feed title carries no country part.
    pub country: String,
    /// WGS84 latitude in degrees.
    pub latitude: f64,
    /// WGS84 longitude in degrees.
    pub longitude: f64,
}

impl CandidateStation {
    /// Promotes the candidate to a record carrying `priority`.
    ///
    /// Crate-private: priorities come from `ranking::assign_priority`, and
    /// the catalog is the only caller.
    pub(crate) fn rank(self, priority: u8) -> StationRecord {
        StationRecord {
            id: self.id,
            name: self.name,
            country: self.country,
            latitude: self.latitude,
            longitude: self.longitude,
            priority: priority.min(MAX_PRIORITY),
        }
    }
}

/// An accepted, ranked station. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    id: u32,
    name: String,
    country: String,
    latitude: f64,
    longitude: f64,
    priority: u8,
}

impl StationRecord {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Display priority in `0..=MAX_PRIORITY`; higher shows at lower zoom.
    pub fn priority(&self) -> u8 {
        self.priority
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a single station id produced no candidate.
///
/// Every variant is skippable: the pipeline logs it and moves on to the
/// next id.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection error, timeout, or non-success HTTP status.
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    /// Feed was not well-formed or lacked an expected field.
    #[error("feed parse error: {0}")]
    Parse(String),

    /// Feed reported latitude or longitude as the "N/A" sentinel.
    #[error("feed reports no coordinates (lat={latitude}, long={longitude})")]
    MissingCoordinates { latitude: String, longitude: String },
}

/// Coarse failure category, used for run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Transport,
    Parse,
    MissingCoordinates,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Transport { .. } => FailureKind::Transport,
            FetchError::Parse(_) => FailureKind::Parse,
            FetchError::MissingCoordinates { .. } => FailureKind::MissingCoordinates,
        }
    }
}

/// Failures that end a run: there is no catalog to emit without a valid
/// configuration, a working HTTP client, and a writable output.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to access catalog file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed catalog document: {0}")]
    Document(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
