/// station_catalog: ranked catalog of BBC weather-observation stations.
///
/// Probes a range of station ids, keeps the ones whose feeds carry usable
/// coordinates, ranks each against the stations accepted before it, and
/// writes the result as a `StationList` XML document for the map renderer.
///
/// # Module structure
///
/// ```text
/// station_catalog
/// ├── model       — shared data types (CandidateStation, StationRecord, FetchError, …)
/// ├── config      — run configuration loader (catalog.toml)
/// ├── ingest
/// │   ├── bbc     — BBC observation RSS: URL construction, parsing, HTTP client
/// │   └── fixtures (test only) — representative feed payloads
/// ├── ranking     — great-circle distance + priority ladder
/// ├── catalog     — append-only accepted set and the build pipeline
/// └── writer      — StationList document writer/reader
/// ```

/// Public modules
pub mod catalog;
pub mod config;
pub mod ingest;
pub mod model;
pub mod ranking;
pub mod writer;
