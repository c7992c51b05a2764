/// Display-priority assignment.
///
/// Each new station is ranked by its great-circle distance to the nearest
/// station already in the catalog. Distance is mapped onto a priority with
/// a geometric threshold ladder: starting at `MAX_PRIORITY` and a threshold
/// of π/8 radians, every step the station is still closer than the
/// threshold costs one priority level and shrinks the threshold by
/// `THRESHOLD_DECAY`.
///
/// Results depend on processing order. Ids are processed ascending, and a
/// station is never ranked against itself.

use std::f64::consts::PI;

use crate::model::{CandidateStation, MAX_PRIORITY, StationRecord};

/// Threshold for the first step down from `MAX_PRIORITY`, in radians.
pub const INITIAL_THRESHOLD: f64 = PI / 8.0;

/// Each ladder step divides the threshold by this factor.
pub const THRESHOLD_DECAY: f64 = 1.17;

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

/// Great-circle angular distance in radians between two points given in
/// degrees, via the spherical law of cosines.
///
/// Rounding can push the cosine argument just past 1.0; `acos` then yields
/// NaN, which is read as coincident points (distance 0).
pub fn angular_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let delta_lambda = (lon2 - lon1).to_radians();

    let cosine = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();
    let distance = cosine.acos().abs();

    if distance.is_nan() { 0.0 } else { distance }
}

/// Smallest angular distance from `candidate` to any accepted record.
///
/// An empty accepted set yields π (antipodal), the largest possible
/// separation.
pub fn min_distance(candidate: &CandidateStation, accepted: &[StationRecord]) -> f64 {
    accepted
        .iter()
        .map(|r| {
            angular_distance(
                candidate.latitude,
                candidate.longitude,
                r.latitude(),
                r.longitude(),
            )
        })
        .fold(PI, f64::min)
}

// ---------------------------------------------------------------------------
// Priority ladder
// ---------------------------------------------------------------------------

/// Maps a nearest-neighbour distance (radians) to a priority in
/// `0..=MAX_PRIORITY`.
pub fn priority_for_distance(min_dist: f64) -> u8 {
    let mut priority = MAX_PRIORITY;
    let mut threshold = INITIAL_THRESHOLD;

    while min_dist < threshold && priority > 0 {
        priority -= 1;
        threshold /= THRESHOLD_DECAY;
    }

    priority
}

/// Priority `candidate` earns given the records accepted before it.
pub fn assign_priority(candidate: &CandidateStation, accepted: &[StationRecord]) -> u8 {
    priority_for_distance(min_distance(candidate, accepted))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
