//! End-to-end analysis pipeline.
//!
//! Ties the components together for one origin/destination query:
//! enumerate candidate paths, decompose each into legs, replay the
//! historical hop observations over the legs, and bundle the results
//! with presentation aggregates.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use crate::domain::{Leg, Path, TripRecord};
use crate::network::{NetworkError, TransitNetwork};
use crate::segment::{SegmentError, Segmenter};
use crate::timing::{trip_label, JoinError, TripTimeJoiner};

/// Error raised by the analysis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Segment(#[from] SegmentError),

    #[error(transparent)]
    Join(#[from] JoinError),
}

/// One candidate itinerary with its reconstructed trips.
#[derive(Debug, Clone)]
pub struct PathTiming {
    pub path: Path,
    pub legs: Arc<[Leg]>,
    pub label: String,
    pub trips: Vec<TripRecord>,
}

/// Duration aggregates over a set of reconstructed trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStats {
    pub count: usize,
    pub min: Duration,
    pub mean: Duration,
    pub max: Duration,
}

impl DurationStats {
    /// Aggregate the end-to-end durations of `trips`.
    ///
    /// Returns `None` for an empty set; there is nothing to summarize.
    pub fn from_trips(trips: &[TripRecord]) -> Option<Self> {
        let first = trips.first()?.total_time();

        let mut min = first;
        let mut max = first;
        let mut total_ms: i64 = 0;
        for trip in trips {
            let time = trip.total_time();
            min = min.min(time);
            max = max.max(time);
            total_ms += time.num_milliseconds();
        }

        Some(DurationStats {
            count: trips.len(),
            min,
            mean: Duration::milliseconds(total_ms / trips.len() as i64),
            max,
        })
    }
}

/// Reconstruct trips over every candidate itinerary between two station
/// queries.
///
/// Candidate paths whose segmentation is directionally ambiguous are
/// logged at `warn` and skipped; they describe a journey no single
/// rider takes. Paths whose leg sequence opens with a platform walk are
/// skipped at `debug`; the same itinerary is covered by the path
/// starting from the sibling platform. Everything else propagates.
pub fn run_analysis(
    network: &TransitNetwork,
    segmenter: &Segmenter,
    joiner: &TripTimeJoiner<'_>,
    from: &str,
    to: &str,
) -> Result<Vec<PathTiming>, AnalysisError> {
    let paths = network.paths_between(from, to)?;
    debug!(candidates = paths.len(), from, to, "enumerated candidate paths");

    let mut timings = Vec::with_capacity(paths.len());
    for path in paths {
        let legs = match segmenter.segment(network, &path) {
            Ok(legs) => legs,
            Err(SegmentError::AmbiguousDirection { station, .. }) => {
                warn!(%path, %station, "skipping directionally ambiguous path");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if legs.first().is_some_and(Leg::is_transfer) {
            debug!(%path, "skipping transfer-leading path");
            continue;
        }

        let trips = joiner.reconstruct(&legs)?;
        let label = trip_label(network, &legs);

        timings.push(PathTiming {
            path,
            legs,
            label,
            trips,
        });
    }

    Ok(timings)
}
