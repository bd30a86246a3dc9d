//! Straight-shot decomposition of paths.
//!
//! A path is decomposed into the longest legs a rider can cover
//! without leaving their seat, plus explicit transfer legs where the
//! path walks between interchange platforms. Decomposition is a pure
//! function of the network and the path, so results are memoized per
//! path value.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use crate::domain::{Direction, Leg, LineCode, Path, StationCode};
use crate::network::{RouteLink, TransitNetwork};

/// Error raised while decomposing a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    /// The edges leaving a station along the path disagree on travel
    /// direction, so the leg cannot be attributed to one heading.
    /// The offending path is excluded; other paths proceed.
    #[error("conflicting travel directions leaving {station} on path {path}")]
    AmbiguousDirection { station: StationCode, path: Path },

    /// Internal integrity failure: the path cannot be explained by the
    /// network it was enumerated from.
    #[error("route topology is inconsistent around {station}")]
    Inconsistent { station: StationCode },
}

/// Configuration for the decomposition cache.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Maximum number of memoized path decompositions.
    pub max_cached_paths: u64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_cached_paths: 10_000,
        }
    }
}

/// Memoizing straight-shot decomposer.
///
/// Safe to share across threads. Each distinct path is decomposed at
/// most once; concurrent callers for the same path wait for a single
/// computation. Errors are not cached, so a failed path is retried on
/// the next call.
pub struct Segmenter {
    cache: Cache<Path, Arc<[Leg]>>,
}

impl Segmenter {
    /// Create a segmenter with the given cache configuration.
    pub fn new(config: &SegmenterConfig) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(config.max_cached_paths)
                .build(),
        }
    }

    /// Decompose a path into ride and transfer legs.
    ///
    /// Exactly one decomposition is returned per path: each ride leg is
    /// extended greedily to the furthest path station still reachable,
    /// in the leg's single direction, by every line serving the leg's
    /// first hop. A transfer hop always ends its leg at the very next
    /// station.
    ///
    /// A single-station path decomposes to no legs.
    ///
    /// # Errors
    ///
    /// Returns `SegmentError::AmbiguousDirection` if the edges leaving
    /// a station disagree on direction, and `SegmentError::Inconsistent`
    /// if the path cannot be explained by the network at all.
    pub fn segment(
        &self,
        network: &TransitNetwork,
        path: &Path,
    ) -> Result<Arc<[Leg]>, SegmentError> {
        self.cache
            .try_get_with_by_ref(path, || decompose(network, path))
            .map_err(|e| (*e).clone())
    }

    /// Returns the number of memoized decompositions.
    pub fn cached_paths(&self) -> u64 {
        // entry_count is eventually consistent until housekeeping runs
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(&SegmenterConfig::default())
    }
}

fn decompose(network: &TransitNetwork, path: &Path) -> Result<Arc<[Leg]>, SegmentError> {
    let stations = path.stations();
    let mut legs: Vec<Leg> = Vec::new();

    if stations.len() < 2 {
        return Ok(Arc::from(legs));
    }

    let in_path: HashSet<StationCode> = stations.iter().copied().collect();
    let mut cursor = 0;

    while cursor + 1 < stations.len() {
        let here = stations[cursor];
        let next = stations[cursor + 1];

        let links = network.links_between(here, next);
        if links.is_empty() {
            return Err(SegmentError::Inconsistent { station: here });
        }

        // A transfer hop is its own leg; it never extends past `next`.
        if links.iter().any(|l| matches!(l, RouteLink::Transfer)) {
            legs.push(Leg::transfer(here, next));
            cursor += 1;
            continue;
        }

        let mut lines = BTreeSet::new();
        let mut direction: Option<Direction> = None;
        for link in &links {
            let RouteLink::Ride {
                line,
                direction: d,
            } = link
            else {
                continue;
            };

            match direction {
                None => direction = Some(*d),
                Some(prev) if prev != *d => {
                    return Err(SegmentError::AmbiguousDirection {
                        station: here,
                        path: path.clone(),
                    });
                }
                Some(_) => {}
            }

            if *line != LineCode::RUSH_PLUS {
                lines.insert(*line);
            }
        }

        let Some(direction) = direction else {
            return Err(SegmentError::Inconsistent { station: here });
        };
        if lines.is_empty() {
            // A hop tagged only with the timing-invisible rush-plus code
            return Err(SegmentError::Inconsistent { station: here });
        }

        let reach: Vec<HashSet<StationCode>> = lines
            .iter()
            .map(|&line| reachable_on_line(network, &in_path, here, line, direction))
            .collect();

        // Furthest path station served by every line of the first hop.
        // `next` always qualifies, so the cursor always advances.
        let end = (cursor + 1..stations.len())
            .rev()
            .find(|&idx| reach.iter().all(|r| r.contains(&stations[idx])))
            .ok_or(SegmentError::Inconsistent { station: here })?;

        legs.push(Leg::ride(here, stations[end], direction, lines));
        cursor = end;
    }

    debug!(%path, legs = legs.len(), "decomposed path");
    Ok(Arc::from(legs))
}

/// Stations of the induced subgraph reachable from `from` along `line`
/// travelling `direction`.
fn reachable_on_line(
    network: &TransitNetwork,
    in_path: &HashSet<StationCode>,
    from: StationCode,
    line: LineCode,
    direction: Direction,
) -> HashSet<StationCode> {
    let mut seen = HashSet::from([from]);
    let mut stack = vec![from];

    while let Some(node) = stack.pop() {
        for target in network.ride_targets(node, line, direction) {
            if in_path.contains(&target) && seen.insert(target) {
                stack.push(target);
            }
        }
    }

    seen
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sources::{AdjacencyRow, FixtureTopologySource, StationRow};
    use proptest::prelude::*;

    fn code_from_idx(i: usize) -> StationCode {
        StationCode::parse(&format!("A{:02}", i)).unwrap()
    }

    /// A single line threading `n` stations in order.
    fn line_network(n: usize) -> TransitNetwork {
        let line = LineCode::parse("RD").unwrap();
        let stations: Vec<StationRow> = (0..n)
            .map(|i| StationRow {
                code: code_from_idx(i),
                name: format!("Station {}", i),
                lat: 38.9,
                lon: -77.0,
            })
            .collect();
        let adjacency: Vec<AdjacencyRow> = (0..n)
            .map(|i| AdjacencyRow {
                line,
                circuit_id: 1,
                seq_num: i as u32,
                prev_station: i.checked_sub(1).map(code_from_idx),
                station: code_from_idx(i),
                next_station: (i + 1 < n).then(|| code_from_idx(i + 1)),
                track_num: 1,
            })
            .collect();
        TransitNetwork::build(&FixtureTopologySource::from_rows(adjacency, stations, vec![]))
            .unwrap()
    }

    proptest! {
        /// Any contiguous run along a single line is one forward leg.
        #[test]
        fn single_line_runs_are_one_leg(n in 2usize..12, start in 0usize..10, len in 2usize..12) {
            let start = start % (n - 1);
            let end = (start + len).min(n - 1);
            prop_assume!(end > start);

            let network = line_network(n);
            let segmenter = Segmenter::default();
            let stations: Vec<StationCode> = (start..=end).map(code_from_idx).collect();
            let path = Path::new(stations).unwrap();

            let legs = segmenter.segment(&network, &path).unwrap();
            prop_assert_eq!(legs.len(), 1);
            prop_assert_eq!(legs[0].from(), path.first());
            prop_assert_eq!(legs[0].to(), path.last());
        }

        /// Decomposition always partitions its path and is idempotent.
        #[test]
        fn partition_and_idempotence(n in 2usize..12, start in 0usize..10, len in 1usize..12) {
            let start = start % n;
            let end = (start + len).min(n - 1);

            let network = line_network(n);
            let segmenter = Segmenter::default();
            let stations: Vec<StationCode> = (start..=end).map(code_from_idx).collect();
            let path = Path::new(stations).unwrap();

            let first = segmenter.segment(&network, &path).unwrap();
            let second = segmenter.segment(&network, &path).unwrap();
            prop_assert_eq!(first.as_ref(), second.as_ref());

            if path.is_single_station() {
                prop_assert!(first.is_empty());
            } else {
                prop_assert_eq!(first[0].from(), path.first());
                prop_assert_eq!(first[first.len() - 1].to(), path.last());
                for pair in first.windows(2) {
                    prop_assert_eq!(pair[0].to(), pair[1].from());
                }
            }
        }
    }
}
