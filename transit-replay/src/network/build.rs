//! Network construction from the topology relations.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use tracing::debug;

use crate::domain::{Direction, LineCode, Station, StationCode};
use crate::sources::RouteTopologySource;

use super::{NetworkError, RouteLink, TransitNetwork};

fn lookup(
    index: &HashMap<StationCode, NodeIndex>,
    code: StationCode,
) -> Result<NodeIndex, NetworkError> {
    index
        .get(&code)
        .copied()
        .ok_or(NetworkError::TopologyIntegrity { code })
}

impl TransitNetwork {
    /// Build the network from a topology source.
    ///
    /// Every station code referenced by an adjacency or transfer row
    /// must have a metadata record; a dangling reference fails the
    /// whole build, so an undecorated node cannot exist.
    ///
    /// Repeated adjacency rows collapse: the undirected view is a
    /// simple graph, and the directed view keeps one edge per
    /// `(from, to, line, direction)`. Distinct lines over the same
    /// ordered pair stay as parallel edges.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::TopologyIntegrity` for a dangling station
    /// reference, or a source error if a relation cannot be loaded.
    pub fn build(source: &dyn RouteTopologySource) -> Result<Self, NetworkError> {
        let stations = source.station_names()?;
        let adjacency = source.neighboring_stations()?;
        let transfers = source.transfers()?;

        let mut undirected = UnGraph::default();
        let mut directed = DiGraph::default();
        let mut un_index = HashMap::with_capacity(stations.len());
        let mut di_index = HashMap::with_capacity(stations.len());

        for row in &stations {
            if un_index.contains_key(&row.code) {
                continue;
            }
            let station = Station {
                code: row.code,
                name: row.name.clone(),
                lat: row.lat,
                lon: row.lon,
            };
            un_index.insert(row.code, undirected.add_node(station.clone()));
            di_index.insert(row.code, directed.add_node(station));
        }

        let mut seen_rides: HashSet<(StationCode, StationCode, LineCode, Direction)> =
            HashSet::new();

        for row in &adjacency {
            let here_un = lookup(&un_index, row.station)?;
            let here_di = lookup(&di_index, row.station)?;

            if let Some(next) = row.next_station {
                let next_un = lookup(&un_index, next)?;
                let next_di = lookup(&di_index, next)?;

                undirected.update_edge(here_un, next_un, ());
                if seen_rides.insert((row.station, next, row.line, Direction::Forward)) {
                    directed.add_edge(
                        here_di,
                        next_di,
                        RouteLink::Ride {
                            line: row.line,
                            direction: Direction::Forward,
                        },
                    );
                }
            }

            if let Some(prev) = row.prev_station {
                let prev_di = lookup(&di_index, prev)?;

                if seen_rides.insert((row.station, prev, row.line, Direction::Backward)) {
                    directed.add_edge(
                        here_di,
                        prev_di,
                        RouteLink::Ride {
                            line: row.line,
                            direction: Direction::Backward,
                        },
                    );
                }
            }
        }

        let mut seen_transfers: HashSet<(StationCode, StationCode)> = HashSet::new();

        for row in &transfers {
            let a_un = lookup(&un_index, row.station_a)?;
            let b_un = lookup(&un_index, row.station_b)?;
            let a_di = lookup(&di_index, row.station_a)?;
            let b_di = lookup(&di_index, row.station_b)?;

            undirected.update_edge(a_un, b_un, ());
            if seen_transfers.insert((row.station_a, row.station_b)) {
                directed.add_edge(a_di, b_di, RouteLink::Transfer);
            }
            if seen_transfers.insert((row.station_b, row.station_a)) {
                directed.add_edge(b_di, a_di, RouteLink::Transfer);
            }
        }

        debug!(
            stations = directed.node_count(),
            undirected_edges = undirected.edge_count(),
            directed_edges = directed.edge_count(),
            "built transit network"
        );

        Ok(TransitNetwork {
            undirected,
            directed,
            un_index,
            di_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{AdjacencyRow, FixtureTopologySource, StationRow, TransferRow};

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn line(s: &str) -> LineCode {
        LineCode::parse(s).unwrap()
    }

    fn station_row(c: &str, name: &str) -> StationRow {
        StationRow {
            code: code(c),
            name: name.to_string(),
            lat: 38.9,
            lon: -77.0,
        }
    }

    fn adj(l: &str, seq: u32, prev: Option<&str>, here: &str, next: Option<&str>) -> AdjacencyRow {
        AdjacencyRow {
            line: line(l),
            circuit_id: 1,
            seq_num: seq,
            prev_station: prev.map(code),
            station: code(here),
            next_station: next.map(code),
            track_num: 1,
        }
    }

    fn sample_source() -> FixtureTopologySource {
        FixtureTopologySource::from_rows(
            vec![
                adj("RD", 1, None, "A01", Some("A02")),
                adj("RD", 2, Some("A01"), "A02", Some("A03")),
                adj("RD", 3, Some("A02"), "A03", None),
                adj("GR", 1, None, "C01", Some("C02")),
                adj("GR", 2, Some("C01"), "C02", None),
            ],
            vec![
                station_row("A01", "Metro Center"),
                station_row("A02", "Farragut North"),
                station_row("A03", "Dupont Circle"),
                station_row("C01", "Metro Center"),
                station_row("C02", "McPherson Square"),
            ],
            vec![TransferRow {
                station_a: code("A01"),
                station_b: code("C01"),
            }],
        )
    }

    #[test]
    fn builds_decorated_stations() {
        let network = TransitNetwork::build(&sample_source()).unwrap();

        assert_eq!(network.station_count(), 5);
        assert!(network.contains(code("A01")));
        assert_eq!(network.station_name(code("A02")), Some("Farragut North"));
        assert_eq!(network.station_name(code("Z99")), None);
    }

    #[test]
    fn directed_edges_carry_line_and_direction() {
        let network = TransitNetwork::build(&sample_source()).unwrap();

        let forward = network.links_between(code("A01"), code("A02"));
        assert_eq!(
            forward,
            vec![&RouteLink::Ride {
                line: line("RD"),
                direction: Direction::Forward,
            }]
        );

        let backward = network.links_between(code("A02"), code("A01"));
        assert_eq!(
            backward,
            vec![&RouteLink::Ride {
                line: line("RD"),
                direction: Direction::Backward,
            }]
        );
    }

    #[test]
    fn transfer_edges_in_both_directions() {
        let network = TransitNetwork::build(&sample_source()).unwrap();

        assert_eq!(
            network.links_between(code("A01"), code("C01")),
            vec![&RouteLink::Transfer]
        );
        assert_eq!(
            network.links_between(code("C01"), code("A01")),
            vec![&RouteLink::Transfer]
        );
    }

    #[test]
    fn duplicate_adjacency_rows_collapse() {
        let source = FixtureTopologySource::from_rows(
            vec![
                adj("RD", 1, None, "A01", Some("A02")),
                // Same hop again, e.g. from the other track's sequence
                adj("RD", 5, None, "A01", Some("A02")),
            ],
            vec![station_row("A01", "Metro Center"), station_row("A02", "Farragut North")],
            vec![],
        );
        let network = TransitNetwork::build(&source).unwrap();

        assert_eq!(network.links_between(code("A01"), code("A02")).len(), 1);
    }

    #[test]
    fn distinct_lines_stay_parallel() {
        let source = FixtureTopologySource::from_rows(
            vec![
                adj("RD", 1, None, "A01", Some("A02")),
                adj("YL", 1, None, "A01", Some("A02")),
            ],
            vec![station_row("A01", "Metro Center"), station_row("A02", "Farragut North")],
            vec![],
        );
        let network = TransitNetwork::build(&source).unwrap();

        let links = network.links_between(code("A01"), code("A02"));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn dangling_adjacency_reference_fails_build() {
        let source = FixtureTopologySource::from_rows(
            vec![adj("RD", 1, None, "A01", Some("A99"))],
            vec![station_row("A01", "Metro Center")],
            vec![],
        );

        let result = TransitNetwork::build(&source);
        assert!(matches!(
            result,
            Err(NetworkError::TopologyIntegrity { code: c }) if c == code("A99")
        ));
    }

    #[test]
    fn dangling_transfer_reference_fails_build() {
        let source = FixtureTopologySource::from_rows(
            vec![],
            vec![station_row("A01", "Metro Center")],
            vec![TransferRow {
                station_a: code("A01"),
                station_b: code("C99"),
            }],
        );

        let result = TransitNetwork::build(&source);
        assert!(matches!(
            result,
            Err(NetworkError::TopologyIntegrity { code: c }) if c == code("C99")
        ));
    }

    #[test]
    fn ride_targets_filter_by_line_and_direction() {
        let network = TransitNetwork::build(&sample_source()).unwrap();

        assert_eq!(
            network.ride_targets(code("A01"), line("RD"), Direction::Forward),
            vec![code("A02")]
        );
        assert!(
            network
                .ride_targets(code("A01"), line("GR"), Direction::Forward)
                .is_empty()
        );
        assert!(
            network
                .ride_targets(code("A01"), line("RD"), Direction::Backward)
                .is_empty()
        );
    }
}
