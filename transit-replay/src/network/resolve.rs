//! Station query resolution.

use std::collections::BTreeSet;

use crate::domain::StationCode;

use super::TransitNetwork;

impl TransitNetwork {
    /// Resolve a user query to a set of station codes.
    ///
    /// A query that parses as a code present in the network resolves to
    /// that code alone. Anything else resolves to every station whose
    /// display name equals the query; names are not unique, so a
    /// multi-platform interchange yields several codes.
    ///
    /// An empty set means no such station. Callers decide whether that
    /// is an error.
    pub fn resolve(&self, query: &str) -> BTreeSet<StationCode> {
        if let Ok(code) = StationCode::parse(query) {
            if self.contains(code) {
                return BTreeSet::from([code]);
            }
        }

        self.directed
            .node_weights()
            .filter(|s| s.name == query)
            .map(|s| s.code)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{AdjacencyRow, FixtureTopologySource, StationRow};
    use crate::domain::LineCode;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn station_row(c: &str, name: &str) -> StationRow {
        StationRow {
            code: code(c),
            name: name.to_string(),
            lat: 38.9,
            lon: -77.0,
        }
    }

    fn network() -> TransitNetwork {
        let source = FixtureTopologySource::from_rows(
            vec![AdjacencyRow {
                line: LineCode::parse("RD").unwrap(),
                circuit_id: 1,
                seq_num: 1,
                prev_station: None,
                station: code("A01"),
                next_station: Some(code("A02")),
                track_num: 1,
            }],
            vec![
                station_row("A01", "Metro Center"),
                station_row("C01", "Metro Center"),
                station_row("A02", "Farragut North"),
            ],
            vec![],
        );
        TransitNetwork::build(&source).unwrap()
    }

    #[test]
    fn code_query_resolves_to_singleton() {
        let network = network();
        let resolved = network.resolve("A01");
        assert_eq!(resolved, BTreeSet::from([code("A01")]));
    }

    #[test]
    fn name_query_resolves_to_all_matching_codes() {
        let network = network();
        let resolved = network.resolve("Metro Center");
        assert_eq!(resolved, BTreeSet::from([code("A01"), code("C01")]));
    }

    #[test]
    fn unknown_query_resolves_to_empty() {
        let network = network();
        assert!(network.resolve("Narnia").is_empty());
    }

    #[test]
    fn code_shaped_query_not_in_network_falls_back_to_names() {
        let network = network();
        // Parses as a code but is not a station; no name matches either
        assert!(network.resolve("Z99").is_empty());
    }

    #[test]
    fn name_match_is_exact() {
        let network = network();
        assert!(network.resolve("metro center").is_empty());
        assert!(network.resolve("Metro").is_empty());
    }
}
