//! Queryable model of the transit network.
//!
//! Two read-only views over the same stations, built once per analysis
//! session:
//!
//! - an undirected simple graph, used to discover candidate paths;
//! - a directed multigraph whose edges carry ride line/direction tags
//!   or transfer markers, used to decompose paths into legs.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::domain::{Direction, LineCode, Station, StationCode};
use crate::sources::SourceError;

mod build;
mod paths;
mod resolve;

/// Error raised while building or querying the network.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Route topology referenced a station with no metadata record.
    #[error("station {code} is referenced by route topology but has no station record")]
    TopologyIntegrity { code: StationCode },

    /// A station query resolved to nothing.
    #[error("no station matches query {query:?}")]
    NoSuchStation { query: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Payload of a directed network edge.
///
/// A transfer structurally carries no line or direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteLink {
    /// Ridden on a line, in one direction.
    Ride {
        line: LineCode,
        direction: Direction,
    },
    /// Walked between interchange platforms.
    Transfer,
}

/// The network model: stations plus the two graph views.
///
/// Read-only after construction; see [`TransitNetwork::build`].
pub struct TransitNetwork {
    undirected: UnGraph<Station, ()>,
    directed: DiGraph<Station, RouteLink>,
    un_index: HashMap<StationCode, NodeIndex>,
    di_index: HashMap<StationCode, NodeIndex>,
}

impl TransitNetwork {
    /// Look up a station by code.
    pub fn station(&self, code: StationCode) -> Option<&Station> {
        self.di_index
            .get(&code)
            .map(|&idx| &self.directed[idx])
    }

    /// Look up a station's display name by code.
    pub fn station_name(&self, code: StationCode) -> Option<&str> {
        self.station(code).map(|s| s.name.as_str())
    }

    /// Returns true if the network contains the station.
    pub fn contains(&self, code: StationCode) -> bool {
        self.di_index.contains_key(&code)
    }

    /// Returns the number of stations.
    pub fn station_count(&self) -> usize {
        self.directed.node_count()
    }

    /// All directed edges from `from` to `to`, parallel edges included.
    pub fn links_between(&self, from: StationCode, to: StationCode) -> Vec<&RouteLink> {
        match (self.di_index.get(&from), self.di_index.get(&to)) {
            (Some(&a), Some(&b)) => self
                .directed
                .edges_connecting(a, b)
                .map(|e| e.weight())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Stations reachable from `from` in one hop on `line` travelling
    /// `direction`.
    pub fn ride_targets(
        &self,
        from: StationCode,
        line: LineCode,
        direction: Direction,
    ) -> Vec<StationCode> {
        let Some(&idx) = self.di_index.get(&from) else {
            return Vec::new();
        };

        self.directed
            .edges(idx)
            .filter_map(|e| match e.weight() {
                RouteLink::Ride {
                    line: l,
                    direction: d,
                } if *l == line && *d == direction => Some(self.directed[e.target()].code),
                _ => None,
            })
            .collect()
    }
}
