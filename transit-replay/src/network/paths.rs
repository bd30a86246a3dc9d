//! Candidate path enumeration.

use std::collections::BTreeSet;

use petgraph::algo::all_simple_paths;
use petgraph::graph::NodeIndex;

use crate::domain::Path;

use super::{NetworkError, TransitNetwork};

impl TransitNetwork {
    /// Enumerate all simple paths between two station queries.
    ///
    /// Both queries are resolved first (see [`TransitNetwork::resolve`]);
    /// a query resolving to nothing is an error. Paths are collected
    /// over every (source, target) pair of the resolved sets, compared
    /// as ordered code sequences, and returned deduplicated in sorted
    /// order.
    ///
    /// Finding no path at all is a valid empty result. No length bound
    /// is applied here; pruning is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::NoSuchStation` if either query resolves
    /// to zero stations.
    pub fn paths_between(
        &self,
        from_query: &str,
        to_query: &str,
    ) -> Result<Vec<Path>, NetworkError> {
        let sources = self.resolve(from_query);
        if sources.is_empty() {
            return Err(NetworkError::NoSuchStation {
                query: from_query.to_string(),
            });
        }

        let targets = self.resolve(to_query);
        if targets.is_empty() {
            return Err(NetworkError::NoSuchStation {
                query: to_query.to_string(),
            });
        }

        let mut paths = BTreeSet::new();
        for &src in &sources {
            for &dst in &targets {
                if src == dst {
                    continue;
                }

                // Resolved codes always index into the graph
                let s = self.un_index[&src];
                let t = self.un_index[&dst];

                for nodes in all_simple_paths::<Vec<NodeIndex>, _>(&self.undirected, s, t, 0, None)
                {
                    let codes = nodes.iter().map(|&n| self.undirected[n].code).collect();
                    let path =
                        Path::new(codes).expect("simple paths are non-empty and repeat-free");
                    paths.insert(path);
                }
            }
        }

        Ok(paths.into_iter().collect())
    }
}
