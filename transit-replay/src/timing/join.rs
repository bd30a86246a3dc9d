//! Joining historical hop times onto leg sequences.

use tracing::debug;

use crate::domain::{Leg, LegKind, TripRecord};
use crate::sources::{HistoricalTransitSource, SourceError};

use super::JoinConfig;

/// Error raised while reconstructing trips.
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    /// A leg sequence cannot open with a platform walk; there is no
    /// arrival instant to anchor it to.
    #[error("leg sequence starts with a transfer")]
    StartsWithTransfer,

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Reconstructs end-to-end trips by replaying observed hops over a leg
/// sequence.
pub struct TripTimeJoiner<'a> {
    source: &'a dyn HistoricalTransitSource,
    config: JoinConfig,
}

impl<'a> TripTimeJoiner<'a> {
    pub fn new(source: &'a dyn HistoricalTransitSource, config: JoinConfig) -> Self {
        TripTimeJoiner { source, config }
    }

    /// Reconstruct every feasible trip over `legs`.
    ///
    /// The first ride leg seeds one candidate trip per observed hop.
    /// Each later ride leg continues a candidate on the earliest hop
    /// departing at or after the candidate's current arrival; a
    /// candidate with no such hop is abandoned. Transfers extend every
    /// candidate by the configured penalty. Trips lasting longer than
    /// the configured bound are discarded at the end.
    ///
    /// An empty leg sequence yields no trips.
    ///
    /// # Errors
    ///
    /// Returns `JoinError::StartsWithTransfer` if the first leg is a
    /// transfer, or a source error if hop times cannot be loaded.
    pub fn reconstruct(&self, legs: &[Leg]) -> Result<Vec<TripRecord>, JoinError> {
        let Some((first, rest)) = legs.split_first() else {
            return Ok(Vec::new());
        };

        let LegKind::Ride { direction, .. } = first.kind() else {
            return Err(JoinError::StartsWithTransfer);
        };

        let mut trips: Vec<TripRecord> = self
            .source
            .transit_times(first.from(), first.to(), *direction)?
            .into_iter()
            .map(|hop| {
                TripRecord::from_first_hop(
                    hop.from,
                    hop.to,
                    hop.vehicle_id,
                    hop.departure,
                    hop.arrival,
                )
            })
            .collect();

        for leg in rest {
            match leg.kind() {
                LegKind::Transfer => {
                    for trip in &mut trips {
                        trip.arrive_by_transfer(leg.to(), self.config.transfer_duration());
                    }
                }
                LegKind::Ride { direction, .. } => {
                    let hops = self.source.transit_times(leg.from(), leg.to(), *direction)?;

                    trips = trips
                        .into_iter()
                        .filter_map(|mut trip| {
                            let connection = hops
                                .iter()
                                .filter(|hop| hop.departure >= trip.current_arrival())
                                .min_by_key(|hop| hop.departure)?;

                            trip.arrive_by_ride(
                                connection.to,
                                connection.vehicle_id.clone(),
                                connection.departure,
                                connection.arrival,
                            );
                            Some(trip)
                        })
                        .collect();
                }
            }
        }

        let before = trips.len();
        trips.retain(|trip| trip.total_time() < self.config.max_trip_duration());
        if trips.len() < before {
            debug!(
                discarded = before - trips.len(),
                "discarded over-long reconstructed trips"
            );
        }

        Ok(trips)
    }
}
