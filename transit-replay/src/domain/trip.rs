//! Reconstructed trip records.
//!
//! A `TripRecord` is a synthetic end-to-end trip stitched from observed
//! per-vehicle movements. It caches its first departure and latest
//! arrival so duration queries never fail.

use chrono::{DateTime, Duration, Utc};

use super::StationCode;

/// One stop of a reconstructed trip.
///
/// The first stop has a departure only; the final stop has an arrival
/// only. `vehicle` identifies the vehicle boarded when departing this
/// stop, absent for transfers and for the final stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripStop {
    pub station: StationCode,
    pub arrival: Option<DateTime<Utc>>,
    pub departure: Option<DateTime<Utc>>,
    pub vehicle: Option<String>,
}

/// A synthetic end-to-end trip.
///
/// Built stop by stop as legs are joined; existing stops are never
/// rewritten except to record the departure that continues them.
///
/// # Invariants
///
/// - At least two stops (seeded from one observed hop).
/// - `departed_at` is the first stop's departure; `arrived_at` is the
///   final stop's arrival. Both are guaranteed present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    stops: Vec<TripStop>,
    departed_at: DateTime<Utc>,
    arrived_at: DateTime<Utc>,
}

impl TripRecord {
    /// Seed a trip from one observed hop.
    pub fn from_first_hop(
        from: StationCode,
        to: StationCode,
        vehicle: String,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Self {
        TripRecord {
            stops: vec![
                TripStop {
                    station: from,
                    arrival: None,
                    departure: Some(departure),
                    vehicle: Some(vehicle),
                },
                TripStop {
                    station: to,
                    arrival: Some(arrival),
                    departure: None,
                    vehicle: None,
                },
            ],
            departed_at: departure,
            arrived_at: arrival,
        }
    }

    /// Extend the trip by walking to an interchange platform.
    ///
    /// Departure from the current station is its arrival instant; the
    /// new station is reached `penalty` later.
    pub fn arrive_by_transfer(&mut self, to: StationCode, penalty: Duration) {
        let depart = self.arrived_at;
        if let Some(last) = self.stops.last_mut() {
            last.departure = Some(depart);
        }

        let arrival = depart + penalty;
        self.stops.push(TripStop {
            station: to,
            arrival: Some(arrival),
            departure: None,
            vehicle: None,
        });
        self.arrived_at = arrival;
    }

    /// Extend the trip by riding an observed hop.
    pub fn arrive_by_ride(
        &mut self,
        to: StationCode,
        vehicle: String,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) {
        if let Some(last) = self.stops.last_mut() {
            last.departure = Some(departure);
            last.vehicle = Some(vehicle);
        }

        self.stops.push(TripStop {
            station: to,
            arrival: Some(arrival),
            departure: None,
            vehicle: None,
        });
        self.arrived_at = arrival;
    }

    /// Returns the stops in order.
    pub fn stops(&self) -> &[TripStop] {
        &self.stops
    }

    /// Returns the arrival instant at the current final stop.
    pub fn current_arrival(&self) -> DateTime<Utc> {
        self.arrived_at
    }

    /// Returns the departure instant from the first stop.
    pub fn departed_at(&self) -> DateTime<Utc> {
        self.departed_at
    }

    /// Returns the end-to-end duration.
    pub fn total_time(&self) -> Duration {
        self.arrived_at - self.departed_at
    }
}
