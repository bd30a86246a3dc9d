//! Abstract read interfaces to route topology and historical movements.
//!
//! The reconstruction core is agnostic to the backing store. Collaborators
//! implement these traits over whatever holds the data (a relational
//! store, an API snapshot, JSON fixtures); the core only sees rows.

use chrono::{DateTime, Utc};

use crate::domain::{Direction, LineCode, StationCode};

pub mod fixture;

pub use fixture::{FixtureHistorySource, FixtureTopologySource};

/// Error raised by a data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read source data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse source data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid row in source data: {reason}")]
    InvalidRow { reason: String },
}

/// One row of the per-line station ordering.
///
/// Rows come from an ordered per-(line, track) sequence; `prev_station`
/// and `next_station` are the neighbours in that sequence, absent at
/// the ends of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyRow {
    pub line: LineCode,
    pub circuit_id: u32,
    pub seq_num: u32,
    pub prev_station: Option<StationCode>,
    pub station: StationCode,
    pub next_station: Option<StationCode>,
    pub track_num: u8,
}

/// One station metadata record.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRow {
    pub code: StationCode,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// One unordered pair of stations connected by an in-system walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRow {
    pub station_a: StationCode,
    pub station_b: StationCode,
}

/// One observed per-vehicle movement over a straight-shot hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopRow {
    pub from: StationCode,
    pub to: StationCode,
    pub vehicle_id: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

/// Read access to the route topology relations.
pub trait RouteTopologySource {
    /// The per-line station ordering, unpivoted to adjacency rows.
    fn neighboring_stations(&self) -> Result<Vec<AdjacencyRow>, SourceError>;

    /// Station metadata: code, display name, coordinates.
    fn station_names(&self) -> Result<Vec<StationRow>, SourceError>;

    /// Station pairs connected by an in-system walk.
    fn transfers(&self) -> Result<Vec<TransferRow>, SourceError>;
}

/// Read access to historical per-vehicle movements.
pub trait HistoricalTransitSource {
    /// Observed movements from `from` to `to` travelling `direction`.
    ///
    /// Each row is one vehicle's departure and arrival for that hop.
    /// An unobserved hop is an empty result, not an error.
    fn transit_times(
        &self,
        from: StationCode,
        to: StationCode,
        direction: Direction,
    ) -> Result<Vec<HopRow>, SourceError>;
}
