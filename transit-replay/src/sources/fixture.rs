//! Fixture-backed sources for testing and offline runs.
//!
//! Loads the topology relations and the historical hop series from
//! JSON files in a fixture directory and serves them as if they came
//! from a live store. In-memory constructors are provided for tests.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Direction, LineCode, StationCode};

use super::{
    AdjacencyRow, HistoricalTransitSource, HopRow, RouteTopologySource, SourceError, StationRow,
    TransferRow,
};

/// File names expected in a fixture directory.
const NEIGHBORING_STATIONS_FILE: &str = "neighboring_stations.json";
const STATION_NAMES_FILE: &str = "station_names.json";
const TRANSFER_STATIONS_FILE: &str = "transfer_stations.json";
const TRANSIT_TIMES_FILE: &str = "transit_times.json";

#[derive(Debug, Deserialize)]
struct RawAdjacencyRow {
    line_code: String,
    circuit_id: u32,
    seq_num: u32,
    prev_station_code: Option<String>,
    station_code: String,
    next_station_code: Option<String>,
    track_num: u8,
}

#[derive(Debug, Deserialize)]
struct RawStationRow {
    station_code: String,
    station_name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct RawTransferRow {
    station_code_a: String,
    station_code_b: String,
}

#[derive(Debug, Deserialize)]
struct RawHopRow {
    station_code: String,
    next_station_code: String,
    direction_num: u8,
    vehicle_id: String,
    departure: String,
    arrival: String,
}

fn parse_station(s: &str) -> Result<StationCode, SourceError> {
    StationCode::parse(s).map_err(|e| SourceError::InvalidRow {
        reason: format!("station code {:?}: {}", s, e),
    })
}

fn parse_line(s: &str) -> Result<LineCode, SourceError> {
    LineCode::parse(s).map_err(|e| SourceError::InvalidRow {
        reason: format!("line code {:?}: {}", s, e),
    })
}

fn parse_direction(n: u8) -> Result<Direction, SourceError> {
    Direction::from_number(n).map_err(|e| SourceError::InvalidRow {
        reason: e.to_string(),
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, SourceError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| SourceError::InvalidRow {
            reason: format!("timestamp {:?}: {}", s, e),
        })
}

fn load_json<T: serde::de::DeserializeOwned>(dir: &Path, file: &str) -> Result<T, SourceError> {
    let text = std::fs::read_to_string(dir.join(file))?;
    Ok(serde_json::from_str(&text)?)
}

/// Topology source backed by JSON files or in-memory rows.
#[derive(Debug, Clone)]
pub struct FixtureTopologySource {
    adjacency: Vec<AdjacencyRow>,
    stations: Vec<StationRow>,
    transfers: Vec<TransferRow>,
}

impl FixtureTopologySource {
    /// Load the three topology relations from a fixture directory.
    ///
    /// Expects `neighboring_stations.json`, `station_names.json` and
    /// `transfer_stations.json`, each an array of rows.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref();

        let raw_adjacency: Vec<RawAdjacencyRow> = load_json(dir, NEIGHBORING_STATIONS_FILE)?;
        let raw_stations: Vec<RawStationRow> = load_json(dir, STATION_NAMES_FILE)?;
        let raw_transfers: Vec<RawTransferRow> = load_json(dir, TRANSFER_STATIONS_FILE)?;

        let adjacency = raw_adjacency
            .into_iter()
            .map(|r| {
                Ok(AdjacencyRow {
                    line: parse_line(&r.line_code)?,
                    circuit_id: r.circuit_id,
                    seq_num: r.seq_num,
                    prev_station: r.prev_station_code.as_deref().map(parse_station).transpose()?,
                    station: parse_station(&r.station_code)?,
                    next_station: r.next_station_code.as_deref().map(parse_station).transpose()?,
                    track_num: r.track_num,
                })
            })
            .collect::<Result<Vec<_>, SourceError>>()?;

        let stations = raw_stations
            .into_iter()
            .map(|r| {
                Ok(StationRow {
                    code: parse_station(&r.station_code)?,
                    name: r.station_name,
                    lat: r.lat,
                    lon: r.lon,
                })
            })
            .collect::<Result<Vec<_>, SourceError>>()?;

        let transfers = raw_transfers
            .into_iter()
            .map(|r| {
                Ok(TransferRow {
                    station_a: parse_station(&r.station_code_a)?,
                    station_b: parse_station(&r.station_code_b)?,
                })
            })
            .collect::<Result<Vec<_>, SourceError>>()?;

        Ok(Self {
            adjacency,
            stations,
            transfers,
        })
    }

    /// Build a source from in-memory rows.
    pub fn from_rows(
        adjacency: Vec<AdjacencyRow>,
        stations: Vec<StationRow>,
        transfers: Vec<TransferRow>,
    ) -> Self {
        Self {
            adjacency,
            stations,
            transfers,
        }
    }
}

impl RouteTopologySource for FixtureTopologySource {
    fn neighboring_stations(&self) -> Result<Vec<AdjacencyRow>, SourceError> {
        Ok(self.adjacency.clone())
    }

    fn station_names(&self) -> Result<Vec<StationRow>, SourceError> {
        Ok(self.stations.clone())
    }

    fn transfers(&self) -> Result<Vec<TransferRow>, SourceError> {
        Ok(self.transfers.clone())
    }
}

/// Historical source backed by JSON files or in-memory hops.
///
/// Hop lookups are keyed by `(from, to, direction)`.
#[derive(Debug, Clone)]
pub struct FixtureHistorySource {
    hops: Vec<(Direction, HopRow)>,
}

impl FixtureHistorySource {
    /// Load the hop series from a fixture directory.
    ///
    /// Expects `transit_times.json`, an array of observed movements
    /// with RFC 3339 timestamps.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let raw: Vec<RawHopRow> = load_json(dir.as_ref(), TRANSIT_TIMES_FILE)?;

        let hops = raw
            .into_iter()
            .map(|r| {
                Ok((
                    parse_direction(r.direction_num)?,
                    HopRow {
                        from: parse_station(&r.station_code)?,
                        to: parse_station(&r.next_station_code)?,
                        vehicle_id: r.vehicle_id,
                        departure: parse_timestamp(&r.departure)?,
                        arrival: parse_timestamp(&r.arrival)?,
                    },
                ))
            })
            .collect::<Result<Vec<_>, SourceError>>()?;

        Ok(Self { hops })
    }

    /// Build a source from in-memory hops.
    pub fn from_hops(hops: Vec<(Direction, HopRow)>) -> Self {
        Self { hops }
    }
}

impl HistoricalTransitSource for FixtureHistorySource {
    fn transit_times(
        &self,
        from: StationCode,
        to: StationCode,
        direction: Direction,
    ) -> Result<Vec<HopRow>, SourceError> {
        Ok(self
            .hops
            .iter()
            .filter(|(d, h)| *d == direction && h.from == from && h.to == to)
            .map(|(_, h)| h.clone())
            .collect())
    }
}
