//! Domain types for trip-time reconstruction.
//!
//! This module contains the core domain model types that represent
//! validated transit data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod leg;
mod line;
mod path;
mod station;
mod trip;

pub use leg::{Leg, LegKind};
pub use line::{Direction, InvalidDirection, InvalidLineCode, LineCode};
pub use path::{InvalidPath, Path};
pub use station::{InvalidStationCode, Station, StationCode};
pub use trip::{TripRecord, TripStop};
