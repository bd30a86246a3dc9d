//! Trip leg types.
//!
//! A leg is one segment of a decomposed path: either a straight shot
//! ridden on a single vehicle, or a walk between the platforms of an
//! interchange. The two cases carry different data, so the distinction
//! is structural: a transfer cannot carry a line or direction.

use std::collections::BTreeSet;

use super::{Direction, LineCode, StationCode};

/// What kind of movement a leg is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegKind {
    /// Ridden on a vehicle, without changing, in one direction.
    ///
    /// `lines` is the set of line codes serving the whole leg; a rider
    /// can board a vehicle of any of them.
    Ride {
        direction: Direction,
        lines: BTreeSet<LineCode>,
    },
    /// Walked between the platforms of an interchange.
    Transfer,
}

/// One segment of a decomposed path.
///
/// A leg decomposition partitions its path: legs are contiguous,
/// non-overlapping, and jointly span the path end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    from: StationCode,
    to: StationCode,
    kind: LegKind,
}

impl Leg {
    /// Construct a ride leg.
    pub fn ride(
        from: StationCode,
        to: StationCode,
        direction: Direction,
        lines: BTreeSet<LineCode>,
    ) -> Self {
        Leg {
            from,
            to,
            kind: LegKind::Ride { direction, lines },
        }
    }

    /// Construct a transfer leg.
    pub fn transfer(from: StationCode, to: StationCode) -> Self {
        Leg {
            from,
            to,
            kind: LegKind::Transfer,
        }
    }

    /// Returns the departure station.
    pub fn from(&self) -> StationCode {
        self.from
    }

    /// Returns the arrival station.
    pub fn to(&self) -> StationCode {
        self.to
    }

    /// Returns the kind of movement.
    pub fn kind(&self) -> &LegKind {
        &self.kind
    }

    /// Returns true if this leg is a transfer.
    pub fn is_transfer(&self) -> bool {
        matches!(self.kind, LegKind::Transfer)
    }
}
