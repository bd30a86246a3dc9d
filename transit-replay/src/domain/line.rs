//! Line code and travel direction types.

use std::fmt;

/// Error returned when parsing an invalid line code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line code: {reason}")]
pub struct InvalidLineCode {
    reason: &'static str,
}

/// A valid line code.
///
/// Line codes are 2 to 4 uppercase ASCII letters (e.g. `RD`, `YL`,
/// `GR`, `YLRP`). This type guarantees that any `LineCode` value is
/// valid by construction.
///
/// # Examples
///
/// ```
/// use transit_replay::domain::LineCode;
///
/// let red = LineCode::parse("RD").unwrap();
/// assert_eq!(red.as_str(), "RD");
///
/// assert!(LineCode::parse("rd").is_err());
/// assert!(LineCode::parse("R").is_err());
/// assert!(LineCode::parse("REDLINE").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCode {
    bytes: [u8; 4],
    len: u8,
}

impl LineCode {
    /// Route topology tags Yellow Line rush-hour short-turn service with
    /// its own code, but vehicle timing records only ever carry `YL`.
    pub const RUSH_PLUS: LineCode = LineCode {
        bytes: *b"YLRP",
        len: 4,
    };

    /// Parse a line code from a string.
    ///
    /// The input must be 2 to 4 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidLineCode> {
        let src = s.as_bytes();

        if src.len() < 2 || src.len() > 4 {
            return Err(InvalidLineCode {
                reason: "must be 2 to 4 characters",
            });
        }

        let mut bytes = [0u8; 4];
        for (i, &b) in src.iter().enumerate() {
            if !b.is_ascii_uppercase() {
                return Err(InvalidLineCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
            bytes[i] = b;
        }

        Ok(LineCode {
            bytes,
            len: src.len() as u8,
        })
    }

    /// Returns the line code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: we only store valid ASCII
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineCode({})", self.as_str())
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when converting an unknown direction number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction number: {number}")]
pub struct InvalidDirection {
    number: u8,
}

/// Direction of travel along a line.
///
/// Route topology encodes directions numerically: 1 for travel towards
/// the "next" station of an adjacency row, 2 for travel towards the
/// "prev" station. Conversions to and from the numeric tag are explicit
/// and fallible for unknown values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Convert from the numeric wire tag.
    pub fn from_number(number: u8) -> Result<Self, InvalidDirection> {
        match number {
            1 => Ok(Direction::Forward),
            2 => Ok(Direction::Backward),
            _ => Err(InvalidDirection { number }),
        }
    }

    /// Returns the numeric wire tag.
    pub fn number(&self) -> u8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => 2,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}
