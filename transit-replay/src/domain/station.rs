//! Station code and station record types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid station code.
///
/// Station codes are 1 to 8 uppercase ASCII alphanumeric characters
/// (e.g. `A01`, `B03`, `C05`). This type guarantees that any
/// `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use transit_replay::domain::StationCode;
///
/// let mc = StationCode::parse("A01").unwrap();
/// assert_eq!(mc.as_str(), "A01");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("a01").is_err());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("A01B02C03").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationCode {
    bytes: [u8; 8],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1 to 8 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let src = s.as_bytes();

        if src.is_empty() || src.len() > 8 {
            return Err(InvalidStationCode {
                reason: "must be 1 to 8 characters",
            });
        }

        let mut bytes = [0u8; 8];
        for (i, &b) in src.iter().enumerate() {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
            bytes[i] = b;
        }

        Ok(StationCode {
            bytes,
            len: src.len() as u8,
        })
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: we only store valid ASCII
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station with its decorative metadata.
///
/// Names are human-readable and not unique: a physical interchange can
/// appear as several codes sharing one name (e.g. the two platforms of
/// a transfer station).
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}
