//! Station identity and station records.

use std::fmt;

use super::DomainError;

/// Opaque identity of a station.
///
/// Lines and segments reference stations by identity only; the station
/// record itself is owned by the network registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u64);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named station.
///
/// # Examples
///
/// ```
/// use subway_server::domain::{Station, StationId};
///
/// let station = Station::new(StationId(1), "Dorimcheon").unwrap();
/// assert_eq!(station.name(), "Dorimcheon");
///
/// // Blank names are rejected
/// assert!(Station::new(StationId(2), "   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Create a station, trimming surrounding whitespace from the name.
    pub fn new(id: StationId, name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidName("station name must not be empty"));
        }
        Ok(Self {
            id,
            name: name.to_string(),
        })
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
