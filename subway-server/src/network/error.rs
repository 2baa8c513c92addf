//! Network registry error types.

use crate::domain::{DomainError, LineId, StationId};

/// Errors from operations on the station and line registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// No line with this id
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// No station with this id
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// A station or line with this name already exists
    #[error("name already in use: {0}")]
    DuplicateName(String),

    /// Station is still referenced by a line
    #[error("station {station} is still on line {line}")]
    StationInUse { station: StationId, line: LineId },

    /// Domain validation failed
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl NetworkError {
    /// Returns true for internal consistency failures.
    pub fn is_internal(&self) -> bool {
        matches!(self, NetworkError::Domain(e) if e.is_internal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            NetworkError::LineNotFound(LineId(10)).to_string(),
            "line 10 not found"
        );
        assert_eq!(
            NetworkError::StationNotFound(StationId(4)).to_string(),
            "station 4 not found"
        );
        assert_eq!(
            NetworkError::DuplicateName("Line 2".into()).to_string(),
            "name already in use: Line 2"
        );
        assert_eq!(
            NetworkError::StationInUse {
                station: StationId(1),
                line: LineId(2)
            }
            .to_string(),
            "station 1 is still on line 2"
        );
        assert_eq!(
            NetworkError::from(DomainError::LastSegment).to_string(),
            "a line must keep at least one segment"
        );
    }

    #[test]
    fn internal_only_for_corrupt_topology() {
        assert!(NetworkError::from(DomainError::CorruptTopology("cycle")).is_internal());
        assert!(!NetworkError::LineNotFound(LineId(1)).is_internal());
    }
}
