//! Domain error types.
//!
//! These errors represent validation failures and topology violations
//! in the domain layer. They are distinct from registry and HTTP errors.

use super::{InvalidDistance, StationId};

/// Domain-level errors for segment validation and path consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Non-positive distance
    #[error(transparent)]
    InvalidDistance(#[from] InvalidDistance),

    /// Up station and down station are the same
    #[error("invalid segment: up and down station are both {0}")]
    InvalidSegment(StationId),

    /// Both endpoints are already on the path
    #[error("segment {up} -> {down} is already connected on the line")]
    DuplicateSegment { up: StationId, down: StationId },

    /// Neither endpoint is on the path
    #[error("segment {up} -> {down} has no station in common with the line")]
    UnconnectableSegment { up: StationId, down: StationId },

    /// Interior insertion that does not fit inside the segment it splits
    #[error("distance {distance} must be shorter than the existing segment ({existing})")]
    DistanceTooLong { distance: i64, existing: i64 },

    /// Total line length would not fit in an `i64`
    #[error("line length would exceed {max} (current {current}, adding {distance})")]
    DistanceOverflow {
        current: i64,
        distance: i64,
        max: i64,
    },

    /// Station is not part of the path
    #[error("station {0} is not on the line")]
    StationNotOnLine(StationId),

    /// Segment is not a member of the set
    #[error("segment {up} -> {down} is not on the line")]
    SegmentNotOnLine { up: StationId, down: StationId },

    /// Detaching the segment would split the path in two
    #[error("segment {up} -> {down} is inside the path and cannot be detached")]
    InteriorSegment { up: StationId, down: StationId },

    /// Removal would leave the line without segments
    #[error("a line must keep at least one segment")]
    LastSegment,

    /// Empty station or line name, or empty line color
    #[error("invalid name: {0}")]
    InvalidName(&'static str),

    /// Internal invariant violation: the segments do not form a single path
    #[error("corrupt line topology: {0}")]
    CorruptTopology(&'static str),
}

impl DomainError {
    /// Returns true for internal consistency failures that no caller input
    /// can trigger.
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::CorruptTopology(_))
    }
}
