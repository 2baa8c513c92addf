//! Directed track segments.

use super::{Distance, DomainError, LineId, StationId};

/// A directed edge between two adjacent stations on a line.
///
/// # Invariants
///
/// - `up_station != down_station`
///
/// The `line` field is a non-owning back-reference: the owning
/// [`SegmentSet`](super::SegmentSet) holds the segment by value.
///
/// Equality is structural over line, both stations and distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    line: LineId,
    up_station: StationId,
    down_station: StationId,
    distance: Distance,
}

impl Segment {
    /// Creates a segment.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSegment`] if both stations are the same.
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_server::domain::{Distance, LineId, Segment, StationId};
    ///
    /// let d = Distance::new(30).unwrap();
    /// let seg = Segment::new(LineId(1), StationId(1), StationId(2), d).unwrap();
    /// assert_eq!(seg.stations(), [StationId(1), StationId(2)]);
    ///
    /// assert!(Segment::new(LineId(1), StationId(1), StationId(1), d).is_err());
    /// ```
    pub fn new(
        line: LineId,
        up_station: StationId,
        down_station: StationId,
        distance: Distance,
    ) -> Result<Self, DomainError> {
        if up_station == down_station {
            return Err(DomainError::InvalidSegment(up_station));
        }
        Ok(Self {
            line,
            up_station,
            down_station,
            distance,
        })
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    pub fn up_station(&self) -> StationId {
        self.up_station
    }

    pub fn down_station(&self) -> StationId {
        self.down_station
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns `[up_station, down_station]`.
    pub fn stations(&self) -> [StationId; 2] {
        [self.up_station, self.down_station]
    }

    /// Returns true if either endpoint is `station`.
    pub fn touches(&self, station: StationId) -> bool {
        self.up_station == station || self.down_station == station
    }

    /// Returns the same edge owned by another line.
    pub fn reassigned(self, line: LineId) -> Self {
        Self { line, ..self }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A segment from a station to itself is always rejected
        #[test]
        fn self_loop_rejected(station in any::<u64>(), d in 1i64..10_000) {
            let result = Segment::new(LineId(1), StationId(station), StationId(station), Distance::new(d).unwrap());
            prop_assert_eq!(result, Err(DomainError::InvalidSegment(StationId(station))));
        }

        /// Distinct stations always make a valid segment
        #[test]
        fn distinct_accepted(up in any::<u64>(), down in any::<u64>(), d in 1i64..10_000) {
            prop_assume!(up != down);
            let seg = Segment::new(LineId(1), StationId(up), StationId(down), Distance::new(d).unwrap()).unwrap();
            prop_assert_eq!(seg.stations(), [StationId(up), StationId(down)]);
        }
    }
}
