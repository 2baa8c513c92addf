//! Subway lines.
//!
//! A `Line` owns its [`SegmentSet`] exclusively and adds the line-level
//! rules the set itself does not enforce, most importantly that a line
//! always keeps at least one segment.

use std::fmt;

use tracing::debug;

use super::{Distance, DomainError, Segment, SegmentSet, StationId};

/// Opaque identity of a line.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u64);

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subway line: a name, a color and a single path of segments.
///
/// # Invariants
///
/// - Name and color are non-empty
/// - At least one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    name: String,
    color: String,
    segments: SegmentSet,
}

impl Line {
    /// Creates a line with its initial segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_server::domain::{Distance, Line, LineId, StationId};
    ///
    /// let line = Line::new(
    ///     LineId(2),
    ///     "Line 2",
    ///     "green",
    ///     StationId(1),
    ///     StationId(2),
    ///     Distance::new(30).unwrap(),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(line.total_distance(), 30);
    /// ```
    pub fn new(
        id: LineId,
        name: &str,
        color: &str,
        up_station: StationId,
        down_station: StationId,
        distance: Distance,
    ) -> Result<Self, DomainError> {
        let (name, color) = validate_labels(name, color)?;
        let initial = Segment::new(id, up_station, down_station, distance)?;
        let mut segments = SegmentSet::new();
        segments.add_segment(initial)?;
        Ok(Self {
            id,
            name,
            color,
            segments,
        })
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn segments(&self) -> &SegmentSet {
        &self.segments
    }

    /// Rename and recolor the line.
    pub fn update(&mut self, name: &str, color: &str) -> Result<(), DomainError> {
        let (name, color) = validate_labels(name, color)?;
        self.name = name;
        self.color = color;
        Ok(())
    }

    /// Register a new segment on this line.
    pub fn add_segment(
        &mut self,
        up_station: StationId,
        down_station: StationId,
        distance: Distance,
    ) -> Result<Segment, DomainError> {
        let segment = Segment::new(self.id, up_station, down_station, distance)?;
        self.segments.add_segment(segment)?;
        debug!(line = %self.id, up = %up_station, down = %down_station, "segment added");
        Ok(segment)
    }

    /// Drop a station from this line, refusing to remove the last segment.
    pub fn remove_station(&mut self, station: StationId) -> Result<(), DomainError> {
        if !self.segments.contains_station(station) {
            return Err(DomainError::StationNotOnLine(station));
        }
        if self.segments.len() <= 1 {
            return Err(DomainError::LastSegment);
        }
        self.segments.remove_station(station)?;
        debug!(line = %self.id, %station, "station removed");
        Ok(())
    }

    /// Move a terminus segment from this line to `target`.
    ///
    /// Nothing changes on either line if the move is rejected.
    pub fn transfer_segment(
        &mut self,
        target: &mut Line,
        segment: &Segment,
    ) -> Result<(), DomainError> {
        if self.segments.len() <= 1 {
            return Err(DomainError::LastSegment);
        }
        let mut remaining = self.segments.clone();
        let detached = remaining.detach(segment)?;
        target.segments.attach(detached.reassigned(target.id))?;
        self.segments = remaining;
        debug!(
            from = %self.id,
            to = %target.id,
            up = %segment.up_station(),
            down = %segment.down_station(),
            "segment transferred"
        );
        Ok(())
    }

    /// Stations in path order.
    pub fn ordered_stations(&self) -> Result<Vec<StationId>, DomainError> {
        self.segments.ordered_stations()
    }

    /// Total length of the line.
    pub fn total_distance(&self) -> i64 {
        self.segments.total_distance()
    }

    pub fn contains_station(&self, station: StationId) -> bool {
        self.segments.contains_station(station)
    }
}

fn validate_labels(name: &str, color: &str) -> Result<(String, String), DomainError> {
    let name = name.trim();
    let color = color.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidName("line name must not be empty"));
    }
    if color.is_empty() {
        return Err(DomainError::InvalidName("line color must not be empty"));
    }
    Ok((name.to_string(), color.to_string()))
}
