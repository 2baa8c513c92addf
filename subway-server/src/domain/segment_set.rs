//! The set of segments making up one line.
//!
//! Segments are stored unordered. Together they must always form a single
//! simple directed path: one up-terminus, one down-terminus, no branches,
//! no cycles. The summed length of all segments always fits in an `i64`.
//! Every mutation validates against the current path before it
//! touches the collection, so a failed call leaves the set unchanged.

use std::collections::{HashMap, HashSet};

use tracing::{debug, error, trace};

use super::{DomainError, Segment, StationId};

/// All segments belonging to one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentSet {
    segments: Vec<Segment>,
}

impl SegmentSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment to the path.
    ///
    /// - Empty set, or the segment extends the path at a terminus: appended.
    /// - Both endpoints already on the path: [`DomainError::DuplicateSegment`].
    /// - Neither endpoint on the path: [`DomainError::UnconnectableSegment`].
    /// - Exactly one endpoint strictly inside the path: the overlapping
    ///   segment is split around the new station, keeping the total length.
    ///   The new distance must be shorter than the segment it splits
    ///   ([`DomainError::DistanceTooLong`]).
    ///
    /// Appending a segment that would push the total length past `i64::MAX`
    /// fails with [`DomainError::DistanceOverflow`].
    pub fn add_segment(&mut self, segment: Segment) -> Result<(), DomainError> {
        let stations = self.ordered_stations()?;
        let (Some(&up_terminus), Some(&down_terminus)) = (stations.first(), stations.last())
        else {
            debug!(up = %segment.up_station(), down = %segment.down_station(), "first segment");
            self.segments.push(segment);
            return Ok(());
        };

        let has_up = stations.contains(&segment.up_station());
        let has_down = stations.contains(&segment.down_station());

        if has_up && has_down {
            return Err(DomainError::DuplicateSegment {
                up: segment.up_station(),
                down: segment.down_station(),
            });
        }
        if !has_up && !has_down {
            return Err(DomainError::UnconnectableSegment {
                up: segment.up_station(),
                down: segment.down_station(),
            });
        }

        if segment.down_station() == up_terminus || segment.up_station() == down_terminus {
            self.ensure_room_for(&segment)?;
            debug!(
                up = %segment.up_station(),
                down = %segment.down_station(),
                distance = %segment.distance(),
                "extending path at terminus"
            );
            self.segments.push(segment);
            return Ok(());
        }

        self.split_interior(segment)
    }

    /// Reject an append whose distance would overflow the total length.
    fn ensure_room_for(&self, segment: &Segment) -> Result<(), DomainError> {
        let current = self.total_distance();
        let distance = segment.distance().get();
        match current.checked_add(distance) {
            Some(_) => Ok(()),
            None => Err(DomainError::DistanceOverflow {
                current,
                distance,
                max: i64::MAX,
            }),
        }
    }

    /// Insert a segment with exactly one endpoint inside the path by
    /// splitting the segment it overlaps.
    fn split_interior(&mut self, segment: Segment) -> Result<(), DomainError> {
        let shares_up = self
            .segments
            .iter()
            .position(|s| s.up_station() == segment.up_station());
        let shares_down = self
            .segments
            .iter()
            .position(|s| s.down_station() == segment.down_station());

        let (idx, replacement, remainder) = match (shares_up, shares_down) {
            // A->B becomes A->N (new), N->B (rest)
            (Some(idx), _) => {
                let existing = self.segments[idx];
                let rest = remaining_distance(&existing, &segment)?;
                let tail = Segment::new(
                    existing.line(),
                    segment.down_station(),
                    existing.down_station(),
                    rest,
                )?;
                (idx, segment, tail)
            }
            // A->B becomes A->N (rest), N->B (new)
            (None, Some(idx)) => {
                let existing = self.segments[idx];
                let rest = remaining_distance(&existing, &segment)?;
                let head = Segment::new(
                    existing.line(),
                    existing.up_station(),
                    segment.up_station(),
                    rest,
                )?;
                (idx, head, segment)
            }
            (None, None) => {
                error!(
                    up = %segment.up_station(),
                    down = %segment.down_station(),
                    "path station has no adjacent segment"
                );
                return Err(DomainError::CorruptTopology(
                    "path station has no adjacent segment",
                ));
            }
        };

        debug!(
            split = ?self.segments[idx].stations(),
            into = ?[replacement.stations(), remainder.stations()],
            "splitting segment for interior insertion"
        );
        self.segments[idx] = replacement;
        self.segments.push(remainder);
        Ok(())
    }

    /// Remove a segment by structural equality.
    ///
    /// Returns the removed segment, or `None` if it was not a member.
    /// No minimum-size rule is applied here.
    pub fn remove_segment(&mut self, segment: &Segment) -> Option<Segment> {
        let idx = self.segments.iter().position(|s| s == segment)?;
        debug!(up = %segment.up_station(), down = %segment.down_station(), "removing segment");
        Some(self.segments.remove(idx))
    }

    /// Detach a terminus segment so it can be attached to another set.
    ///
    /// Only a segment at either end of the path can be detached; removing an
    /// interior segment would leave two disconnected pieces.
    pub fn detach(&mut self, segment: &Segment) -> Result<Segment, DomainError> {
        if !self.segments.contains(segment) {
            return Err(DomainError::SegmentNotOnLine {
                up: segment.up_station(),
                down: segment.down_station(),
            });
        }
        let at_end = self.up_terminus() == Some(segment.up_station())
            || self.down_terminus() == Some(segment.down_station());
        if !at_end {
            return Err(DomainError::InteriorSegment {
                up: segment.up_station(),
                down: segment.down_station(),
            });
        }
        self.remove_segment(segment).ok_or(DomainError::SegmentNotOnLine {
            up: segment.up_station(),
            down: segment.down_station(),
        })
    }

    /// Attach a segment detached from another set.
    ///
    /// Validation is the same as [`add_segment`](Self::add_segment).
    pub fn attach(&mut self, segment: Segment) -> Result<(), DomainError> {
        self.add_segment(segment)
    }

    /// Drop a station from the path.
    ///
    /// A terminus loses its single segment. An interior station's two
    /// segments are merged into one spanning both, with the summed distance.
    pub fn remove_station(&mut self, station: StationId) -> Result<(), DomainError> {
        let incoming = self
            .segments
            .iter()
            .position(|s| s.down_station() == station);
        let outgoing = self.segments.iter().position(|s| s.up_station() == station);

        match (incoming, outgoing) {
            (None, None) => Err(DomainError::StationNotOnLine(station)),
            (Some(idx), None) | (None, Some(idx)) => {
                debug!(%station, "removing terminus station");
                self.segments.remove(idx);
                Ok(())
            }
            (Some(inc), Some(out)) => {
                let before = self.segments[inc];
                let after = self.segments[out];
                let distance = before.distance().checked_add(after.distance()).ok_or(
                    DomainError::DistanceOverflow {
                        current: before.distance().get(),
                        distance: after.distance().get(),
                        max: i64::MAX,
                    },
                )?;
                let merged = Segment::new(
                    before.line(),
                    before.up_station(),
                    after.down_station(),
                    distance,
                )?;
                debug!(
                    %station,
                    up = %merged.up_station(),
                    down = %merged.down_station(),
                    distance = %merged.distance(),
                    "merging segments around removed station"
                );
                // Remove the higher index first so the lower one stays valid.
                self.segments.remove(inc.max(out));
                self.segments.remove(inc.min(out));
                self.segments.push(merged);
                Ok(())
            }
        }
    }

    /// Returns the segments in path order, from the up-terminus down.
    ///
    /// An empty set gives an empty vector.
    ///
    /// # Errors
    ///
    /// [`DomainError::CorruptTopology`] if the segments do not form exactly
    /// one simple path.
    pub fn ordered_segments(&self) -> Result<Vec<&Segment>, DomainError> {
        if self.segments.is_empty() {
            return Ok(Vec::new());
        }

        let first = self.up_terminus_segment()?;

        let mut by_up: HashMap<StationId, &Segment> = HashMap::with_capacity(self.segments.len());
        for segment in &self.segments {
            if by_up.insert(segment.up_station(), segment).is_some() {
                return Err(corrupt("station has more than one outgoing segment"));
            }
        }

        let mut visited: HashSet<StationId> = HashSet::with_capacity(self.segments.len() + 1);
        visited.insert(first.up_station());
        visited.insert(first.down_station());

        let mut ordered = Vec::with_capacity(self.segments.len());
        ordered.push(first);

        let mut current = first;
        while let Some(&next) = by_up.get(&current.down_station()) {
            if !visited.insert(next.down_station()) {
                return Err(corrupt("path revisits a station"));
            }
            trace!(up = %next.up_station(), down = %next.down_station(), "path step");
            ordered.push(next);
            current = next;
        }

        if ordered.len() != self.segments.len() {
            return Err(corrupt("segments are not all connected"));
        }

        Ok(ordered)
    }

    /// Returns the stations in path order, each exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_server::domain::{Distance, LineId, Segment, SegmentSet, StationId};
    ///
    /// let seg = |up, down| {
    ///     Segment::new(LineId(1), StationId(up), StationId(down), Distance::new(5).unwrap()).unwrap()
    /// };
    ///
    /// let mut set = SegmentSet::new();
    /// set.add_segment(seg(2, 3)).unwrap();
    /// set.add_segment(seg(1, 2)).unwrap();
    /// set.add_segment(seg(3, 4)).unwrap();
    ///
    /// let ids: Vec<u64> = set.ordered_stations().unwrap().iter().map(|s| s.0).collect();
    /// assert_eq!(ids, vec![1, 2, 3, 4]);
    /// assert_eq!(set.total_distance(), 15);
    /// ```
    pub fn ordered_stations(&self) -> Result<Vec<StationId>, DomainError> {
        let ordered = self.ordered_segments()?;
        let Some(first) = ordered.first() else {
            return Ok(Vec::new());
        };
        let mut stations = Vec::with_capacity(ordered.len() + 1);
        stations.push(first.up_station());
        stations.extend(ordered.iter().map(|s| s.down_station()));
        Ok(stations)
    }

    /// Find the unique segment whose up station is no segment's down station.
    fn up_terminus_segment(&self) -> Result<&Segment, DomainError> {
        let downs: HashSet<StationId> = self.segments.iter().map(|s| s.down_station()).collect();
        let mut candidates = self
            .segments
            .iter()
            .filter(|s| !downs.contains(&s.up_station()));

        match (candidates.next(), candidates.next()) {
            (Some(first), None) => Ok(first),
            (None, _) => Err(corrupt("no up-terminus")),
            (Some(_), Some(_)) => Err(corrupt("more than one up-terminus")),
        }
    }

    /// The station with no incoming segment, if the set is non-empty and
    /// well formed.
    pub fn up_terminus(&self) -> Option<StationId> {
        self.up_terminus_segment().ok().map(|s| s.up_station())
    }

    /// The station with no outgoing segment, if the set is non-empty and
    /// well formed.
    pub fn down_terminus(&self) -> Option<StationId> {
        let ups: HashSet<StationId> = self.segments.iter().map(|s| s.up_station()).collect();
        let mut candidates = self
            .segments
            .iter()
            .filter(|s| !ups.contains(&s.down_station()));
        match (candidates.next(), candidates.next()) {
            (Some(last), None) => Some(last.down_station()),
            _ => None,
        }
    }

    /// Returns true if any segment starts or ends at `station`.
    pub fn contains_station(&self, station: StationId) -> bool {
        self.segments.iter().any(|s| s.touches(station))
    }

    /// Sum of all segment distances. Zero for an empty set.
    ///
    /// `add_segment` is the only way a line grows longer and it refuses
    /// appends past `i64::MAX`; splits and merges keep the total unchanged
    /// and removals shrink it.
    pub fn total_distance(&self) -> i64 {
        self.segments.iter().map(|s| s.distance().get()).sum()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over member segments in storage order (not path order).
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }
}

fn remaining_distance(
    existing: &Segment,
    inserted: &Segment,
) -> Result<super::Distance, DomainError> {
    existing
        .distance()
        .checked_sub(inserted.distance())
        .map_err(|_| DomainError::DistanceTooLong {
            distance: inserted.distance().get(),
            existing: existing.distance().get(),
        })
}

fn corrupt(reason: &'static str) -> DomainError {
    error!(reason, "segment set does not form a single path");
    DomainError::CorruptTopology(reason)
}
