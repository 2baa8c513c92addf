//! In-memory station and line registry.
//!
//! `SubwayNetwork` is the line-management layer around the domain core. It
//! allocates identities, checks that referenced stations exist, and turns
//! raw request values into validated domain types before handing them to a
//! [`Line`]. Callers serialize access (the web layer keeps it behind a lock).

mod error;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::domain::{Distance, DomainError, Line, LineId, Segment, Station, StationId};

pub use error::NetworkError;

/// Registry of all stations and lines.
#[derive(Debug, Default)]
pub struct SubwayNetwork {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    last_station_id: u64,
    last_line_id: u64,
}

impl SubwayNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station.
    pub fn create_station(&mut self, name: &str) -> Result<&Station, NetworkError> {
        let id = StationId(self.last_station_id + 1);
        let station = Station::new(id, name)?;
        if self.stations.values().any(|s| s.name() == station.name()) {
            return Err(NetworkError::DuplicateName(station.name().to_string()));
        }
        self.last_station_id = id.0;
        info!(station = %id, name = station.name(), "station created");
        Ok(&*self.stations.entry(id).or_insert(station))
    }

    pub fn station(&self, id: StationId) -> Result<&Station, NetworkError> {
        self.stations.get(&id).ok_or(NetworkError::StationNotFound(id))
    }

    /// All stations in id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Remove a station that no line references.
    pub fn delete_station(&mut self, id: StationId) -> Result<Station, NetworkError> {
        self.station(id)?;
        if let Some(line) = self.lines.values().find(|l| l.contains_station(id)) {
            return Err(NetworkError::StationInUse {
                station: id,
                line: line.id(),
            });
        }
        info!(station = %id, "station deleted");
        self.stations
            .remove(&id)
            .ok_or(NetworkError::StationNotFound(id))
    }

    /// Create a line with its initial segment.
    pub fn create_line(
        &mut self,
        name: &str,
        color: &str,
        up_station: StationId,
        down_station: StationId,
        distance: i64,
    ) -> Result<&Line, NetworkError> {
        self.station(up_station)?;
        self.station(down_station)?;
        let distance = Distance::new(distance).map_err(DomainError::from)?;

        let id = LineId(self.last_line_id + 1);
        let line = Line::new(id, name, color, up_station, down_station, distance)?;
        self.ensure_line_name_free(line.name(), None)?;

        self.last_line_id = id.0;
        info!(line = %id, name = line.name(), "line created");
        Ok(&*self.lines.entry(id).or_insert(line))
    }

    pub fn line(&self, id: LineId) -> Result<&Line, NetworkError> {
        self.lines.get(&id).ok_or(NetworkError::LineNotFound(id))
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut Line, NetworkError> {
        self.lines.get_mut(&id).ok_or(NetworkError::LineNotFound(id))
    }

    /// All lines in id order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// Rename and recolor a line.
    pub fn update_line(
        &mut self,
        id: LineId,
        name: &str,
        color: &str,
    ) -> Result<&Line, NetworkError> {
        self.line(id)?;
        self.ensure_line_name_free(name.trim(), Some(id))?;
        let line = self.line_mut(id)?;
        line.update(name, color)?;
        debug!(line = %id, "line updated");
        Ok(&*line)
    }

    /// Remove a line together with all of its segments.
    pub fn delete_line(&mut self, id: LineId) -> Result<Line, NetworkError> {
        let line = self
            .lines
            .remove(&id)
            .ok_or(NetworkError::LineNotFound(id))?;
        info!(line = %id, segments = line.segments().len(), "line deleted");
        Ok(line)
    }

    /// Register a segment on an existing line.
    pub fn add_segment(
        &mut self,
        line: LineId,
        up_station: StationId,
        down_station: StationId,
        distance: i64,
    ) -> Result<Segment, NetworkError> {
        self.line(line)?;
        self.station(up_station)?;
        self.station(down_station)?;
        let distance = Distance::new(distance).map_err(DomainError::from)?;
        let segment = self
            .line_mut(line)?
            .add_segment(up_station, down_station, distance)?;
        Ok(segment)
    }

    /// Drop a station from a line. The line keeps at least one segment.
    pub fn remove_station_from_line(
        &mut self,
        line: LineId,
        station: StationId,
    ) -> Result<(), NetworkError> {
        self.line(line)?;
        self.station(station)?;
        self.line_mut(line)?.remove_station(station)?;
        Ok(())
    }

    /// Move a terminus segment from one line to another.
    pub fn reassign_segment(&mut self, segment: &Segment, to: LineId) -> Result<(), NetworkError> {
        let from = segment.line();
        let source = self.line(from)?;
        if !source.segments().iter().any(|s| s == segment) {
            return Err(DomainError::SegmentNotOnLine {
                up: segment.up_station(),
                down: segment.down_station(),
            }
            .into());
        }
        self.line(to)?;
        if from == to {
            return Ok(());
        }

        let mut target = self
            .lines
            .remove(&to)
            .ok_or(NetworkError::LineNotFound(to))?;
        let result = match self.lines.get_mut(&from) {
            Some(source) => source
                .transfer_segment(&mut target, segment)
                .map_err(NetworkError::from),
            None => Err(NetworkError::LineNotFound(from)),
        };
        self.lines.insert(to, target);
        result
    }

    /// Stations of a line in path order.
    pub fn line_stations(&self, id: LineId) -> Result<Vec<&Station>, NetworkError> {
        self.line(id)?
            .ordered_stations()?
            .into_iter()
            .map(|station| self.station(station))
            .collect()
    }

    /// Segments of a line in path order.
    pub fn line_segments(&self, id: LineId) -> Result<Vec<Segment>, NetworkError> {
        let segments = self.line(id)?.segments().ordered_segments()?;
        Ok(segments.into_iter().copied().collect())
    }

    /// Total length of a line.
    pub fn line_distance(&self, id: LineId) -> Result<i64, NetworkError> {
        Ok(self.line(id)?.total_distance())
    }

    fn ensure_line_name_free(
        &self,
        name: &str,
        except: Option<LineId>,
    ) -> Result<(), NetworkError> {
        let taken = self
            .lines
            .values()
            .any(|l| l.name() == name && Some(l.id()) != except);
        if taken {
            return Err(NetworkError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// A small network for local experimentation.
    pub fn demo() -> Result<Self, NetworkError> {
        let mut network = Self::new();
        let names = [
            "Sindorim",
            "Dorimcheon",
            "Yangcheon-gu Office",
            "Sinjeongnegeori",
            "Kkachisan",
        ];
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(network.create_station(name)?.id());
        }

        let line = network.create_line("Line 2", "green", ids[1], ids[3], 30)?.id();
        network.add_segment(line, ids[0], ids[1], 12)?;
        network.add_segment(line, ids[1], ids[2], 8)?;
        network.add_segment(line, ids[3], ids[4], 3)?;
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_with_line() -> (SubwayNetwork, LineId, StationId, StationId) {
        let mut network = SubwayNetwork::new();
        let up = network.create_station("Dorimcheon").unwrap().id();
        let down = network.create_station("Sinjeongnegeori").unwrap().id();
        let line = network
            .create_line("Line 2", "green", up, down, 30)
            .unwrap()
            .id();
        (network, line, up, down)
    }

    fn names(network: &SubwayNetwork, line: LineId) -> Vec<String> {
        network
            .line_stations(line)
            .unwrap()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    #[test]
    fn station_ids_are_sequential() {
        let mut network = SubwayNetwork::new();
        assert_eq!(network.create_station("A").unwrap().id(), StationId(1));
        assert_eq!(network.create_station("B").unwrap().id(), StationId(2));
        assert_eq!(network.stations().count(), 2);
    }

    #[test]
    fn duplicate_station_name() {
        let mut network = SubwayNetwork::new();
        network.create_station("Kkachisan").unwrap();
        assert_eq!(
            network.create_station(" Kkachisan "),
            Err(NetworkError::DuplicateName("Kkachisan".into()))
        );
    }

    #[test]
    fn rejected_station_does_not_consume_id() {
        let mut network = SubwayNetwork::new();
        assert!(network.create_station("").is_err());
        assert_eq!(network.create_station("A").unwrap().id(), StationId(1));
    }

    #[test]
    fn create_line_requires_stations() {
        let mut network = SubwayNetwork::new();
        let up = network.create_station("A").unwrap().id();
        assert_eq!(
            network
                .create_line("Line 1", "blue", up, StationId(10), 5)
                .map(|l| l.id()),
            Err(NetworkError::StationNotFound(StationId(10)))
        );
    }

    #[test]
    fn create_line_validates_distance() {
        let mut network = SubwayNetwork::new();
        let up = network.create_station("A").unwrap().id();
        let down = network.create_station("B").unwrap().id();
        assert!(matches!(
            network.create_line("Line 1", "blue", up, down, 0),
            Err(NetworkError::Domain(DomainError::InvalidDistance(_)))
        ));
    }

    #[test]
    fn duplicate_line_name() {
        let (mut network, _, up, down) = network_with_line();
        assert!(matches!(
            network.create_line("Line 2", "red", up, down, 4),
            Err(NetworkError::DuplicateName(_))
        ));
    }

    #[test]
    fn add_segment_to_missing_line() {
        let (mut network, _, up, down) = network_with_line();
        assert_eq!(
            network.add_segment(LineId(10), up, down, 3),
            Err(NetworkError::LineNotFound(LineId(10)))
        );
    }

    #[test]
    fn add_segment_with_missing_station() {
        let (mut network, line, up, _) = network_with_line();
        assert_eq!(
            network.add_segment(line, up, StationId(10), 3),
            Err(NetworkError::StationNotFound(StationId(10)))
        );
    }

    #[test]
    fn add_segment_same_station() {
        let (mut network, line, up, _) = network_with_line();
        assert_eq!(
            network.add_segment(line, up, up, 3),
            Err(NetworkError::Domain(DomainError::InvalidSegment(up)))
        );
    }

    #[test]
    fn add_and_remove_scenario() {
        let (mut network, line, up, down) = network_with_line();
        let office = network.create_station("Yangcheon-gu Office").unwrap().id();

        network.add_segment(line, office, down, 3).unwrap();
        assert_eq!(
            names(&network, line),
            vec!["Dorimcheon", "Yangcheon-gu Office", "Sinjeongnegeori"]
        );
        assert_eq!(network.line_distance(line).unwrap(), 30);

        network.remove_station_from_line(line, office).unwrap();
        assert_eq!(names(&network, line), vec!["Dorimcheon", "Sinjeongnegeori"]);
        assert_eq!(network.line_distance(line).unwrap(), 30);

        assert_eq!(
            network.remove_station_from_line(line, up),
            Err(NetworkError::Domain(DomainError::LastSegment))
        );
    }

    #[test]
    fn remove_station_not_on_line() {
        let (mut network, line, _, _) = network_with_line();
        let office = network.create_station("Yangcheon-gu Office").unwrap().id();
        assert_eq!(
            network.remove_station_from_line(line, office),
            Err(NetworkError::Domain(DomainError::StationNotOnLine(office)))
        );
    }

    #[test]
    fn line_segments_in_path_order() {
        let (mut network, line, up, down) = network_with_line();
        let sindorim = network.create_station("Sindorim").unwrap().id();
        network.add_segment(line, sindorim, up, 5).unwrap();

        let segments = network.line_segments(line).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].stations(), [sindorim, up]);
        assert_eq!(segments[1].stations(), [up, down]);
    }

    #[test]
    fn station_in_use_cannot_be_deleted() {
        let (mut network, line, up, _) = network_with_line();
        assert_eq!(
            network.delete_station(up),
            Err(NetworkError::StationInUse { station: up, line })
        );

        network.delete_line(line).unwrap();
        assert_eq!(network.delete_station(up).unwrap().name(), "Dorimcheon");
        assert_eq!(
            network.station(up).map(|s| s.id()),
            Err(NetworkError::StationNotFound(up))
        );
    }

    #[test]
    fn update_line() {
        let (mut network, line, up, down) = network_with_line();
        let other = network.create_line("Line 5", "purple", up, down, 9).unwrap().id();

        network.update_line(line, "Line 2 Branch", "green").unwrap();
        assert_eq!(network.line(line).unwrap().name(), "Line 2 Branch");

        // keeping its own name is fine
        network.update_line(line, "Line 2 Branch", "lime").unwrap();
        assert!(matches!(
            network.update_line(other, "Line 2 Branch", "purple"),
            Err(NetworkError::DuplicateName(_))
        ));
    }

    #[test]
    fn delete_missing_line() {
        let mut network = SubwayNetwork::new();
        assert!(matches!(
            network.delete_line(LineId(1)),
            Err(NetworkError::LineNotFound(_))
        ));
    }

    #[test]
    fn reassign_segment_between_lines() {
        let (mut network, line2, up, down) = network_with_line();
        let kkachisan = network.create_station("Kkachisan").unwrap().id();
        let hwagok = network.create_station("Hwagok").unwrap().id();
        let moving = network.add_segment(line2, down, kkachisan, 3).unwrap();
        let line5 = network
            .create_line("Line 5", "purple", kkachisan, hwagok, 7)
            .unwrap()
            .id();

        network.reassign_segment(&moving, line5).unwrap();

        assert_eq!(network.line_stations(line2).unwrap().len(), 2);
        assert_eq!(
            network.line(line2).unwrap().ordered_stations().unwrap(),
            vec![up, down]
        );
        assert_eq!(
            network.line(line5).unwrap().ordered_stations().unwrap(),
            vec![down, kkachisan, hwagok]
        );
        assert_eq!(network.line_distance(line5).unwrap(), 10);
    }

    #[test]
    fn reassign_to_missing_line_keeps_source() {
        let (mut network, line, up, down) = network_with_line();
        let seg = network.line_segments(line).unwrap()[0];
        assert_eq!(
            network.reassign_segment(&seg, LineId(99)),
            Err(NetworkError::LineNotFound(LineId(99)))
        );
        assert_eq!(
            network.line(line).unwrap().ordered_stations().unwrap(),
            vec![up, down]
        );
    }

    #[test]
    fn reassign_unknown_segment_to_same_line() {
        let (mut network, line, up, down) = network_with_line();
        let stale = Segment::new(line, up, down, Distance::new(31).unwrap()).unwrap();
        assert_eq!(
            network.reassign_segment(&stale, line),
            Err(NetworkError::Domain(DomainError::SegmentNotOnLine { up, down }))
        );

        let current = network.line_segments(line).unwrap()[0];
        assert_eq!(network.reassign_segment(&current, line), Ok(()));
    }

    #[test]
    fn section_past_max_length_is_rejected() {
        let mut network = SubwayNetwork::new();
        let a = network.create_station("A").unwrap().id();
        let b = network.create_station("B").unwrap().id();
        let c = network.create_station("C").unwrap().id();
        let line = network
            .create_line("Line 1", "blue", a, b, i64::MAX)
            .unwrap()
            .id();

        assert!(matches!(
            network.add_segment(line, b, c, 1),
            Err(NetworkError::Domain(DomainError::DistanceOverflow { .. }))
        ));
        assert_eq!(network.line_distance(line).unwrap(), i64::MAX);
        assert_eq!(network.line_stations(line).unwrap().len(), 2);
    }

    #[test]
    fn demo_network_is_consistent() {
        let network = SubwayNetwork::demo().unwrap();
        let line = network.lines().next().unwrap().id();
        assert_eq!(
            names(&network, line),
            vec![
                "Sindorim",
                "Dorimcheon",
                "Yangcheon-gu Office",
                "Sinjeongnegeori",
                "Kkachisan"
            ]
        );
        assert_eq!(network.line_distance(line).unwrap(), 45);
    }
}
