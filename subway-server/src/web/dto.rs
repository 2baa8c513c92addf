//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Line, Segment, Station};

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct StationRequest {
    pub name: String,
}

/// A station in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationResponse {
    pub id: u64,
    pub name: String,
}

/// Request to create a line with its first segment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: i64,
}

/// Request to rename or recolor a line.
#[derive(Debug, Deserialize)]
pub struct LineUpdateRequest {
    pub name: String,
    pub color: String,
}

/// A line with its stations in path order.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    pub id: u64,
    pub name: String,
    pub color: String,

    /// Stations from the up-terminus down
    pub stations: Vec<StationResponse>,

    /// Sum of all segment distances
    pub distance: i64,
}

/// Request to add a segment (section) to a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: i64,
}

/// A segment in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub line_id: u64,
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: i64,
}

/// Query for removing a station from a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDeleteQuery {
    pub station_id: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Station> for StationResponse {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id().0,
            name: station.name().to_string(),
        }
    }
}

impl From<&Segment> for SectionResponse {
    fn from(segment: &Segment) -> Self {
        Self {
            line_id: segment.line().0,
            up_station_id: segment.up_station().0,
            down_station_id: segment.down_station().0,
            distance: segment.distance().get(),
        }
    }
}

impl LineResponse {
    /// Build a response from a line and its stations already in path order.
    pub fn new(line: &Line, stations: Vec<&Station>) -> Self {
        Self {
            id: line.id().0,
            name: line.name().to_string(),
            color: line.color().to_string(),
            stations: stations.into_iter().map(StationResponse::from).collect(),
            distance: line.total_distance(),
        }
    }
}
