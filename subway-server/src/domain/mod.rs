//! Domain types for subway lines.
//!
//! This module contains the core domain model: validated distances,
//! directed segments between stations, and the segment set that keeps a
//! line's segments forming one simple path. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod distance;
mod error;
mod line;
mod segment;
mod segment_set;
mod station;


pub use distance::{Distance, InvalidDistance};
pub use error::DomainError;
pub use line::{Line, LineId};
pub use segment::Segment;
pub use segment_set::SegmentSet;
pub use station::{Station, StationId};
