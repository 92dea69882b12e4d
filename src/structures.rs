//! Structures shared by every file type.

pub mod metadata;

use std::io::Read;

use crate::decode::{Decode, Error, Reader};

pub use metadata::{Extension, Metadata, MetadataBag, MetadataEntry, Value};

/// Bytes of a location record covered by the fields decoded here.
///
/// Newer files append optional fields (accuracy, pressure) which are skipped.
const LOCATION_FIXED_LEN: i32 = 20;

/// A single recorded position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Degrees.
    pub longitude: f64,
    /// Degrees.
    pub latitude: f64,
    /// Meters, `0.0` if not recorded.
    pub elevation: f64,
    /// Epoch seconds.
    pub timestamp: Option<i64>,
}

impl Decode for Location {
    fn decode<R: Read>(r: &mut Reader<R>) -> Result<Self, Error> {
        let entry_len = r.read_i32()?;

        let location = Self {
            longitude: r.read_coordinate()?,
            latitude: r.read_coordinate()?,
            elevation: r.read_elevation()?,
            timestamp: r.read_timestamp()?,
        };

        if entry_len > LOCATION_FIXED_LEN {
            r.skip((entry_len - LOCATION_FIXED_LEN) as u64)?;
        }

        Ok(location)
    }
}

/// A named point of interest.
#[derive(Debug, Clone, PartialEq, Decode)]
pub struct Waypoint {
    pub metadata: Metadata,
    pub location: Location,
}

impl Waypoint {
    pub fn name(&self) -> Option<String> {
        self.metadata.name()
    }
}

/// A contiguous run of locations within a track.
#[derive(Debug, Clone, PartialEq, Decode)]
pub struct Segment {
    pub metadata: Metadata,
    pub locations: Vec<Location>,
}
