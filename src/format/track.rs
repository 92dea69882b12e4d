//! Recorded track files (`.trk`).

use std::path::PathBuf;

use zerocopy::{
    FromBytes, Immutable, KnownLayout, Unaligned,
    byteorder::big_endian::{F64, I32, I64},
};

use crate::{
    artifact::{self, Artifact},
    decode::{Decode, fixed_layout, scalar},
    structures::{Metadata, Segment, Waypoint},
};

/// Fixed preamble of a track file.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct TrackHeader {
    version: I32,
    header_size: I32,
    num_locations: I32,
    num_segments: I32,
    num_waypoints: I32,
    first_longitude: I32,
    first_latitude: I32,
    first_timestamp: I64,
    total_length: F64,
    total_length_with_elevation: F64,
    elevation_gain: F64,
    total_time: I64,
}

fixed_layout!(TrackHeader);

impl TrackHeader {
    pub fn version(&self) -> i32 {
        self.version.get()
    }

    pub fn header_size(&self) -> i32 {
        self.header_size.get()
    }

    /// Declared location count across all segments (informational).
    pub fn num_locations(&self) -> i32 {
        self.num_locations.get()
    }

    /// Declared segment count (informational).
    pub fn num_segments(&self) -> i32 {
        self.num_segments.get()
    }

    /// Declared waypoint count (informational).
    pub fn num_waypoints(&self) -> i32 {
        self.num_waypoints.get()
    }

    pub fn first_longitude(&self) -> f64 {
        scalar::coordinate(self.first_longitude.get())
    }

    pub fn first_latitude(&self) -> f64 {
        scalar::coordinate(self.first_latitude.get())
    }

    pub fn first_timestamp(&self) -> Option<i64> {
        scalar::timestamp(self.first_timestamp.get())
    }

    /// Meters.
    pub fn total_length(&self) -> f64 {
        self.total_length.get()
    }

    /// Meters, including elevation changes.
    pub fn total_length_with_elevation(&self) -> f64 {
        self.total_length_with_elevation.get()
    }

    /// Meters.
    pub fn elevation_gain(&self) -> f64 {
        self.elevation_gain.get()
    }

    /// Duration as stored.
    pub fn total_time(&self) -> i64 {
        self.total_time.get()
    }
}

/// A recorded track, split into segments, with waypoints marked while
/// recording.
#[derive(Debug, Clone, PartialEq, Decode)]
pub struct TrackFile {
    #[decode(source)]
    pub source: Option<PathBuf>,
    pub header: TrackHeader,
    pub metadata: Metadata,
    pub waypoints: Vec<Waypoint>,
    pub segments: Vec<Segment>,
}

impl TrackFile {
    /// One track record joining every segment, then one bookmark per
    /// waypoint.
    ///
    /// Waypoints marked while recording a track are not saved anywhere else.
    pub fn artifacts(&self) -> Vec<Artifact> {
        let track = artifact::track(&self.segments, self.metadata.name());

        track
            .map(Artifact::Track)
            .into_iter()
            .chain(
                self.waypoints
                    .iter()
                    .map(|w| Artifact::Bookmark(artifact::bookmark(w))),
            )
            .collect()
    }
}
