//! Planned route files (`.rte`).

use std::path::PathBuf;

use zerocopy::{
    FromBytes, Immutable, KnownLayout, Unaligned,
    byteorder::big_endian::{F64, I32, I64},
};

use crate::{
    artifact::{self, Artifact},
    decode::{Decode, fixed_layout, scalar},
    structures::{Metadata, Waypoint},
};

/// Fixed preamble of a route file.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct RouteHeader {
    version: I32,
    header_size: I32,
    num_waypoints: I32,
    first_longitude: I32,
    first_latitude: I32,
    first_timestamp: I64,
    total_length: F64,
    total_length_with_elevation: F64,
    elevation_gain: F64,
    total_time: I64,
}

fixed_layout!(RouteHeader);

impl RouteHeader {
    pub fn version(&self) -> i32 {
        self.version.get()
    }

    pub fn header_size(&self) -> i32 {
        self.header_size.get()
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

    pub fn total_length(&self) -> f64 {
        self.total_length.get()
    }

    pub fn total_length_with_elevation(&self) -> f64 {
        self.total_length_with_elevation.get()
    }

    pub fn elevation_gain(&self) -> f64 {
        self.elevation_gain.get()
    }

    pub fn total_time(&self) -> i64 {
        self.total_time.get()
    }
}

/// An ordered list of waypoints making up a route.
#[derive(Debug, Clone, PartialEq, Decode)]
pub struct RouteFile {
    #[decode(source)]
    pub source: Option<PathBuf>,
    pub header: RouteHeader,
    pub metadata: Metadata,
    pub waypoints: Vec<Waypoint>,
}

impl RouteFile {
    pub fn artifacts(&self) -> Vec<Artifact> {
        artifact::route(
            &self.waypoints,
            self.header.first_timestamp(),
            self.metadata.name(),
        )
        .map(Artifact::Route)
        .into_iter()
        .collect()
    }
}
