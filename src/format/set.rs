//! Waypoint set files (`.set`).

use std::path::PathBuf;

use zerocopy::{
    FromBytes, Immutable, KnownLayout, Unaligned,
    byteorder::big_endian::I32,
};

use crate::{
    artifact::{self, Artifact},
    decode::{Decode, fixed_layout, scalar},
    structures::{Metadata, Waypoint},
};

/// Fixed preamble of a set file.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct SetHeader {
    version: I32,
    header_size: I32,
    num_waypoints: I32,
    first_longitude: I32,
    first_latitude: I32,
}

fixed_layout!(SetHeader);

impl SetHeader {
    pub fn version(&self) -> i32 {
        self.version.get()
    }

    pub fn header_size(&self) -> i32 {
        self.header_size.get()
    }

    pub fn num_waypoints(&self) -> i32 {
        self.num_waypoints.get()
    }

    pub fn first_longitude(&self) -> f64 {
        scalar::coordinate(self.first_longitude.get())
    }

    pub fn first_latitude(&self) -> f64 {
        scalar::coordinate(self.first_latitude.get())
    }
}

/// An unordered collection of waypoints.
#[derive(Debug, Clone, PartialEq, Decode)]
pub struct SetFile {
    #[decode(source)]
    pub source: Option<PathBuf>,
    pub header: SetHeader,
    pub metadata: Metadata,
    pub waypoints: Vec<Waypoint>,
}

impl SetFile {
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.waypoints
            .iter()
            .map(|w| Artifact::Bookmark(artifact::bookmark(w)))
            .collect()
    }
}
