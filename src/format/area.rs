//! Area files (`.are`).

use std::path::PathBuf;

use zerocopy::{
    FromBytes, Immutable, KnownLayout, Unaligned,
    byteorder::big_endian::{F64, I32},
};

use crate::{
    artifact::{self, Artifact},
    decode::{Decode, fixed_layout, scalar},
    structures::{Location, Metadata},
};

/// Fixed preamble of an area file.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct AreaHeader {
    version: I32,
    header_size: I32,
    num_locations: I32,
    first_longitude: I32,
    first_latitude: I32,
    total_length: F64,
    total_area: F64,
}

fixed_layout!(AreaHeader);

impl AreaHeader {
    pub fn version(&self) -> i32 {
        self.version.get()
    }

    pub fn header_size(&self) -> i32 {
        self.header_size.get()
    }

    pub fn num_locations(&self) -> i32 {
        self.num_locations.get()
    }

    pub fn first_longitude(&self) -> f64 {
        scalar::coordinate(self.first_longitude.get())
    }

    pub fn first_latitude(&self) -> f64 {
        scalar::coordinate(self.first_latitude.get())
    }

    /// Perimeter in meters.
    pub fn total_length(&self) -> f64 {
        self.total_length.get()
    }

    /// Square meters.
    pub fn total_area(&self) -> f64 {
        self.total_area.get()
    }
}

/// A polygon outlined by an ordered list of locations.
#[derive(Debug, Clone, PartialEq, Decode)]
pub struct AreaFile {
    #[decode(source)]
    pub source: Option<PathBuf>,
    pub header: AreaHeader,
    pub metadata: Metadata,
    pub locations: Vec<Location>,
}

impl AreaFile {
    pub fn artifacts(&self) -> Vec<Artifact> {
        vec![Artifact::Area(artifact::area(
            &self.locations,
            self.metadata.name(),
        ))]
    }
}
