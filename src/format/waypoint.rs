//! Single waypoint files (`.wpt`).

use std::{io::Read, path::PathBuf};

use crate::{
    artifact::{self, Artifact},
    decode::{Decode, Error, Reader},
    structures::Waypoint,
};

/// A file holding one waypoint.
#[derive(Debug, Clone, PartialEq, Decode)]
pub struct WaypointFile {
    #[decode(source)]
    pub source: Option<PathBuf>,
    pub version: i32,
    #[decode(with = skip_header)]
    pub header_size: i32,
    pub waypoint: Waypoint,
}

/// Read the header size and skip the header it describes.
///
/// Its contents are undocumented; files seen so far declare it empty.
fn skip_header<R: Read>(r: &mut Reader<R>) -> Result<i32, Error> {
    let header_size = r.read_i32()?;

    if header_size > 0 {
        r.skip(header_size as u64)?;
    }

    Ok(header_size)
}

impl WaypointFile {
    pub fn artifacts(&self) -> Vec<Artifact> {
        vec![Artifact::Bookmark(artifact::bookmark(&self.waypoint))]
    }
}
