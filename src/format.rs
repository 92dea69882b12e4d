//! The five file types written by the application.
//!
//! Each file starts with a fixed preamble of scalars (format version, header
//! size, informational element counts and summary values) followed by shared
//! structures. Preamble counts are not checked against the lists that follow;
//! each list carries its own authoritative count.

pub mod area;
pub mod route;
pub mod set;
pub mod track;
pub mod waypoint;

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    artifact::Artifact,
    decode::{self, Decode, Reader},
};

pub use area::AreaFile;
pub use route::RouteFile;
pub use set::SetFile;
pub use track::TrackFile;
pub use waypoint::WaypointFile;

/// The type of a file, as given by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Waypoint,
    Track,
    Route,
    Set,
    Area,
}

impl FileKind {
    pub const ALL: [Self; 5] = [
        Self::Waypoint,
        Self::Track,
        Self::Route,
        Self::Set,
        Self::Area,
    ];

    /// Match an extension, ignoring ASCII case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| extension.eq_ignore_ascii_case(kind.extension()))
    }

    /// Match the extension of a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Waypoint => "wpt",
            Self::Track => "trk",
            Self::Route => "rte",
            Self::Set => "set",
            Self::Area => "are",
        }
    }
}

/// A decoded file of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyFile {
    Waypoint(WaypointFile),
    Track(TrackFile),
    Route(RouteFile),
    Set(SetFile),
    Area(AreaFile),
}

impl AnyFile {
    pub fn kind(&self) -> FileKind {
        match self {
            Self::Waypoint(_) => FileKind::Waypoint,
            Self::Track(_) => FileKind::Track,
            Self::Route(_) => FileKind::Route,
            Self::Set(_) => FileKind::Set,
            Self::Area(_) => FileKind::Area,
        }
    }

    /// Synthesize the records describing this file.
    pub fn artifacts(&self) -> Vec<Artifact> {
        match self {
            Self::Waypoint(f) => f.artifacts(),
            Self::Track(f) => f.artifacts(),
            Self::Route(f) => f.artifacts(),
            Self::Set(f) => f.artifacts(),
            Self::Area(f) => f.artifacts(),
        }
    }
}

/// Decode a file of a known type from a reader.
pub fn decode_reader<R: Read>(kind: FileKind, r: &mut Reader<R>) -> Result<AnyFile, decode::Error> {
    Ok(match kind {
        FileKind::Waypoint => AnyFile::Waypoint(Decode::decode(r)?),
        FileKind::Track => AnyFile::Track(Decode::decode(r)?),
        FileKind::Route => AnyFile::Route(Decode::decode(r)?),
        FileKind::Set => AnyFile::Set(Decode::decode(r)?),
        FileKind::Area => AnyFile::Area(Decode::decode(r)?),
    })
}

/// Errors occurring while decoding a file from disk.
#[derive(Debug, Error)]
pub enum Error {
    /// The extension names none of the known file types.
    #[error("Not an AlpineQuest file type.")]
    UnknownKind,
    /// The file could not be opened.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The file contents could not be decoded.
    #[error(transparent)]
    Decode(#[from] decode::Error),
}

/// Open and decode a file, choosing its type by extension.
pub fn decode_path(path: &Path) -> Result<AnyFile, Error> {
    let kind = FileKind::from_path(path).ok_or(Error::UnknownKind)?;
    let file = File::open(path)?;
    let mut r = Reader::with_source(BufReader::new(file), path);
    Ok(decode_reader(kind, &mut r)?)
}
