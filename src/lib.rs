//! A decoder for the binary files AlpineQuest writes for waypoints, tracks,
//! routes, waypoint sets and areas.
//!
//! Decoding is layered. The [`decode`] module reads big-endian primitives and
//! domain scalars, [`structures`] builds the shared metadata, location and
//! segment structures on top of it, and [`format`] decodes each of the five
//! file types. Decoded files are turned into normalized records by
//! [`artifact`] and handed to an [`artifact::ArtifactSink`].
//!
//! Most users should begin with [`scan::scan`] or [`format::decode_path`].
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `geojson`: enable the GeoJSON feature collection sink (default).

// Derived impls name this crate by path, including from within it.
extern crate self as alpinequest;

pub mod artifact;
pub mod decode;
pub mod format;
pub mod options;
pub mod scan;
pub mod structures;
