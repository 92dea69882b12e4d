//! Synthesis of normalized geospatial records from decoded files.
//!
//! Records are handed to an [`ArtifactSink`]. A sink may reject individual
//! records; [`post_all`] logs each rejection and carries on with the rest.

#[cfg(feature = "geojson")]
pub mod geojson;

use std::{convert::Infallible, fmt, path::Path};

use serde::Serialize;
use tracing::{debug, warn};

use crate::structures::{Location, Segment, Waypoint};

/// Program tag attached to bookmarks.
pub const PROGRAM_NAME: &str = "AlpineQuest";

/// A single point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bookmark {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timestamp: Option<i64>,
    pub name: Option<String>,
    pub program: &'static str,
}

/// A point along a track or the outline of an area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timestamp: Option<i64>,
}

impl From<&Location> for GeoPoint {
    fn from(l: &Location) -> Self {
        Self {
            latitude: l.latitude,
            longitude: l.longitude,
            elevation: l.elevation,
            timestamp: l.timestamp,
        }
    }
}

/// A recorded path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub name: Option<String>,
    pub points: Vec<GeoPoint>,
}

/// A named stop along a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub name: Option<String>,
}

/// A planned path through waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub name: Option<String>,
    pub timestamp: Option<i64>,
    pub waypoints: Vec<RoutePoint>,
}

/// A polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    pub name: Option<String>,
    pub points: Vec<GeoPoint>,
}

/// A normalized record ready for a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Artifact {
    Bookmark(Bookmark),
    Track(Track),
    Route(Route),
    Area(Area),
}

impl Artifact {
    /// Short lowercase name of the record type, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bookmark(_) => "bookmark",
            Self::Track(_) => "track",
            Self::Route(_) => "route",
            Self::Area(_) => "area",
        }
    }
}

/// A bookmark for one waypoint.
pub fn bookmark(waypoint: &Waypoint) -> Bookmark {
    let Location {
        longitude,
        latitude,
        elevation,
        timestamp,
    } = waypoint.location;

    Bookmark {
        latitude,
        longitude,
        elevation,
        timestamp,
        name: waypoint.name(),
        program: PROGRAM_NAME,
    }
}

/// A single track joining all segments in order.
///
/// Segment boundaries are not kept. Returns `None` if there are no points.
pub fn track(segments: &[Segment], name: Option<String>) -> Option<Track> {
    let points: Vec<GeoPoint> = segments
        .iter()
        .flat_map(|s| &s.locations)
        .map(GeoPoint::from)
        .collect();

    (!points.is_empty()).then_some(Track { name, points })
}

/// A route through waypoints.
///
/// Without a route-level timestamp, the first waypoint carrying one is used.
/// Returns `None` if there are no waypoints.
pub fn route(waypoints: &[Waypoint], timestamp: Option<i64>, name: Option<String>) -> Option<Route> {
    if waypoints.is_empty() {
        return None;
    }

    let timestamp = timestamp.or_else(|| waypoints.iter().find_map(|w| w.location.timestamp));

    let waypoints = waypoints
        .iter()
        .map(|w| RoutePoint {
            latitude: w.location.latitude,
            longitude: w.location.longitude,
            elevation: w.location.elevation,
            name: w.name(),
        })
        .collect();

    Some(Route {
        name,
        timestamp,
        waypoints,
    })
}

/// An area outlined by locations in order.
pub fn area(locations: &[Location], name: Option<String>) -> Area {
    Area {
        name,
        points: locations.iter().map(GeoPoint::from).collect(),
    }
}

/// A destination for synthesized records.
pub trait ArtifactSink {
    type Error: fmt::Display;

    /// Write one record. `source` is the file it was synthesized from.
    fn post(&mut self, source: Option<&Path>, artifact: &Artifact) -> Result<(), Self::Error>;
}

/// Collects records in memory.
impl ArtifactSink for Vec<Artifact> {
    type Error = Infallible;

    fn post(&mut self, _: Option<&Path>, artifact: &Artifact) -> Result<(), Self::Error> {
        self.push(artifact.clone());
        Ok(())
    }
}

/// Counts of records handed to a sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostSummary {
    pub posted: usize,
    pub failed: usize,
}

/// Post every record, logging and counting those the sink rejects.
pub fn post_all<S: ArtifactSink + ?Sized>(
    sink: &mut S,
    source: Option<&Path>,
    artifacts: &[Artifact],
) -> PostSummary {
    let mut summary = PostSummary::default();

    for artifact in artifacts {
        match sink.post(source, artifact) {
            Ok(()) => summary.posted += 1,
            Err(e) => {
                warn!(
                    kind = artifact.kind(),
                    source = ?source,
                    "Failed to post artifact: {e}"
                );
                summary.failed += 1;
            }
        }
    }

    debug!(
        source = ?source,
        posted = summary.posted,
        failed = summary.failed,
        "Posted artifacts"
    );

    summary
}
