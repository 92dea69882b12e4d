//! A sink collecting records into a GeoJSON feature collection.
//!
//! _Requires Cargo feature `geojson`._

use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::{Area, Artifact, ArtifactSink, Bookmark, GeoPoint, Route, Track};

/// Records which cannot be expressed as GeoJSON.
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// A coordinate was NaN or infinite.
    #[error("Non-finite coordinate in {0}.")]
    NonFinite(&'static str),
    /// An area's closed ring had fewer than 4 positions.
    #[error("Area of {0} points does not outline a polygon.")]
    DegenerateArea(usize),
}

/// Accumulates one feature per accepted record.
#[derive(Debug, Default)]
pub struct FeatureCollectionSink {
    features: Vec<Feature>,
}

impl FeatureCollectionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn into_feature_collection(self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members: None,
        }
    }
}

impl ArtifactSink for FeatureCollectionSink {
    type Error = GeoJsonError;

    fn post(&mut self, source: Option<&Path>, artifact: &Artifact) -> Result<(), GeoJsonError> {
        let (geometry, mut props) = match artifact {
            Artifact::Bookmark(b) => bookmark_feature(b)?,
            Artifact::Track(t) => track_feature(t)?,
            Artifact::Route(r) => route_feature(r)?,
            Artifact::Area(a) => area_feature(a)?,
        };

        props.insert("kind".to_string(), artifact.kind().into());
        if let Some(source) = source {
            props.insert(
                "source".to_string(),
                source.to_string_lossy().into_owned().into(),
            );
        }

        self.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(geometry)),
            id: None,
            properties: Some(props),
            foreign_members: None,
        });

        Ok(())
    }
}

type Parts = (Value, Map<String, JsonValue>);

fn bookmark_feature(b: &Bookmark) -> Result<Parts, GeoJsonError> {
    let coords = coords(b.longitude, b.latitude, b.elevation, "bookmark")?;

    let mut props = Map::new();
    insert_optional(&mut props, "name", b.name.clone());
    insert_optional(&mut props, "time", b.timestamp);
    props.insert("ele".to_string(), finite(b.elevation));
    props.insert("program".to_string(), b.program.into());

    Ok((Value::Point(coords), props))
}

fn track_feature(t: &Track) -> Result<Parts, GeoJsonError> {
    let line = point_coords(&t.points, "track")?;

    let mut props = Map::new();
    insert_optional(&mut props, "name", t.name.clone());
    insert_coordinate_times(&mut props, &t.points);

    Ok((Value::LineString(line), props))
}

fn route_feature(r: &Route) -> Result<Parts, GeoJsonError> {
    let line = r
        .waypoints
        .iter()
        .map(|p| coords(p.longitude, p.latitude, p.elevation, "route"))
        .collect::<Result<Vec<_>, _>>()?;

    let mut props = Map::new();
    insert_optional(&mut props, "name", r.name.clone());
    insert_optional(&mut props, "time", r.timestamp);

    let names: Vec<JsonValue> = r
        .waypoints
        .iter()
        .map(|p| p.name.clone().map_or(JsonValue::Null, JsonValue::String))
        .collect();
    if names.iter().any(|n| !n.is_null()) {
        let mut coord_props = Map::new();
        coord_props.insert("names".to_string(), JsonValue::Array(names));
        props.insert(
            "coordinateProperties".to_string(),
            JsonValue::Object(coord_props),
        );
    }

    Ok((Value::LineString(line), props))
}

fn area_feature(a: &Area) -> Result<Parts, GeoJsonError> {
    let mut ring = point_coords(&a.points, "area")?;

    // GeoJSON rings repeat their first position at the end.
    if ring.first() != ring.last() {
        if let Some(first) = ring.first().cloned() {
            ring.push(first);
        }
    }

    // A closed ring needs three distinct corners plus the closing position.
    if ring.len() < 4 {
        Err(GeoJsonError::DegenerateArea(a.points.len()))?;
    }

    let mut props = Map::new();
    insert_optional(&mut props, "name", a.name.clone());

    Ok((Value::Polygon(vec![ring]), props))
}

/// Build a `[lon, lat, ele]` position.
fn coords(lon: f64, lat: f64, ele: f64, kind: &'static str) -> Result<Vec<f64>, GeoJsonError> {
    if lon.is_finite() && lat.is_finite() && ele.is_finite() {
        Ok(vec![lon, lat, ele])
    } else {
        Err(GeoJsonError::NonFinite(kind))
    }
}

fn point_coords(points: &[GeoPoint], kind: &'static str) -> Result<Vec<Vec<f64>>, GeoJsonError> {
    points
        .iter()
        .map(|p| coords(p.longitude, p.latitude, p.elevation, kind))
        .collect()
}

fn finite(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
}

fn insert_optional<T: Into<JsonValue>>(
    props: &mut Map<String, JsonValue>,
    key: &str,
    value: Option<T>,
) {
    if let Some(v) = value {
        props.insert(key.to_string(), v.into());
    }
}

fn insert_coordinate_times(props: &mut Map<String, JsonValue>, points: &[GeoPoint]) {
    let times: Vec<JsonValue> = points
        .iter()
        .map(|p| p.timestamp.map_or(JsonValue::Null, JsonValue::from))
        .collect();

    // Only include if at least one time is present
    if times.iter().any(|t| !t.is_null()) {
        let mut coord_props = Map::new();
        coord_props.insert("times".to_string(), JsonValue::Array(times));
        props.insert(
            "coordinateProperties".to_string(),
            JsonValue::Object(coord_props),
        );
    }
}
