#![allow(dead_code)]

//! Builds file contents byte by byte.

/// A big-endian byte buffer.
#[derive(Debug, Default, Clone)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn i64(mut self, v: i64) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn f64(mut self, v: f64) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn string(self, s: &str) -> Self {
        self.i32(s.len() as i32).raw(s.as_bytes())
    }

    /// Metadata with a `name` entry (if any) and no extensions.
    pub fn metadata(self, name: Option<&str>) -> Self {
        match name {
            Some(name) => self.i32(1).string("name").string(name).i32(0),
            None => self.i32(0).i32(0),
        }
    }

    /// A location without optional trailing fields.
    pub fn location(self, lon: i32, lat: i32, elevation: i32, timestamp_ms: i64) -> Self {
        self.i32(20).i32(lon).i32(lat).i32(elevation).i64(timestamp_ms)
    }

    pub fn waypoint(self, name: Option<&str>, lon: i32, lat: i32, timestamp_ms: i64) -> Self {
        self.metadata(name).location(lon, lat, 0, timestamp_ms)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

pub fn waypoint_file(name: &str, lon: i32, lat: i32, elevation: i32, timestamp_ms: i64) -> Vec<u8> {
    Bytes::new()
        .i32(2)
        .i32(0)
        .metadata(Some(name))
        .location(lon, lat, elevation, timestamp_ms)
        .into_inner()
}

/// A track preamble: version through total time.
pub fn track_header(num_locations: i32, num_segments: i32, num_waypoints: i32) -> Bytes {
    Bytes::new()
        .i32(3)
        .i32(0)
        .i32(num_locations)
        .i32(num_segments)
        .i32(num_waypoints)
        .i32(101_234_567)
        .i32(207_654_321)
        .i64(1_000_000)
        .f64(1234.5)
        .f64(1240.0)
        .f64(85.0)
        .i64(3_600_000)
}

/// A route preamble: version through total time.
pub fn route_header(num_waypoints: i32, first_timestamp_ms: i64) -> Bytes {
    Bytes::new()
        .i32(3)
        .i32(0)
        .i32(num_waypoints)
        .i32(0)
        .i32(0)
        .i64(first_timestamp_ms)
        .f64(0.0)
        .f64(0.0)
        .f64(0.0)
        .i64(0)
}

pub fn set_header(num_waypoints: i32) -> Bytes {
    Bytes::new().i32(2).i32(0).i32(num_waypoints).i32(0).i32(0)
}

pub fn area_header(num_locations: i32) -> Bytes {
    Bytes::new()
        .i32(2)
        .i32(0)
        .i32(num_locations)
        .i32(0)
        .i32(0)
        .f64(400.0)
        .f64(10_000.0)
}
