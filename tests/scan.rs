mod common;

use std::{
    cell::Cell,
    fs,
    path::{Path, PathBuf},
};

use alpinequest::{
    artifact::{Artifact, ArtifactSink},
    options::{FailurePolicy, ScanOptions},
    scan::{self, ScanError},
};
use common::{set_header, waypoint_file};
use tempfile::TempDir;

/// A device tree with an application folder and an unrelated folder.
struct Device {
    dir: TempDir,
}

impl Device {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("psyberia.alpinequest.free/data")).unwrap();
        fs::create_dir_all(dir.path().join("Download")).unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::write(&path, bytes).unwrap();
        path
    }

    fn app(&self, name: &str, bytes: &[u8]) -> PathBuf {
        self.write(&format!("psyberia.alpinequest.free/data/{name}"), bytes)
    }
}

fn names(artifacts: &[Artifact]) -> Vec<String> {
    artifacts
        .iter()
        .map(|a| match a {
            Artifact::Bookmark(b) => b.name.clone().unwrap_or_default(),
            other => panic!("Expected bookmarks only, got {other:?}"),
        })
        .collect()
}

#[test]
fn discovers_only_marked_candidates() {
    let device = Device::new();
    let a = device.app("a.wpt", &waypoint_file("A", 0, 0, 0, 0));
    let b = device.app("b.SET", &[]);
    device.app("notes.txt", b"hello");
    device.write("Download/c.wpt", &waypoint_file("C", 0, 0, 0, 0));

    let found = scan::discover(device.root(), &ScanOptions::default());
    assert_eq!(found, vec![a, b]);

    let options = ScanOptions {
        require_folder_marker: false,
        ..ScanOptions::default()
    };
    assert_eq!(scan::discover(device.root(), &options).len(), 3);
}

#[test]
fn decode_failure_skips_only_that_file() {
    let device = Device::new();
    device.app("1.wpt", &waypoint_file("First", 0, 0, 0, 0));
    device.app("2.wpt", &[0, 0, 0, 2, 0, 0]);
    device.app("3.wpt", &waypoint_file("Third", 0, 0, 0, 0));

    let options = ScanOptions::default();
    let files = scan::discover(device.root(), &options);

    let mut sink: Vec<Artifact> = Vec::new();
    let summary = scan::scan(&files, &mut sink, &options, || false).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.artifacts_posted, 2);
    assert!(!summary.cancelled);
    assert_eq!(summary.failed.len(), 1);
    assert!(matches!(summary.failed[0], ScanError::Decode { .. }));
    assert!(summary.failed[0].path().ends_with("2.wpt"));
    assert_eq!(names(&sink), vec!["First", "Third"]);
}

#[test]
fn abort_policy_stops_at_first_failure() {
    let device = Device::new();
    device.app("1.wpt", &waypoint_file("First", 0, 0, 0, 0));
    device.app("2.wpt", &[0xFF]);
    device.app("3.wpt", &waypoint_file("Third", 0, 0, 0, 0));

    let options = ScanOptions {
        on_decode_error: FailurePolicy::Abort,
        ..ScanOptions::default()
    };
    let files = scan::discover(device.root(), &options);

    let mut sink: Vec<Artifact> = Vec::new();
    let err = scan::scan(&files, &mut sink, &options, || false).unwrap_err();

    assert!(err.path().ends_with("2.wpt"));
    assert_eq!(names(&sink), vec!["First"]);
}

#[test]
fn missing_file_is_an_open_failure() {
    let device = Device::new();
    let missing = device.root().join("psyberia.alpinequest.free/data/gone.wpt");

    let mut sink: Vec<Artifact> = Vec::new();
    let summary = scan::scan([&missing], &mut sink, &ScanOptions::default(), || false).unwrap();

    assert_eq!(summary.processed, 0);
    assert!(matches!(summary.failed[..], [ScanError::Open { .. }]));
}

#[test]
fn cancellation_is_polled_between_files() {
    let device = Device::new();
    for i in 0..4 {
        device.app(&format!("{i}.wpt"), &waypoint_file(&format!("P{i}"), 0, 0, 0, 0));
    }

    let options = ScanOptions::default();
    let files = scan::discover(device.root(), &options);

    let polls = Cell::new(0);
    let mut sink: Vec<Artifact> = Vec::new();
    let summary = scan::scan(&files, &mut sink, &options, || {
        polls.set(polls.get() + 1);
        polls.get() > 2
    })
    .unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.processed, 2);
    assert_eq!(polls.get(), 3);
    assert_eq!(names(&sink), vec!["P0", "P1"]);
}

#[test]
fn type_filter_limits_processing() {
    let device = Device::new();
    let set = set_header(1)
        .metadata(None)
        .i32(1)
        .waypoint(Some("InSet"), 0, 0, 0)
        .into_inner();
    let files = vec![
        device.app("a.wpt", &waypoint_file("Single", 0, 0, 0, 0)),
        device.app("b.set", &set),
    ];

    let options: ScanOptions = serde_json::from_str(r#"{ "types": ["set"] }"#).unwrap();

    let mut sink: Vec<Artifact> = Vec::new();
    let summary = scan::scan(&files, &mut sink, &options, || false).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(names(&sink), vec!["InSet"]);
}

/// Rejects every record after the first.
struct OneShot(usize);

impl ArtifactSink for OneShot {
    type Error = &'static str;

    fn post(&mut self, _: Option<&Path>, _: &Artifact) -> Result<(), Self::Error> {
        self.0 += 1;
        if self.0 > 1 { Err("full") } else { Ok(()) }
    }
}

#[test]
fn sink_failures_do_not_fail_files() {
    let device = Device::new();
    let set = set_header(3)
        .metadata(None)
        .i32(3)
        .waypoint(None, 0, 0, 0)
        .waypoint(None, 0, 0, 0)
        .waypoint(None, 0, 0, 0)
        .into_inner();
    let files = vec![device.app("s.set", &set)];

    let mut sink = OneShot(0);
    let summary = scan::scan(&files, &mut sink, &ScanOptions::default(), || false).unwrap();

    assert_eq!(summary.processed, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(summary.artifacts_posted, 1);
    assert_eq!(summary.artifacts_failed, 2);
}

#[cfg(feature = "geojson")]
#[test]
fn scan_into_feature_collection() {
    use alpinequest::artifact::geojson::FeatureCollectionSink;

    let device = Device::new();
    let files = vec![device.app("a.wpt", &waypoint_file("A", 10_000_000, 20_000_000, 0, 0))];

    let mut sink = FeatureCollectionSink::new();
    scan::scan(&files, &mut sink, &ScanOptions::default(), || false).unwrap();

    let collection = sink.into_feature_collection();
    let json = serde_json::to_value(&collection).unwrap();
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"][0]["geometry"]["type"], "Point");
    assert_eq!(json["features"][0]["properties"]["name"], "A");
}
