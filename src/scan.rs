//! Enumerating candidate files and feeding them through decoding and synthesis.
//!
//! Files are processed one at a time on the calling thread. Cancellation is
//! polled between files only; a file being decoded always runs to completion
//! or failure.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    artifact::{ArtifactSink, PostSummary, post_all},
    decode::{self, Reader},
    format::{self, FileKind},
    options::{FailurePolicy, ScanOptions},
};

/// A file which could not be processed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: decode::Error,
    },
}

impl ScanError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}

/// The type of a file if a scan should pick it up.
///
/// The extension selects the type; the parent directory must contain the
/// folder marker unless the options waive it.
pub fn candidate_kind(path: &Path, options: &ScanOptions) -> Option<FileKind> {
    let kind = FileKind::from_path(path)?;

    if !options.should_include(kind) {
        return None;
    }

    let parent = path.parent()?.to_string_lossy();
    options.matches_folder(&parent).then_some(kind)
}

/// All candidate files under `root`, sorted by path.
pub fn discover(root: &Path, options: &ScanOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), "Skipping unreadable entry: {e}");
                continue;
            }
        };

        if entry.file_type().is_file() && candidate_kind(entry.path(), options).is_some() {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}

/// Decode one file and post its records.
pub fn process_file<S: ArtifactSink + ?Sized>(
    path: &Path,
    kind: FileKind,
    sink: &mut S,
) -> Result<PostSummary, ScanError> {
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut r = Reader::with_source(BufReader::new(file), path);
    let decoded = format::decode_reader(kind, &mut r).map_err(|source| ScanError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), ?kind, bytes = r.offset(), "Decoded file");

    Ok(post_all(sink, Some(path), &decoded.artifacts()))
}

/// Totals over a scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Files decoded successfully.
    pub processed: usize,
    /// Files skipped after failing to open or decode.
    pub failed: Vec<ScanError>,
    pub artifacts_posted: usize,
    pub artifacts_failed: usize,
    /// Whether the scan stopped early on request.
    pub cancelled: bool,
}

/// Process each candidate in turn.
///
/// Paths which are not candidates are ignored. `is_cancelled` is polled before
/// each file. Under [`FailurePolicy::Abort`] the first failing file ends the
/// scan with its error; otherwise it is logged, recorded and skipped.
pub fn scan<I, S, C>(
    files: I,
    sink: &mut S,
    options: &ScanOptions,
    mut is_cancelled: C,
) -> Result<ScanSummary, ScanError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
    S: ArtifactSink + ?Sized,
    C: FnMut() -> bool,
{
    let candidates: Vec<(PathBuf, FileKind)> = files
        .into_iter()
        .filter_map(|path| {
            let path = path.as_ref();
            candidate_kind(path, options).map(|kind| (path.to_path_buf(), kind))
        })
        .collect();

    info!(candidates = candidates.len(), "Starting scan");

    let mut summary = ScanSummary::default();

    for (path, kind) in candidates {
        if is_cancelled() {
            info!(processed = summary.processed, "Scan cancelled");
            summary.cancelled = true;
            break;
        }

        match process_file(&path, kind, sink) {
            Ok(posted) => {
                summary.processed += 1;
                summary.artifacts_posted += posted.posted;
                summary.artifacts_failed += posted.failed;
            }
            Err(e) => match options.on_decode_error {
                FailurePolicy::Abort => return Err(e),
                FailurePolicy::SkipFile => {
                    warn!("Skipping file: {e}");
                    summary.failed.push(e);
                }
            },
        }
    }

    debug!(
        processed = summary.processed,
        failed = summary.failed.len(),
        posted = summary.artifacts_posted,
        "Scan finished"
    );

    Ok(summary)
}
