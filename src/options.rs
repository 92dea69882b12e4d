//! Scan configuration.

use serde::Deserialize;

use crate::format::FileKind;

/// Folder name fragment identifying application data.
pub const DEFAULT_FOLDER_MARKER: &str = "psyberia.alpinequest";

/// Options controlling which files a scan picks up and how failures are handled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    /// Substring a candidate's path must contain, ignoring ASCII case
    /// (default: `psyberia.alpinequest`)
    #[serde(default = "default_folder_marker")]
    pub folder_marker: String,

    /// Whether candidates must contain the folder marker (default: true)
    #[serde(default = "default_true")]
    pub require_folder_marker: bool,

    /// What to do when a file fails to decode (default: skip the file)
    #[serde(default)]
    pub on_decode_error: FailurePolicy,

    /// Which file types to decode (default: all)
    #[serde(default)]
    pub types: Option<Vec<FileKind>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            folder_marker: default_folder_marker(),
            require_folder_marker: true,
            on_decode_error: FailurePolicy::default(),
            types: None,
        }
    }
}

impl ScanOptions {
    pub fn should_include(&self, kind: FileKind) -> bool {
        match &self.types {
            None => true,
            Some(types) => types.contains(&kind),
        }
    }

    /// Whether the path lies under the application's folder.
    pub fn matches_folder(&self, path: &str) -> bool {
        if !self.require_folder_marker {
            return true;
        }

        let marker = self.folder_marker.to_ascii_lowercase();
        path.to_ascii_lowercase().contains(&marker)
    }
}

/// Reaction to a file that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Log the failure and continue with the next file.
    #[default]
    SkipFile,
    /// Stop the scan and return the error.
    Abort,
}

fn default_folder_marker() -> String {
    DEFAULT_FOLDER_MARKER.to_string()
}

fn default_true() -> bool {
    true
}
