use serde::{Deserialize, Serialize};

/// A single file recorded in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the snapshot root, always `/`-separated.
    pub path: String,
    /// The decoded text of the file.
    ///
    /// `None` when content was suppressed, the file exceeded the size ceiling,
    /// or the file was detected as binary. The key is omitted from JSON in that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A file or directory that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub path: String,
    pub error: String,
}

/// The complete snapshot document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SnapshotResult {
    /// A `tree`-like rendering of the included entries, only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_structure: Option<String>,
    /// Files in traversal order.
    pub files: Vec<FileEntry>,
    /// Per-file failures in traversal order; omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorEntry>,
}
