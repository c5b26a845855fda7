//! File transfer records.

use serde::{Deserialize, Serialize};

use crate::{FileId, JsonMap};

/// File as last reported by the backend, including transfer progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// File identifier.
    pub id: FileId,
    /// Exact size in bytes, 0 if unknown.
    #[serde(default)]
    pub size: i64,
    /// Approximate size in bytes when the exact size is unknown.
    #[serde(default)]
    pub expected_size: i64,
    /// Local copy state.
    #[serde(default)]
    pub local: LocalFile,
    /// Remote copy state.
    #[serde(default)]
    pub remote: RemoteFile,
    /// Every other field, as received.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl File {
    /// Download progress as a percentage in `0..=100`.
    ///
    /// Uses the exact size when known and the expected size otherwise.
    pub fn download_progress(&self) -> u8 {
        if self.local.is_downloading_completed {
            return 100;
        }
        let total = if self.size > 0 { self.size } else { self.expected_size };
        if total <= 0 || self.local.downloaded_size <= 0 {
            return 0;
        }
        let percent = self.local.downloaded_size.saturating_mul(100) / total;
        percent.clamp(0, 100) as u8
    }

    /// Local path once the download has completed.
    pub fn local_path(&self) -> Option<&str> {
        (self.local.is_downloading_completed && !self.local.path.is_empty())
            .then_some(self.local.path.as_str())
    }
}

/// Local copy of a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalFile {
    /// Local path, possibly empty.
    #[serde(default)]
    pub path: String,
    /// Whether the file can be downloaded.
    #[serde(default)]
    pub can_be_downloaded: bool,
    /// Whether a download is running.
    #[serde(default)]
    pub is_downloading_active: bool,
    /// Whether the local copy is complete.
    #[serde(default)]
    pub is_downloading_completed: bool,
    /// Bytes downloaded so far.
    #[serde(default)]
    pub downloaded_size: i64,
    /// Every other field, as received.
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Remote copy of a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Remote identifier.
    #[serde(default)]
    pub id: String,
    /// Identifier stable across sessions.
    #[serde(default)]
    pub unique_id: String,
    /// Whether an upload is running.
    #[serde(default)]
    pub is_uploading_active: bool,
    /// Whether the upload has completed.
    #[serde(default)]
    pub is_uploading_completed: bool,
    /// Bytes uploaded so far.
    #[serde(default)]
    pub uploaded_size: i64,
    /// Every other field, as received.
    #[serde(flatten)]
    pub extra: JsonMap,
}
