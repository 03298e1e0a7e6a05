//! Local photo store.
//!
//! Layout under the store root:
//! - `{worksheet_id}/{file_name}`: uploaded photos
//! - `temp/`: in-flight uploads and generated zip archives

use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Directory name for uploads in progress and download archives.
pub const TEMP_DIR: &str = "temp";

/// Handle on the store root directory, shared as app data.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a worksheet's photos.
    pub fn photo_dir(&self, worksheet_id: i32) -> PathBuf {
        self.root.join(worksheet_id.to_string())
    }

    /// Final location of an uploaded photo.
    pub fn photo_path(&self, worksheet_id: i32, file_name: &str) -> PathBuf {
        self.photo_dir(worksheet_id).join(file_name)
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.join(TEMP_DIR)
    }

    /// File name of a worksheet's download archive.
    pub fn archive_name(worksheet_id: i32) -> String {
        format!("photo_{}.zip", worksheet_id)
    }

    pub fn archive_path(&self, worksheet_id: i32) -> PathBuf {
        self.temp_dir().join(Self::archive_name(worksheet_id))
    }

    /// Create the store root and temp directory.
    pub async fn ensure_layout(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(self.temp_dir())
            .await
            .map_err(|e| AppError::FileSystem(format!("Failed to create store directory: {}", e)))
    }
}

/// Reduce a client-supplied file name to its base name.
///
/// Both `/` and `\` count as separators. An empty result or `..` is rejected.
pub fn sanitize_file_name(raw: &str) -> AppResult<String> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        return Err(AppError::InvalidInput(format!("Invalid file name: {:?}", raw)));
    }

    Ok(base.to_string())
}
