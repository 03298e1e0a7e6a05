//! Zip archives of a worksheet's photos.
//!
//! Blocking file I/O; call through `web::block`.

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::storage::PhotoStore;
use crate::error::{AppError, AppResult};

/// Write `{store}/temp/photo_{id}.zip` with every file under the worksheet's
/// photo directory and return its path.
///
/// Entries use the file's base name. A missing photo directory yields an empty
/// archive. Any I/O error aborts and removes the partial archive. Concurrent
/// builds of one worksheet never share a partial file.
pub fn build_archive(store: &PhotoStore, worksheet_id: i32) -> AppResult<PathBuf> {
    let temp_dir = store.temp_dir();
    std::fs::create_dir_all(&temp_dir)
        .map_err(|e| AppError::FileSystem(format!("Failed to create temp directory: {}", e)))?;

    let target = store.archive_path(worksheet_id);
    // Each build writes its own partial file; a failed build drops it.
    let partial = NamedTempFile::new_in(&temp_dir)
        .map_err(|e| AppError::FileSystem(format!("Failed to create partial archive: {}", e)))?;

    let count = write_archive(&store.photo_dir(worksheet_id), partial.as_file())?;
    partial
        .persist(&target)
        .map_err(|e| AppError::FileSystem(format!("Failed to publish archive: {}", e.error)))?;

    info!(worksheet_id, files = count, path = %target.display(), "Built photo archive");
    Ok(target)
}

fn write_archive(photo_dir: &Path, dest: &File) -> AppResult<usize> {
    let mut files = Vec::new();
    if photo_dir.is_dir() {
        collect_files(photo_dir, &mut files)?;
    }

    let mut zip = ZipWriter::new(dest);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut seen = HashSet::new();
    for path in &files {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        // Flattening can map two files onto one entry name; first one wins
        if !seen.insert(name.clone()) {
            warn!("Skipping duplicate archive entry {}", path.display());
            continue;
        }

        zip.start_file(name, options)?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut zip)?;
    }

    zip.finish()?;
    Ok(seen.len())
}

/// Regular files below `dir`, depth first, in name order.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}
