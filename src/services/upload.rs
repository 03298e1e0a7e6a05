//! Photo upload: multipart parsing shared by the browser and API handlers.
//!
//! The `uploadFile` part is streamed to a temp file under `{store}/temp`.
//! [`save_photo`] records the row first and only then moves the file to
//! `{store}/{worksheet_id}/{file_name}`, replacing any earlier photo with the
//! same name. A rejected insert leaves the stored photos untouched.

use actix_multipart::{Field, Multipart};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::storage::{PhotoStore, sanitize_file_name};
use crate::db::DbPool;
use crate::entity::photo;
use crate::error::{AppError, AppResult};

/// Multipart field carrying the photo.
pub const FILE_FIELD: &str = "uploadFile";
/// Multipart field carrying the optional running number.
pub const RUNNING_NUMBER_FIELD: &str = "running_number";

static UPLOAD_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Result of reading an upload form.
#[derive(Debug, Default)]
pub struct UploadedPhoto {
    /// Staged file, `None` when the form carried no file.
    pub file: Option<StagedPhoto>,
    /// Requested running number; blank or unparsable reads as `None`.
    pub running_number: Option<i32>,
}

/// An uploaded file waiting in the temp directory.
#[derive(Debug)]
pub struct StagedPhoto {
    /// Sanitized base name the photo will be stored under
    pub file_name: String,
    temp_path: PathBuf,
    size: usize,
}

impl StagedPhoto {
    /// Remove the temp file.
    pub async fn discard(self) {
        remove_quietly(&self.temp_path).await;
    }
}

/// Read an upload form, staging its file in the temp directory.
pub async fn receive_photo(
    payload: &mut Multipart,
    store: &PhotoStore,
    max_upload_size: usize,
) -> AppResult<UploadedPhoto> {
    let mut running_number = None;
    let mut streamed: Option<StagedPhoto> = None;
    let mut total_size: usize = 0;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                discard(streamed.take()).await;
                return Err(e.into());
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        let result = match name.as_str() {
            RUNNING_NUMBER_FIELD => read_text(&mut field, &mut total_size, max_upload_size)
                .await
                .map(|text| running_number = text.trim().parse::<i32>().ok()),
            FILE_FIELD => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or_default()
                    .to_string();

                if file_name.is_empty() {
                    drain_field(&mut field).await;
                    Ok(())
                } else {
                    let file = stream_to_temp(
                        &mut field,
                        store,
                        &file_name,
                        &mut total_size,
                        max_upload_size,
                    )
                    .await;
                    match file {
                        Ok(file) => {
                            discard(streamed.replace(file)).await;
                            Ok(())
                        }
                        Err(e) => Err(e),
                    }
                }
            }
            _ => {
                drain_field(&mut field).await;
                Ok(())
            }
        };

        if let Err(e) = result {
            discard(streamed.take()).await;
            return Err(e);
        }
    }

    Ok(UploadedPhoto {
        file: streamed,
        running_number,
    })
}

/// Record the photo row, then move the staged file into place.
///
/// The temp file is discarded when the insert fails. If the move fails the row
/// is removed again.
pub async fn save_photo(
    pool: &DbPool,
    store: &PhotoStore,
    worksheet_id: i32,
    file: StagedPhoto,
    running_number: Option<i32>,
) -> AppResult<photo::Model> {
    let inserted = match pool
        .insert_photo(worksheet_id, running_number, &file.file_name)
        .await
    {
        Ok(inserted) => inserted,
        Err(e) => {
            file.discard().await;
            return Err(e);
        }
    };

    let final_path = store.photo_path(worksheet_id, &file.file_name);
    if let Err(e) = move_into_place(&file.temp_path, &final_path).await {
        file.discard().await;
        if let Err(undo) = pool.delete_photo(inserted.id).await {
            warn!(photo_id = inserted.id, "Failed to remove photo row after move error: {}", undo);
        }
        return Err(e);
    }

    info!(
        worksheet_id,
        file_name = %file.file_name,
        size = file.size,
        running_number = inserted.running_number,
        "Stored photo"
    );

    Ok(inserted)
}

/// Stream the file part to a fresh temp file, enforcing the body cap.
async fn stream_to_temp(
    field: &mut Field,
    store: &PhotoStore,
    raw_name: &str,
    total_size: &mut usize,
    max_upload_size: usize,
) -> AppResult<StagedPhoto> {
    let file_name = sanitize_file_name(raw_name)?;

    let temp_dir = store.temp_dir();
    tokio::fs::create_dir_all(&temp_dir)
        .await
        .map_err(|e| AppError::FileSystem(format!("Failed to create temp directory: {}", e)))?;

    let temp_path = temp_dir.join(format!(
        "upload_{}_{}",
        std::process::id(),
        UPLOAD_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let mut temp_file = tokio::fs::File::create(&temp_path)
        .await
        .map_err(|e| AppError::FileSystem(format!("Failed to create temp file: {}", e)))?;

    let mut size: usize = 0;
    while let Some(chunk) = field.next().await {
        let chunk_data = match chunk {
            Ok(data) => data,
            Err(e) => {
                remove_quietly(&temp_path).await;
                return Err(e.into());
            }
        };

        size += chunk_data.len();
        *total_size += chunk_data.len();
        if *total_size > max_upload_size {
            remove_quietly(&temp_path).await;
            return Err(AppError::PayloadTooLarge(max_upload_size));
        }

        if let Err(e) = temp_file.write_all(&chunk_data).await {
            remove_quietly(&temp_path).await;
            return Err(AppError::FileSystem(format!("Failed to write temp file: {}", e)));
        }
    }
    if let Err(e) = temp_file.flush().await {
        remove_quietly(&temp_path).await;
        return Err(AppError::FileSystem(format!("Failed to write temp file: {}", e)));
    }

    Ok(StagedPhoto {
        file_name,
        temp_path,
        size,
    })
}

/// Collect a small text part.
async fn read_text(
    field: &mut Field,
    total_size: &mut usize,
    max_upload_size: usize,
) -> AppResult<String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk_data = chunk?;
        *total_size += chunk_data.len();
        if *total_size > max_upload_size {
            return Err(AppError::PayloadTooLarge(max_upload_size));
        }
        bytes.extend_from_slice(&chunk_data);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn move_into_place(temp_path: &Path, final_path: &Path) -> AppResult<()> {
    if let Some(parent) = final_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::FileSystem(format!("Failed to create photo directory: {}", e)))?;
    }

    tokio::fs::rename(temp_path, final_path)
        .await
        .map_err(|e| AppError::FileSystem(format!("Failed to move photo into place: {}", e)))
}

async fn discard(file: Option<StagedPhoto>) {
    if let Some(file) = file {
        file.discard().await;
    }
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove temp upload {}: {}", path.display(), e);
    }
}

/// Drain a multipart field without saving.
async fn drain_field(field: &mut Field) {
    while let Some(chunk) = field.next().await {
        let _ = chunk;
    }
}
