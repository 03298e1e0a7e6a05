//! Photo storage, upload and archive services.

pub mod archive;
pub mod storage;
pub mod upload;

pub use archive::build_archive;
pub use storage::{PhotoStore, sanitize_file_name};
pub use upload::{StagedPhoto, UploadedPhoto, receive_photo, save_photo};
