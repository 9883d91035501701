//! Checks run on a chosen spreadsheet before it is posted for import.

use crate::error::UploadError;

pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
const EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];

/// Accepts a file by name and size (bytes, as the browser reports it).
pub fn check_upload(name: &str, size: f64) -> Result<(), UploadError> {
    if !EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        return Err(UploadError::NotExcel {
            name: name.to_string(),
        });
    }
    let bytes = size.max(0.0) as u64;
    if bytes == 0 {
        return Err(UploadError::Empty);
    }
    if bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { bytes });
    }
    Ok(())
}
