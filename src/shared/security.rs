use crate::shared::error::IngestError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum report file size (100 MB)
pub const MAX_REPORT_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a report path is a regular file within the size limit and
/// returns its size.
///
/// `symlink_metadata()` is used so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist or its metadata cannot be read
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than `max_size`
pub fn validate_report_file(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read report metadata: {}", e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    Ok(metadata.len())
}

/// Validates a database path before SQLite opens it.
///
/// A missing file is fine (SQLite creates it); an existing path must be a
/// regular file, never a directory or a symlink.
pub fn validate_database_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(IngestError::InvalidDatabasePath {
                path: path.to_path_buf(),
                reason: format!("Failed to read path metadata: {}", e),
            }
            .into())
        }
    };

    if metadata.is_symlink() {
        return Err(IngestError::InvalidDatabasePath {
            path: path.to_path_buf(),
            reason: "Security: database path is a symbolic link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(IngestError::InvalidDatabasePath {
            path: path.to_path_buf(),
            reason: "Not a regular file".to_string(),
        }
        .into());
    }

    Ok(())
}
