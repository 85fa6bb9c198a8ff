use crate::shared::error::ReleaseHelperError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a module descriptor (10 MB)
///
/// Real-world pom.xml files stay far below this; anything larger is treated
/// as hostile input rather than parsed.
pub const MAX_DESCRIPTOR_SIZE: u64 = 10 * 1024 * 1024;

fn read_error(path: &Path, details: String) -> anyhow::Error {
    ReleaseHelperError::FileReadError {
        path: path.to_path_buf(),
        details,
    }
    .into()
}

fn symlink_error(path: &Path, operation: &str) -> anyhow::Error {
    ReleaseHelperError::SecurityError {
        path: path.to_path_buf(),
        reason: format!("{} operations on symbolic links are not allowed", operation),
        hint: "Point the tool at the real file instead of a symbolic link".to_string(),
    }
    .into()
}

/// Validates that a path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` instead of `metadata()` so the link itself is
/// checked, not the target it points to.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
///
/// # Errors
/// Returns [`ReleaseHelperError::SecurityError`] for a symbolic link and
/// [`ReleaseHelperError::FileReadError`] if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        read_error(
            path,
            format!("cannot read metadata for {} operation: {}", operation, e),
        )
    })?;

    if metadata.is_symlink() {
        return Err(symlink_error(path, operation));
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "pom.xml") for error messages
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        read_error(path, format!("cannot read {} metadata: {}", file_description, e))
    })?;

    if metadata.is_symlink() {
        return Err(symlink_error(path, "read"));
    }

    if !metadata.is_file() {
        return Err(read_error(
            path,
            format!("{} is not a regular file", file_description),
        ));
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(ReleaseHelperError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "file is too large ({} bytes, maximum is {} bytes)",
                file_size, max_size
            ),
            hint: "Module descriptors of this size are not supported".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reads a descriptor file after running every safety check on it
///
/// # Errors
/// Returns an error if the file is missing, a symlink, not a regular file,
/// larger than [`MAX_DESCRIPTOR_SIZE`], or not valid UTF-8.
pub fn read_descriptor_file(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description)?;

    let size = fs::metadata(path)
        .map_err(|e| read_error(path, format!("cannot read {} metadata: {}", file_description, e)))?
        .len();
    validate_file_size(size, path, MAX_DESCRIPTOR_SIZE)?;

    fs::read_to_string(path).map_err(|e| read_error(path, e.to_string()))
}
