//! Filesystem adapter. Reads the document the user picked into a `SelectedFile`.

use crate::domain::{DomainError, SelectedFile};
use std::path::Path;
use tracing::debug;

/// Read a document from disk. The file name (not the full path) is what gets uploaded.
pub async fn read_selected_file(path: &Path) -> Result<SelectedFile, DomainError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DomainError::File(format!("Not a file path: {}", path.display())))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::File(format!("Failed to read {}: {}", path.display(), e)))?;

    debug!(path = %path.display(), bytes = bytes.len(), "document read");
    Ok(SelectedFile::new(name, bytes))
}
