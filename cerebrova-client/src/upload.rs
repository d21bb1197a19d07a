use crate::error::{ClientError, Result};
use std::path::Path;
use tracing::debug;

/// Extensions accepted by the upload form.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// An image file read into memory, ready to be previewed or uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Read a file from disk without blocking the runtime.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Other(format!("Not a file: {}", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} ({} bytes)", path.display(), bytes.len());

        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Mirrors the form's `accept=".jpg,.jpeg,.png"` filter.
pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}
