use std::path::Path;

use anyhow::Context;

use super::error::ExplorerError;

/// One uploaded file: its display name and fully buffered contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        UploadedFile {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read the whole file into memory.
    pub fn from_path(path: &Path) -> Result<Self, ExplorerError> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(UploadedFile {
            name: display_name(path),
            bytes,
        })
    }
}

/// The name shown for a file: its last path component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Whether a file name carries the `.csv` extension (case-insensitive).
pub fn has_csv_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}
