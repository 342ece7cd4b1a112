use std::fs;
use std::path::{Path, PathBuf};

use crate::directives::{DirectiveKind, DirectiveList};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn read_existing(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Read a transcription and return its rows
pub fn read_transcription(path: &Path) -> Result<Vec<String>, IoError> {
    let text = read_existing(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Read and split a directive list of the given kind
pub fn read_directive_list(path: &Path, kind: DirectiveKind) -> Result<DirectiveList, IoError> {
    let text = read_existing(path)?;
    let list = DirectiveList::parse(kind, &text);
    log::debug!(
        "read {} {} rows from {}",
        list.rows.len(),
        kind,
        path.display()
    );
    Ok(list)
}

/// Write the serialized document
pub fn write_output(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}
