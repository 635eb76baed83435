//! Small file primitives shared by the adapter.
//!
//! Every write is temp-file + rename in the target directory, so a crash
//! mid-write never leaves a half-written document behind. A missing file
//! on read means "nothing stored yet", not an error.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use oswitch_core::ports::HostError;

fn io_err(path: &Path, e: &std::io::Error) -> HostError {
    HostError::Storage(format!("{}: {e}", path.display()))
}

/// Read and parse a JSON document, falling back to `T::default()` when the
/// file does not exist.
pub(crate) async fn read_json_or_default<T>(path: &Path) -> Result<T, HostError>
where
    T: DeserializeOwned + Default,
{
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(io_err(path, &e)),
    };
    serde_json::from_str(&content)
        .map_err(|e| HostError::Serialization(format!("{}: {e}", path.display())))
}

/// Serialize a document as pretty JSON and write it atomically.
pub(crate) async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), HostError> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| HostError::Serialization(e.to_string()))?;
    write_text_atomic(path, &content).await
}

/// Read a text file, `None` when it does not exist.
pub(crate) async fn read_text_optional(path: &Path) -> Result<Option<String>, HostError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, &e)),
    }
}

/// Write a text file atomically, creating parent directories as needed.
pub(crate) async fn write_text_atomic(path: &Path, content: &str) -> Result<(), HostError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_err(parent, &e))?;
    }

    // Temp file in the same directory so the rename stays on one filesystem.
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    tokio::fs::write(&tmp, content)
        .await
        .map_err(|e| io_err(&tmp, &e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| io_err(path, &e))?;
    Ok(())
}
