//! Conversation snapshots as `MessagePack`.
//!
//! Save files hold one [`Snapshot`]: the numbers and character names of a
//! conversation, keyed by conversation name.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use parley_foundation::{Error, ErrorKind, Result};
use parley_script::Snapshot;

/// Serializes a snapshot to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(snapshot: &Snapshot) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(snapshot)
        .map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a snapshot from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Snapshot> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!(
        "failed to {action} file '{}': {e}",
        path.display()
    )))
}

/// Saves a snapshot to a file, replacing any previous contents.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(snapshot)?;
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    log::debug!("saved {} to {}", snapshot.conversation, path.display());
    Ok(())
}

/// Loads a snapshot from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    from_bytes(&bytes)
}
