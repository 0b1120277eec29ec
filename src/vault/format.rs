//! Store file I/O and Secret Mapping serialization.
//!
//! The store file is a single opaque blob:
//!
//! ```text
//! [nonce: 12 bytes][GCM tag: 16 bytes][AES-256-GCM ciphertext]
//! ```
//!
//! Once decrypted, the payload is a UTF-8 JSON object mapping string
//! keys to string values, e.g. `{"k1":"v1","k2":"v2"}`.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::errors::{Result, SecretError};

/// The decrypted content of a vault.  A `BTreeMap` keeps the
/// serialized form deterministic.
pub type SecretMap = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialize the mapping to JSON bytes.
///
/// The buffer is wiped on drop since it holds every secret in clear.
pub fn serialize_map(map: &SecretMap) -> Result<Zeroizing<Vec<u8>>> {
    serde_json::to_vec(map)
        .map(Zeroizing::new)
        .map_err(|e| SecretError::CorruptStore(format!("cannot serialize secrets: {e}")))
}

/// Parse decrypted JSON bytes back into a mapping.
pub fn deserialize_map(plaintext: &[u8]) -> Result<SecretMap> {
    serde_json::from_slice(plaintext)
        .map_err(|e| SecretError::CorruptStore(format!("secrets JSON: {e}")))
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read the whole store file.
///
/// Returns `Ok(None)` only when the file does not exist.  Every other
/// I/O failure (permissions, path is a directory, ...) is returned as is.
pub fn read_store(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replace the store file with `data` **atomically**.
///
/// 1. Write to a uniquely named temp file in the same directory.
/// 2. Flush it to disk.
/// 3. Rename the temp file over the target path.
///
/// Readers see either the previous file or the new one, never a
/// half-written file.  On failure the temp file is removed and the
/// target is left untouched.
pub fn write_store_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    if let Err(e) = write_and_sync(&tmp_path, data) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    // Same directory, so the rename stays on one filesystem.
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Build a sibling temp path like `.secrets.db.5f3a...tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    let suffix: u64 = rand::random();
    parent.join(format!(".{name}.{suffix:016x}.tmp"))
}

fn write_and_sync(tmp_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    // Owner-only on Unix: the blob is encrypted, but nobody else needs it.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()
}
