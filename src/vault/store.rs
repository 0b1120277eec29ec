//! High-level vault operations used by CLI commands.
//!
//! `FileVault` binds a derived key to a store path and exposes the two
//! vault operations.  Nothing is cached between calls: every `get` and
//! `set` decrypts the whole file, and `set` re-encrypts and rewrites it.

use std::path::{Path, PathBuf};

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_key, DerivedKey};
use crate::errors::{Result, SecretError};

use super::format::{self, SecretMap};
use super::lock::StoreLock;

/// Handle to one encrypted store file.
///
/// Create one with `FileVault::open`, then call `get` / `set`.
#[derive(Debug)]
pub struct FileVault {
    /// Path to the store file on disk.
    path: PathBuf,

    /// Key derived from the passphrase (zeroized on drop).
    key: DerivedKey,

    /// Hold an exclusive advisory lock across `set`.
    locking: bool,
}

impl FileVault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Bind a passphrase-derived key to `path`.
    ///
    /// No I/O happens here; a missing or unreadable file only shows up
    /// on the first `get` or `set`.
    pub fn open(passphrase: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: derive_key(passphrase.as_bytes()),
            locking: true,
        }
    }

    /// Enable or disable the writer lock (enabled by default).
    ///
    /// With locking off, two processes running `set` at the same time
    /// can each read the old mapping, and the later rename then drops
    /// the other's key.  Only disable it for single-writer setups such
    /// as filesystems without `flock` support.
    pub fn with_locking(mut self, locking: bool) -> Self {
        self.locking = locking;
        self
    }

    // ------------------------------------------------------------------
    // Vault operations
    // ------------------------------------------------------------------

    /// Decrypt the store and return the value of `key`.
    ///
    /// A missing store file is an empty vault, so it yields
    /// `KeyNotFound` like any other absent key.
    pub fn get(&self, key: &str) -> Result<String> {
        let secrets = match self.load()? {
            Some(secrets) => secrets,
            None => {
                tracing::debug!(path = %self.path.display(), "store file absent");
                return Err(SecretError::KeyNotFound(key.to_string()));
            }
        };

        secrets
            .get(key)
            .cloned()
            .ok_or_else(|| SecretError::KeyNotFound(key.to_string()))
    }

    /// Insert or overwrite `key`, keeping every other key intact.
    ///
    /// The write is atomic: on error the file on disk is either the
    /// previous version or untouched.  Decrypt and parse failures on an
    /// existing file are returned, never treated as an empty vault.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = if self.locking {
            Some(StoreLock::exclusive(&self.path)?)
        } else {
            None
        };

        let mut secrets = match self.load()? {
            Some(secrets) => secrets,
            None => {
                tracing::debug!(path = %self.path.display(), "store file absent, starting empty");
                SecretMap::new()
            }
        };

        let replaced = secrets.insert(key.to_string(), value.to_string()).is_some();

        let plaintext = format::serialize_map(&secrets)?;
        let blob = encrypt(self.key.as_bytes(), &plaintext)?;
        format::write_store_atomic(&self.path, &blob)?;

        tracing::debug!(
            path = %self.path.display(),
            key,
            replaced,
            total = secrets.len(),
            "store rewritten"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if `set` takes the writer lock.
    pub fn locking(&self) -> bool {
        self.locking
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Read, decrypt and parse the store.  `None` means the file does
    /// not exist.
    fn load(&self) -> Result<Option<SecretMap>> {
        let Some(blob) = format::read_store(&self.path)? else {
            return Ok(None);
        };
        tracing::debug!(path = %self.path.display(), bytes = blob.len(), "read store file");

        let plaintext = decrypt(self.key.as_bytes(), &blob)?;
        format::deserialize_map(&plaintext).map(Some)
    }
}
