//! Advisory lock serializing writers of one store file.
//!
//! `set` is a read-modify-write of the whole store.  Without a lock two
//! concurrent writers can both read the old mapping and the second
//! rename silently drops the first writer's key.  Writers therefore
//! hold an exclusive `flock(2)` on a sidecar `<store>.lock` file for
//! the whole cycle.  The store file itself is never locked because it
//! is replaced by rename on every write.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Path of the sidecar lock file for a store, e.g. `secrets.db.lock`.
pub fn lock_path_for(store_path: &Path) -> PathBuf {
    let mut name = store_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Held exclusive lock.  Released when dropped (closing the file
/// descriptor drops the `flock`).
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Block until the exclusive lock for `store_path` is acquired.
    ///
    /// Creates the lock file (and its parent directory) if needed.
    pub fn exclusive(store_path: &Path) -> Result<Self> {
        let path = lock_path_for(store_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        lock_exclusive(&file)?;
        tracing::debug!(lock = %path.display(), "acquired store lock");

        Ok(Self { _file: file, path })
    }

    /// Path of the lock file backing this guard.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn lock_exclusive(file: &File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    loop {
        // SAFETY: the descriptor is owned by `file` and stays open for
        // the duration of the call.
        let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
        if rc == 0 {
            return Ok(());
        }
        let err = std::io::Error::last_os_error();
        if err.kind() != std::io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(not(unix))]
fn lock_exclusive(_file: &File) -> std::io::Result<()> {
    tracing::warn!("advisory locking is not supported on this platform; concurrent writers may lose updates");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_path_appends_suffix() {
        assert_eq!(
            lock_path_for(Path::new("/tmp/secrets.db")),
            PathBuf::from("/tmp/secrets.db.lock")
        );
        assert_eq!(
            lock_path_for(Path::new("secrets.db")),
            PathBuf::from("secrets.db.lock")
        );
    }

    #[test]
    fn lock_can_be_reacquired_after_drop() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("secrets.db");

        let first = StoreLock::exclusive(&store).unwrap();
        assert!(first.path().exists());
        drop(first);

        let second = StoreLock::exclusive(&store).unwrap();
        drop(second);
    }

    #[cfg(unix)]
    #[test]
    fn second_locker_waits_for_the_first() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;
        use std::time::Duration;

        let dir = TempDir::new().unwrap();
        let store = dir.path().join("secrets.db");
        let released = Arc::new(AtomicBool::new(false));

        let guard = StoreLock::exclusive(&store).unwrap();

        let waiter = {
            let store = store.clone();
            let released = Arc::clone(&released);
            std::thread::spawn(move || {
                let _guard = StoreLock::exclusive(&store).unwrap();
                released.load(Ordering::SeqCst)
            })
        };

        std::thread::sleep(Duration::from_millis(100));
        released.store(true, Ordering::SeqCst);
        drop(guard);

        assert!(
            waiter.join().unwrap(),
            "second lock must not be granted while the first is held"
        );
    }
}
