//! Per-path locks for file appends
//!
//! Writers that target the same path share one mutex; writers for
//! different paths never contend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

/// Registry of one mutex per file path.
///
/// Paths are keyed as given. Two spellings of the same file
/// (`a/../b.txt` vs `b.txt`) get separate locks.
///
/// Entries are never evicted: the map holds one mutex per distinct path
/// seen over the registry's lifetime.
#[derive(Debug, Default)]
pub struct PathLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the mutex guarding `path`.
    ///
    /// The registry lock is released before returning, so holding the
    /// returned mutex never blocks writers of other paths.
    pub fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        let lock = locks
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                trace!("lock_for: new lock for {}", path.display());
                Arc::new(Mutex::new(()))
            });
        Arc::clone(lock)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_same_path_when_locking_twice_then_returns_same_mutex() {
        let locks = PathLocks::new();
        let a = locks.lock_for(Path::new("/tmp/Error.txt"));
        let b = locks.lock_for(Path::new("/tmp/Error.txt"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn given_different_paths_when_one_is_held_then_other_is_free() {
        let locks = PathLocks::new();
        let warning = locks.lock_for(Path::new("/tmp/Warning.txt"));
        let error = locks.lock_for(Path::new("/tmp/Error.txt"));

        let _held = warning.lock();
        assert!(error.try_lock().is_some());
        assert!(warning.try_lock().is_none());
    }

    #[test]
    fn given_released_locks_when_locking_new_paths_then_registry_keeps_every_entry() {
        let locks = PathLocks::new();
        for name in ["a.txt", "b.txt", "a.txt", "c.txt"] {
            let lock = locks.lock_for(Path::new(name));
            drop(lock.lock());
        }
        assert_eq!(locks.len(), 3);
    }
}
