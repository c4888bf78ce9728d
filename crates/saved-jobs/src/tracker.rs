//! The saved-jobs tracker.

use std::sync::{Mutex, MutexGuard, PoisonError};

use job_data::JobId;
use tracing::{info, warn};

use crate::error::Result;
use crate::store::{SavedSet, SavedStore};

/// Tracks which jobs the user has saved and writes every change through to
/// a [`SavedStore`].
///
/// Each toggle holds the in-process `Mutex` and the store's write lock while
/// it reloads the stored set, flips one id and saves. Trackers in other
/// threads or processes sharing the same store therefore never overwrite
/// each other's changes. If a write fails the in-memory set is left matching
/// what the store still holds.
pub struct SavedJobs<S: SavedStore> {
    store: S,
    saved: Mutex<SavedSet>,
}

impl<S: SavedStore> SavedJobs<S> {
    /// Load the saved set from `store`.
    ///
    /// A store that cannot be read or parsed is treated as empty. The failure
    /// is logged and the next successful write replaces the bad data.
    pub fn open(store: S) -> Self {
        let saved = load_or_empty(&store);
        info!("Loaded {} saved jobs from {}", saved.len(), store.name());

        Self {
            store,
            saved: Mutex::new(saved),
        }
    }

    /// Flip the saved state of `job_id` and persist the result.
    ///
    /// The flip applies to the set as currently stored, not to the copy
    /// loaded at [`open`](Self::open). Returns the set as it stands after the
    /// flip. On a write failure nothing is flipped and the store error is
    /// returned.
    pub fn toggle(&self, job_id: JobId) -> Result<SavedSet> {
        let mut saved = self.state();
        let _lock = self.store.lock()?;

        let current = load_or_empty(&self.store);
        let mut next = current.clone();
        if !next.remove(&job_id) {
            next.insert(job_id);
        }

        match self.store.save(&next) {
            Ok(()) => {
                *saved = next.clone();
                Ok(next)
            }
            Err(e) => {
                *saved = current;
                Err(e)
            }
        }
    }

    pub fn is_saved(&self, job_id: JobId) -> bool {
        self.state().contains(&job_id)
    }

    /// Snapshot of the current set
    pub fn saved(&self) -> SavedSet {
        self.state().clone()
    }

    pub fn len(&self) -> usize {
        self.state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().is_empty()
    }

    /// Unsave everything. Leaves the set untouched if the write fails.
    pub fn clear(&self) -> Result<()> {
        let mut saved = self.state();
        let _lock = self.store.lock()?;
        self.store.save(&SavedSet::new())?;
        saved.clear();
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn state(&self) -> MutexGuard<'_, SavedSet> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_or_empty<S: SavedStore>(store: &S) -> SavedSet {
    match store.load() {
        Ok(saved) => saved,
        Err(e) => {
            warn!("Could not load saved jobs from {}, treating as empty: {}", store.name(), e);
            SavedSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Store whose writes fail while `failing` is set
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    impl SavedStore for FlakyStore {
        fn name(&self) -> &str {
            "FlakyStore"
        }

        fn load(&self) -> Result<SavedSet> {
            self.inner.load()
        }

        fn save(&self, saved: &SavedSet) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Io {
                    path: "flaky".to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.save(saved)
        }
    }

    /// Store that cannot be read at all
    struct UnreadableStore;

    impl SavedStore for UnreadableStore {
        fn name(&self) -> &str {
            "UnreadableStore"
        }

        fn load(&self) -> Result<SavedSet> {
            Err(serde_json::from_str::<Vec<JobId>>("garbage").unwrap_err().into())
        }

        fn save(&self, _saved: &SavedSet) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let tracker = SavedJobs::open(MemoryStore::new());

        let after_add = tracker.toggle(7).unwrap();
        assert!(after_add.contains(&7));
        assert!(tracker.is_saved(7));

        let after_remove = tracker.toggle(7).unwrap();
        assert!(after_remove.is_empty());
        assert!(!tracker.is_saved(7));
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let tracker = SavedJobs::open(MemoryStore::with_ids([1, 2, 3]));
        let before = tracker.saved();

        for id in [2, 9] {
            tracker.toggle(id).unwrap();
            tracker.toggle(id).unwrap();
            assert_eq!(tracker.saved(), before);
        }
    }

    #[test]
    fn test_toggle_writes_through() {
        let tracker = SavedJobs::open(MemoryStore::new());
        tracker.toggle(4).unwrap();
        tracker.toggle(5).unwrap();
        assert_eq!(tracker.store().load().unwrap(), SavedSet::from([4, 5]));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let tracker = SavedJobs::open(FlakyStore::default());
        tracker.toggle(1).unwrap();

        tracker.store().failing.store(true, Ordering::SeqCst);
        assert!(tracker.toggle(1).is_err());
        assert!(tracker.is_saved(1));
        assert!(tracker.toggle(2).is_err());
        assert!(!tracker.is_saved(2));
        assert!(tracker.clear().is_err());
        assert_eq!(tracker.len(), 1);

        tracker.store().failing.store(false, Ordering::SeqCst);
        tracker.clear().unwrap();
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_unreadable_store_starts_empty() {
        let tracker = SavedJobs::open(UnreadableStore);
        assert!(tracker.is_empty());
        assert!(tracker.toggle(3).unwrap().contains(&3));
    }

    #[test]
    fn test_concurrent_toggles_serialize() {
        let tracker = Arc::new(SavedJobs::open(MemoryStore::new()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    for id in 0..50 {
                        tracker.toggle(id).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every id was flipped an even number of times
        assert!(tracker.is_empty());
        assert!(tracker.store().load().unwrap().is_empty());
    }
}
