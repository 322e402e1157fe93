//! Primary store: identifier → synset resolution.
//!
//! [`SynsetSource`] is the single resolution interface. The loader picks one
//! implementation at construction:
//!
//! - [`EagerStore`]: every record decoded up front into a hash map.
//! - [`LazyStore`]: a [`FileIndex`] plus a bounded [`LruCache`]; records are
//!   decoded on first access. The cache sits behind one exclusive lock because
//!   reads update recency.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::cache::LruCache;
use crate::decode::{decode, scan_records, ScanOutcome};
use crate::error::Result;
use crate::file_index::{read_line_at, FileIndex};
use crate::model::{Synset, SynsetId};

pub trait SynsetSource: Send + Sync {
    /// Resolve one id. `Ok(None)` is a plain miss; `Err` is an I/O failure.
    fn fetch(&self, id: &SynsetId) -> Result<Option<Arc<Synset>>>;

    /// Number of ids this source can resolve.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fully materialized synsets, in first-seen order.
    fn resident(&self) -> Box<dyn Iterator<Item = &Arc<Synset>> + '_>;

    fn as_lazy(&self) -> Option<&LazyStore> {
        None
    }

    fn as_lazy_mut(&mut self) -> Option<&mut LazyStore> {
        None
    }
}

// ============================================================================
// Eager
// ============================================================================

#[derive(Debug, Default)]
pub struct EagerStore {
    synsets: AHashMap<SynsetId, Arc<Synset>>,
    /// First-seen order of ids. A duplicate id replaces the synset but keeps
    /// its original position.
    order: Vec<SynsetId>,
}

impl EagerStore {
    pub fn load(path: &Path) -> Result<(Self, ScanOutcome)> {
        let mut store = Self::default();
        let outcome = scan_records::<Synset, _>(path, |synset, _| store.insert(synset))?;
        Ok((store, outcome))
    }

    /// Last write wins.
    pub fn insert(&mut self, synset: Synset) {
        let id = synset.offset;
        if self.synsets.insert(id, Arc::new(synset)).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &SynsetId) -> Option<&Arc<Synset>> {
        self.synsets.get(id)
    }
}

impl SynsetSource for EagerStore {
    fn fetch(&self, id: &SynsetId) -> Result<Option<Arc<Synset>>> {
        Ok(self.synsets.get(id).cloned())
    }

    fn len(&self) -> usize {
        self.synsets.len()
    }

    fn resident(&self) -> Box<dyn Iterator<Item = &Arc<Synset>> + '_> {
        Box::new(self.order.iter().filter_map(|id| self.synsets.get(id)))
    }
}

// ============================================================================
// On-demand
// ============================================================================

#[derive(Debug)]
pub struct LazyStore {
    path: PathBuf,
    index: FileIndex,
    /// Entries pinned outside the cache; checked before it.
    pinned: AHashMap<SynsetId, Arc<Synset>>,
    pinned_order: Vec<SynsetId>,
    cache: Mutex<LruCache<SynsetId, Arc<Synset>>>,
}

impl LazyStore {
    /// A store that resolves nothing until [`LazyStore::build`] replaces it.
    pub fn empty(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            index: FileIndex::default(),
            pinned: AHashMap::new(),
            pinned_order: Vec::new(),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn build(path: &Path, capacity: usize) -> Result<(Self, ScanOutcome)> {
        let (index, outcome) = FileIndex::build(path)?;
        let mut store = Self::empty(path, capacity);
        store.index = index;
        Ok((store, outcome))
    }

    pub fn file_index(&self) -> &FileIndex {
        &self.index
    }

    /// Decode one record straight from disk, bypassing cache and pins.
    fn read_record(&self, id: &SynsetId) -> Result<Option<Synset>> {
        let Some(offset) = self.index.get(id) else {
            return Ok(None);
        };
        let line = read_line_at(&self.path, offset)?;
        match decode::<Synset>(&line) {
            Ok(synset) => Ok(Some(synset)),
            Err(err) => {
                tracing::debug!(
                    path = %self.path.display(),
                    id = %id,
                    offset,
                    error = %err,
                    "indexed record failed to decode"
                );
                Ok(None)
            }
        }
    }

    /// Keep `id` resident outside the LRU. Returns `false` if it cannot be
    /// resolved.
    pub fn pin(&mut self, id: &SynsetId) -> Result<bool> {
        if self.pinned.contains_key(id) {
            return Ok(true);
        }
        match self.read_record(id)? {
            Some(synset) => {
                self.pinned.insert(*id, Arc::new(synset));
                self.pinned_order.push(*id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn pinned_len(&self) -> usize {
        self.pinned.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.lock().capacity()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn cache_contains(&self, id: &SynsetId) -> bool {
        self.cache.lock().contains(id)
    }

    /// Cached ids, most recently used first.
    pub fn cached_ids(&self) -> Vec<SynsetId> {
        self.cache.lock().keys_by_recency().copied().collect()
    }
}

impl SynsetSource for LazyStore {
    fn fetch(&self, id: &SynsetId) -> Result<Option<Arc<Synset>>> {
        if let Some(synset) = self.pinned.get(id) {
            return Ok(Some(Arc::clone(synset)));
        }
        if let Some(synset) = self.cache.lock().get(id) {
            return Ok(Some(Arc::clone(synset)));
        }

        // The lock is not held across file I/O.
        let Some(synset) = self.read_record(id)? else {
            return Ok(None);
        };
        let synset = Arc::new(synset);
        self.cache.lock().put(*id, Arc::clone(&synset));
        Ok(Some(synset))
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn resident(&self) -> Box<dyn Iterator<Item = &Arc<Synset>> + '_> {
        Box::new(
            self.pinned_order
                .iter()
                .filter_map(|id| self.pinned.get(id)),
        )
    }

    fn as_lazy(&self) -> Option<&LazyStore> {
        Some(self)
    }

    fn as_lazy_mut(&mut self) -> Option<&mut LazyStore> {
        Some(self)
    }
}
