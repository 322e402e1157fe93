//! Load orchestration and the query surface.
//!
//! Lifecycle: construct → [`WordNetLoader::load`] once → any number of reads.
//! `load` builds every index into locals and publishes them together, so a
//! failed load leaves the loader exactly as it was.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::config::LoaderConfig;
use crate::decode::ScanOutcome;
use crate::error::Result;
use crate::exceptions::{ExceptionIndex, ExceptionMap};
use crate::lemma_index::LemmaIndex;
use crate::model::{Category, Sense, Synset, SynsetId};
use crate::relation_index::{Direction, Relation, RelationFamily, RelationIndex};
use crate::sense_index::SenseIndex;
use crate::store::{EagerStore, LazyStore, SynsetSource};

/// What the last load pass saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// `false` when the primary file was absent and the dataset is empty.
    pub source_existed: bool,
    /// Records decoded (eager) or offsets indexed (lazy).
    pub records_indexed: usize,
    pub records_skipped: usize,
    pub senses_loaded: usize,
    pub senses_skipped: usize,
    pub exceptions_loaded: usize,
    pub exceptions_skipped: usize,
}

pub struct WordNetLoader {
    config: LoaderConfig,
    store: Box<dyn SynsetSource>,
    lemma_index: LemmaIndex,
    relation_index: RelationIndex,
    sense_index: SenseIndex,
    exceptions: ExceptionIndex,
    report: LoadReport,
    loaded: bool,
}

impl std::fmt::Debug for WordNetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordNetLoader")
            .field("config", &self.config)
            .field("loaded", &self.loaded)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl WordNetLoader {
    /// Build a loader. Loads immediately when `autoload` is set and the
    /// loader is not lazy.
    pub fn new(config: LoaderConfig) -> Result<Self> {
        let autoload = config.autoload && !config.lazy;
        let mut loader = Self::unloaded(config);
        if autoload {
            loader.load()?;
        }
        Ok(loader)
    }

    fn unloaded(config: LoaderConfig) -> Self {
        let store: Box<dyn SynsetSource> = if config.lazy {
            Box::new(LazyStore::empty(&config.data_path, config.cache_size))
        } else {
            Box::new(EagerStore::default())
        };
        Self {
            config,
            store,
            lemma_index: LemmaIndex::default(),
            relation_index: RelationIndex::default(),
            sense_index: SenseIndex::default(),
            exceptions: ExceptionIndex::default(),
            report: LoadReport::default(),
            loaded: false,
        }
    }

    /// Populate the store and every index. A second call is a no-op.
    ///
    /// Missing files (primary or sidecar) load as empty and undecodable lines
    /// are skipped; only other I/O failures are returned.
    pub fn load(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }

        let path = self.config.data_path.clone();
        let lazy = self.config.lazy;

        let (store, primary): (Box<dyn SynsetSource>, ScanOutcome) = if lazy {
            let (store, outcome) = LazyStore::build(&path, self.config.cache_size)?;
            (Box::new(store), outcome)
        } else {
            let (store, outcome) = EagerStore::load(&path)?;
            (Box::new(store), outcome)
        };
        if !primary.existed {
            tracing::warn!(
                path = %path.display(),
                "primary data file not found; loading an empty dataset"
            );
        }

        let lemma_index = if lazy {
            LemmaIndex::default()
        } else {
            LemmaIndex::build(store.resident())
        };

        let (sense_index, senses) = SenseIndex::load(&self.config.senses_path())?;
        let (exceptions, exception_scan) = ExceptionIndex::load(&self.config.exceptions_path())?;

        let relation_index = if lazy {
            RelationIndex::default()
        } else {
            RelationIndex::build(store.resident())
        };

        self.report = LoadReport {
            source_existed: primary.existed,
            records_indexed: primary.decoded,
            records_skipped: primary.skipped,
            senses_loaded: senses.decoded,
            senses_skipped: senses.skipped,
            exceptions_loaded: exception_scan.decoded,
            exceptions_skipped: exception_scan.skipped,
        };
        self.store = store;
        self.lemma_index = lemma_index;
        self.relation_index = relation_index;
        self.sense_index = sense_index;
        self.exceptions = exceptions;
        self.loaded = true;

        tracing::info!(
            path = %path.display(),
            lazy,
            synsets = self.report.records_indexed,
            skipped = self.report.records_skipped,
            senses = self.report.senses_loaded,
            exceptions = self.report.exceptions_loaded,
            "wordnet loaded"
        );
        Ok(())
    }

    // ========================================================================
    // State
    // ========================================================================

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_lazy(&self) -> bool {
        self.config.lazy
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Resolvable synsets: decoded (eager) or indexed (lazy).
    pub fn synset_count(&self) -> usize {
        self.store.len()
    }

    /// Materialized synsets in first-seen order. In lazy mode only pinned
    /// synsets are materialized.
    pub fn synsets(&self) -> impl Iterator<Item = &Arc<Synset>> + '_ {
        self.store.resident()
    }

    pub fn lemma_count(&self) -> usize {
        self.lemma_index.len()
    }

    pub fn sense_count(&self) -> usize {
        self.sense_index.len()
    }

    pub fn senses(&self) -> impl Iterator<Item = &Sense> + '_ {
        self.sense_index.iter()
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    pub fn relation_edge_count(&self, relation: Relation) -> usize {
        self.relation_index.edge_count(relation)
    }

    // ========================================================================
    // Synset lookup
    // ========================================================================

    /// Resolve a synset, surfacing I/O failures from on-demand reads.
    pub fn try_get_synset(&self, id: &SynsetId) -> Result<Option<Arc<Synset>>> {
        self.store.fetch(id)
    }

    /// Resolve a synset. I/O failures are logged and reported as a miss.
    pub fn get_synset(&self, id: &SynsetId) -> Option<Arc<Synset>> {
        match self.store.fetch(id) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "synset read failed");
                None
            }
        }
    }

    /// Like [`Self::get_synset`], taking the 8-digit text form.
    pub fn get_synset_str(&self, id: &str) -> Option<Arc<Synset>> {
        let id: SynsetId = id.parse().ok()?;
        self.get_synset(&id)
    }

    /// Synsets containing `lemma`, in index order. Eager mode only; lazy
    /// loaders have no lemma index and return nothing.
    pub fn get_synsets_by_lemma(&self, lemma: &str, category: Option<Category>) -> Vec<Arc<Synset>> {
        self.lemma_index
            .lookup(lemma, category)
            .iter()
            .filter_map(|id| self.get_synset(id))
            .collect()
    }

    pub fn lemma_ids(&self, lemma: &str, category: Option<Category>) -> Vec<SynsetId> {
        self.lemma_index.lookup(lemma, category)
    }

    // ========================================================================
    // Senses
    // ========================================================================

    pub fn get_sense_by_key(&self, sense_key: &str) -> Option<&Sense> {
        self.sense_index.get(sense_key)
    }

    /// Senses for `lemma`, sorted by sense number.
    pub fn get_senses_by_lemma(&self, lemma: &str, category: Option<Category>) -> Vec<&Sense> {
        self.sense_index.by_lemma(lemma, category)
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Raw one-hop neighbor ids (eager mode only).
    pub fn related_ids(&self, id: &SynsetId, relation: Relation) -> &[SynsetId] {
        self.relation_index.neighbors(id, relation)
    }

    /// One-hop neighbors resolved to synsets. Ids that do not resolve are
    /// dropped.
    pub fn get_related(
        &self,
        id: &SynsetId,
        family: RelationFamily,
        direction: Direction,
    ) -> Vec<Arc<Synset>> {
        self.related(id, Relation::new(family, direction))
    }

    pub fn related(&self, id: &SynsetId, relation: Relation) -> Vec<Arc<Synset>> {
        self.related_ids(id, relation)
            .iter()
            .filter_map(|target| self.get_synset(target))
            .collect()
    }

    pub fn hypernyms(&self, synset: &Synset) -> Vec<Arc<Synset>> {
        self.related(&synset.offset, Relation::Hypernyms)
    }

    pub fn hyponyms(&self, synset: &Synset) -> Vec<Arc<Synset>> {
        self.related(&synset.offset, Relation::Hyponyms)
    }

    pub fn meronyms(&self, synset: &Synset) -> Vec<Arc<Synset>> {
        self.related(&synset.offset, Relation::Meronyms)
    }

    pub fn holonyms(&self, synset: &Synset) -> Vec<Arc<Synset>> {
        self.related(&synset.offset, Relation::Holonyms)
    }

    // ========================================================================
    // Exceptions
    // ========================================================================

    /// Inflected form → base forms for `category`; empty when none loaded.
    pub fn get_exceptions(&self, category: Category) -> &ExceptionMap {
        self.exceptions.for_category(category)
    }

    pub fn base_forms(&self, inflected: &str, category: Category) -> &[String] {
        self.exceptions.base_forms(inflected, category)
    }

    // ========================================================================
    // On-demand cache
    // ========================================================================

    /// Keep the given synsets resident outside the LRU (lazy mode). Returns
    /// how many of them resolve. In eager mode everything is already resident.
    pub fn pin_synsets(&mut self, ids: impl IntoIterator<Item = SynsetId>) -> Result<usize> {
        let mut resolved = 0;
        if let Some(lazy) = self.store.as_lazy_mut() {
            for id in ids {
                if lazy.pin(&id)? {
                    resolved += 1;
                }
            }
            return Ok(resolved);
        }
        for id in ids {
            if self.store.fetch(&id)?.is_some() {
                resolved += 1;
            }
        }
        Ok(resolved)
    }

    /// LRU capacity; `None` for eager loaders.
    pub fn cache_capacity(&self) -> Option<usize> {
        self.store.as_lazy().map(LazyStore::cache_capacity)
    }

    pub fn cache_len(&self) -> usize {
        self.store.as_lazy().map_or(0, LazyStore::cache_len)
    }

    pub fn cache_contains(&self, id: &SynsetId) -> bool {
        self.store
            .as_lazy()
            .is_some_and(|lazy| lazy.cache_contains(id))
    }

    /// Cached ids, most recently used first.
    pub fn cached_ids(&self) -> Vec<SynsetId> {
        self.store
            .as_lazy()
            .map(LazyStore::cached_ids)
            .unwrap_or_default()
    }
}

/// Construct and load in one step.
pub fn load_wordnet(
    data_path: impl Into<PathBuf>,
    lazy: bool,
    cache_size: usize,
) -> Result<WordNetLoader> {
    let config = LoaderConfig::new(data_path)
        .lazy(lazy)
        .cache_size(cache_size)
        .autoload(false);
    let mut loader = WordNetLoader::new(config)?;
    loader.load()?;
    Ok(loader)
}
