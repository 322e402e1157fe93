//! Morphological exceptions loaded from the `wordnet_exceptions.jsonl` sidecar.

use std::collections::BTreeMap;
use std::path::Path;

use crate::decode::{scan_records, ScanOutcome};
use crate::error::Result;
use crate::model::{Category, ExceptionEntry};

/// Inflected form → base forms for one category.
pub type ExceptionMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Default)]
pub struct ExceptionIndex {
    by_category: [ExceptionMap; 5],
}

impl ExceptionIndex {
    /// Load from `path`. Entries without a recognised `pos` are counted as
    /// skipped.
    pub fn load(path: &Path) -> Result<(Self, ScanOutcome)> {
        let mut index = Self::default();
        let mut discarded = 0usize;
        let mut outcome = scan_records::<ExceptionEntry, _>(path, |entry, _| {
            if !index.insert(entry) {
                discarded += 1;
            }
        })?;
        outcome.decoded -= discarded;
        outcome.skipped += discarded;
        Ok((index, outcome))
    }

    /// Returns `false` when the entry's category is outside the closed set.
    pub fn insert(&mut self, entry: ExceptionEntry) -> bool {
        let Some(category) = entry.category() else {
            return false;
        };
        self.by_category[category.index()].insert(entry.inflected_form, entry.base_forms);
        true
    }

    pub fn for_category(&self, category: Category) -> &ExceptionMap {
        &self.by_category[category.index()]
    }

    pub fn base_forms(&self, inflected: &str, category: Category) -> &[String] {
        self.for_category(category)
            .get(inflected)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_category.iter().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.iter().all(BTreeMap::is_empty)
    }
}
