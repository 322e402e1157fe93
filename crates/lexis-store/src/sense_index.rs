//! Sense index loaded from the `wordnet_senses.jsonl` sidecar.

use std::path::Path;

use ahash::AHashMap;

use crate::decode::{scan_records, ScanOutcome};
use crate::error::Result;
use crate::model::{Category, Sense};

#[derive(Debug, Default)]
pub struct SenseIndex {
    senses: Vec<Sense>,
    by_key: AHashMap<String, usize>,
}

impl SenseIndex {
    /// Load from `path`; a missing file gives an empty index.
    pub fn load(path: &Path) -> Result<(Self, ScanOutcome)> {
        let mut index = Self::default();
        let outcome = scan_records::<Sense, _>(path, |sense, _| index.insert(sense))?;
        Ok((index, outcome))
    }

    /// A later sense with the same key replaces the earlier one in place.
    pub fn insert(&mut self, sense: Sense) {
        match self.by_key.get(&sense.sense_key) {
            Some(&pos) => self.senses[pos] = sense,
            None => {
                self.by_key.insert(sense.sense_key.clone(), self.senses.len());
                self.senses.push(sense);
            }
        }
    }

    pub fn get(&self, sense_key: &str) -> Option<&Sense> {
        self.by_key.get(sense_key).map(|&pos| &self.senses[pos])
    }

    /// Linear scan for senses whose lemma equals `lemma` exactly, optionally
    /// filtered by category, sorted by ascending sense number. Ties keep load
    /// order.
    pub fn by_lemma(&self, lemma: &str, category: Option<Category>) -> Vec<&Sense> {
        let mut out: Vec<&Sense> = self
            .senses
            .iter()
            .filter(|s| category.map_or(true, |c| s.ss_type == c))
            .filter(|s| s.lemma == lemma)
            .collect();
        out.sort_by_key(|s| s.sense_number);
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sense> + '_ {
        self.senses.iter()
    }

    pub fn len(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }
}
