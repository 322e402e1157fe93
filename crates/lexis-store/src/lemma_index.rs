//! Lemma → category → synset ids.

use std::sync::Arc;

use ahash::AHashMap;

use crate::model::{Category, Synset, SynsetId};

/// Lemma keys are case-folded.
pub fn normalize_lemma(lemma: &str) -> String {
    lemma.to_lowercase()
}

/// Ids per category for one lemma. Categories keep first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LemmaEntry {
    by_category: Vec<(Category, Vec<SynsetId>)>,
}

impl LemmaEntry {
    fn push(&mut self, category: Category, id: SynsetId) {
        let pos = match self.by_category.iter().position(|(c, _)| *c == category) {
            Some(pos) => pos,
            None => {
                self.by_category.push((category, Vec::new()));
                self.by_category.len() - 1
            }
        };
        let ids = &mut self.by_category[pos].1;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    pub fn ids(&self, category: Category) -> &[SynsetId] {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.by_category.iter().map(|(c, _)| *c)
    }

    /// All ids, category by category.
    pub fn all_ids(&self) -> impl Iterator<Item = &SynsetId> + '_ {
        self.by_category.iter().flat_map(|(_, ids)| ids.iter())
    }
}

#[derive(Debug, Default)]
pub struct LemmaIndex {
    entries: AHashMap<String, LemmaEntry>,
}

impl LemmaIndex {
    pub fn build<'a>(synsets: impl IntoIterator<Item = &'a Arc<Synset>>) -> Self {
        let mut index = Self::default();
        for synset in synsets {
            for word in &synset.words {
                index
                    .entries
                    .entry(normalize_lemma(&word.lemma))
                    .or_default()
                    .push(synset.ss_type, synset.offset);
            }
        }
        index
    }

    pub fn get(&self, lemma: &str) -> Option<&LemmaEntry> {
        self.entries.get(&normalize_lemma(lemma))
    }

    /// Ids for `lemma`, restricted to `category` when given.
    pub fn lookup(&self, lemma: &str, category: Option<Category>) -> Vec<SynsetId> {
        let Some(entry) = self.get(lemma) else {
            return Vec::new();
        };
        match category {
            Some(category) => entry.ids(category).to_vec(),
            None => entry.all_ids().copied().collect(),
        }
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.entries.contains_key(&normalize_lemma(lemma))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Word;

    fn synset(id: u32, category: Category, lemmas: &[&str]) -> Arc<Synset> {
        Arc::new(Synset {
            offset: SynsetId::new(id),
            lex_filenum: None,
            lex_filename: None,
            ss_type: category,
            words: lemmas
                .iter()
                .map(|l| Word {
                    lemma: l.to_string(),
                    lex_id: 0,
                    tag_count: None,
                    sense_number: None,
                    marker: None,
                })
                .collect(),
            pointers: vec![],
            frames: vec![],
            gloss: String::new(),
        })
    }

    #[test]
    fn test_dedups_within_lemma_and_category() {
        let synsets = vec![
            synset(10, Category::Verb, &["run", "Run"]),
            synset(11, Category::Verb, &["run"]),
            synset(12, Category::Noun, &["run"]),
        ];
        let index = LemmaIndex::build(&synsets);

        let ids = index.lookup("RUN", Some(Category::Verb));
        assert_eq!(ids, vec![SynsetId::new(10), SynsetId::new(11)]);

        let all = index.lookup("run", None);
        assert_eq!(
            all,
            vec![SynsetId::new(10), SynsetId::new(11), SynsetId::new(12)]
        );
        let entry = index.get("run").unwrap();
        assert_eq!(
            entry.categories().collect::<Vec<_>>(),
            vec![Category::Verb, Category::Noun]
        );
    }

    #[test]
    fn test_missing_lemma_or_category_is_empty() {
        let synsets = vec![synset(1, Category::Noun, &["dog"])];
        let index = LemmaIndex::build(&synsets);
        assert!(index.lookup("cat", None).is_empty());
        assert!(index.lookup("dog", Some(Category::Verb)).is_empty());
    }
}
