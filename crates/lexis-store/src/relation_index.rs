//! Derived relation graph.
//!
//! Pointers are stored one way in the data, so every classified pointer
//! `X -symbol-> Y` is indexed in both directions: `Y` under `X` in the
//! pointer's own direction, and `X` under `Y` in the opposite one. The three
//! part/whole variants (member, substance, part) collapse into one
//! undifferentiated meronymy relation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::model::{PointerSymbol, Synset, SynsetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationFamily {
    /// Forward: hypernym (is-a). Inverse: hyponym.
    Hypernymy,
    /// Forward: meronym (has-part). Inverse: holonym (part-of).
    Meronymy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

/// The four traversable relations, one per (family, direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Hypernyms,
    Hyponyms,
    Meronyms,
    Holonyms,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::Hypernyms,
        Relation::Hyponyms,
        Relation::Meronyms,
        Relation::Holonyms,
    ];

    pub fn new(family: RelationFamily, direction: Direction) -> Self {
        match (family, direction) {
            (RelationFamily::Hypernymy, Direction::Forward) => Relation::Hypernyms,
            (RelationFamily::Hypernymy, Direction::Inverse) => Relation::Hyponyms,
            (RelationFamily::Meronymy, Direction::Forward) => Relation::Meronyms,
            (RelationFamily::Meronymy, Direction::Inverse) => Relation::Holonyms,
        }
    }

    pub fn family(self) -> RelationFamily {
        match self {
            Relation::Hypernyms | Relation::Hyponyms => RelationFamily::Hypernymy,
            Relation::Meronyms | Relation::Holonyms => RelationFamily::Meronymy,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Relation::Hypernyms | Relation::Meronyms => Direction::Forward,
            Relation::Hyponyms | Relation::Holonyms => Direction::Inverse,
        }
    }

    pub fn inverse(self) -> Self {
        Relation::new(self.family(), self.direction().reversed())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Hypernyms => "hypernyms",
            Relation::Hyponyms => "hyponyms",
            Relation::Meronyms => "meronyms",
            Relation::Holonyms => "holonyms",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relation::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown relation {s:?}"))
    }
}

/// Which traversable relation a pointer symbol asserts, if any.
pub fn classify(symbol: PointerSymbol) -> Option<Relation> {
    use PointerSymbol::*;
    match symbol {
        Hypernym => Some(Relation::Hypernyms),
        Hyponym => Some(Relation::Hyponyms),
        MemberMeronym | SubstanceMeronym | PartMeronym => Some(Relation::Meronyms),
        MemberHolonym | SubstanceHolonym | PartHolonym => Some(Relation::Holonyms),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct RelationIndex {
    adjacency: [AHashMap<SynsetId, Vec<SynsetId>>; 4],
    edges: [AHashSet<(SynsetId, SynsetId)>; 4],
}

impl RelationIndex {
    pub fn build<'a>(synsets: impl IntoIterator<Item = &'a Arc<Synset>>) -> Self {
        let mut index = Self::default();
        for synset in synsets {
            for pointer in &synset.pointers {
                if let Some(relation) = classify(pointer.symbol) {
                    index.add_edge(relation, synset.offset, pointer.offset);
                }
            }
        }
        index
    }

    /// Record `source -relation-> target` and its inverse. Duplicate edges are
    /// ignored.
    pub fn add_edge(&mut self, relation: Relation, source: SynsetId, target: SynsetId) {
        self.insert(relation, source, target);
        self.insert(relation.inverse(), target, source);
    }

    fn insert(&mut self, relation: Relation, from: SynsetId, to: SynsetId) {
        let slot = relation.slot();
        if self.edges[slot].insert((from, to)) {
            self.adjacency[slot].entry(from).or_default().push(to);
        }
    }

    /// One-hop neighbors in insertion order.
    pub fn neighbors(&self, id: &SynsetId, relation: Relation) -> &[SynsetId] {
        self.adjacency[relation.slot()]
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge_count(&self, relation: Relation) -> usize {
        self.edges[relation.slot()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.iter().all(|set| set.is_empty())
    }
}
