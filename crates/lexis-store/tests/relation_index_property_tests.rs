use std::collections::BTreeSet;
use std::sync::Arc;

use lexis_store::relation_index::classify;
use lexis_store::{
    Category, Pointer, PointerSymbol, Relation, RelationIndex, Synset, SynsetId, Word,
};
use proptest::prelude::*;

const SYMBOLS: [PointerSymbol; 10] = [
    PointerSymbol::Hypernym,
    PointerSymbol::Hyponym,
    PointerSymbol::MemberMeronym,
    PointerSymbol::SubstanceMeronym,
    PointerSymbol::PartMeronym,
    PointerSymbol::MemberHolonym,
    PointerSymbol::SubstanceHolonym,
    PointerSymbol::PartHolonym,
    PointerSymbol::Antonym,
    PointerSymbol::InstanceHypernym,
];

fn synset(id: u32, pointers: Vec<(usize, u32)>) -> Arc<Synset> {
    Arc::new(Synset {
        offset: SynsetId::new(id),
        lex_filenum: None,
        lex_filename: None,
        ss_type: Category::Noun,
        words: vec![Word {
            lemma: format!("w{id}"),
            lex_id: 0,
            tag_count: None,
            sense_number: None,
            marker: None,
        }],
        pointers: pointers
            .into_iter()
            .map(|(symbol, target)| Pointer {
                symbol: SYMBOLS[symbol % SYMBOLS.len()],
                offset: SynsetId::new(target),
                pos: Category::Noun,
                source: 0,
                target: 0,
            })
            .collect(),
        frames: Vec::new(),
        gloss: String::new(),
    })
}

fn graph_strategy() -> impl Strategy<Value = Vec<Arc<Synset>>> {
    prop::collection::vec(
        prop::collection::vec((0usize..SYMBOLS.len(), 0u32..8), 0..6),
        1..8,
    )
    .prop_map(|pointer_lists| {
        pointer_lists
            .into_iter()
            .enumerate()
            .map(|(i, pointers)| synset(i as u32, pointers))
            .collect()
    })
}

/// Every classified pointer as a (relation, from, to) triple, with its inverse.
fn naive_edges(synsets: &[Arc<Synset>]) -> BTreeSet<(u8, SynsetId, SynsetId)> {
    let mut out = BTreeSet::new();
    for synset in synsets {
        for pointer in &synset.pointers {
            if let Some(relation) = classify(pointer.symbol) {
                out.insert((relation as u8, synset.offset, pointer.offset));
                out.insert((relation.inverse() as u8, pointer.offset, synset.offset));
            }
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn every_edge_has_its_inverse(synsets in graph_strategy()) {
        let index = RelationIndex::build(&synsets);
        for relation in Relation::ALL {
            prop_assert_eq!(
                index.edge_count(relation),
                index.edge_count(relation.inverse())
            );
            for id in 0u32..8 {
                let from = SynsetId::new(id);
                for to in index.neighbors(&from, relation) {
                    prop_assert!(index.neighbors(to, relation.inverse()).contains(&from));
                }
            }
        }
    }

    #[test]
    fn neighbors_match_naive_scan_without_duplicates(synsets in graph_strategy()) {
        let index = RelationIndex::build(&synsets);
        let expected = naive_edges(&synsets);

        let mut actual = BTreeSet::new();
        for relation in Relation::ALL {
            for id in 0u32..8 {
                let from = SynsetId::new(id);
                let neighbors = index.neighbors(&from, relation);
                let unique: BTreeSet<_> = neighbors.iter().collect();
                prop_assert_eq!(unique.len(), neighbors.len());
                for to in neighbors {
                    actual.insert((relation as u8, from, *to));
                }
            }
        }
        prop_assert_eq!(actual, expected);
    }
}
