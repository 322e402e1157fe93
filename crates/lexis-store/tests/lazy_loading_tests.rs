use std::fs;
use std::path::Path;

use lexis_store::{
    load_wordnet, Category, LoaderConfig, Pointer, PointerSymbol, Synset, SynsetId, Word,
    WordNetLoader,
};
use tempfile::tempdir;

fn synset(id: u32, lemma: &str, gloss: &str, hypernym: Option<u32>) -> Synset {
    Synset {
        offset: SynsetId::new(id),
        lex_filenum: Some(3),
        lex_filename: Some("noun.Tops".to_string()),
        ss_type: Category::Noun,
        words: vec![Word {
            lemma: lemma.to_string(),
            lex_id: 0,
            tag_count: Some(1),
            sense_number: Some(1),
            marker: None,
        }],
        pointers: hypernym
            .into_iter()
            .map(|target| Pointer {
                symbol: PointerSymbol::Hypernym,
                offset: SynsetId::new(target),
                pos: Category::Noun,
                source: 0,
                target: 0,
            })
            .collect(),
        frames: Vec::new(),
        gloss: gloss.to_string(),
    }
}

fn write_synsets(path: &Path, synsets: &[Synset], newline: &str) {
    let mut body = String::new();
    for synset in synsets {
        body.push_str(&serde_json::to_string(synset).unwrap());
        body.push_str(newline);
    }
    fs::write(path, body).unwrap();
}

fn chain(len: u32) -> Vec<Synset> {
    (1..=len)
        .map(|i| {
            let parent = if i > 1 { Some(i - 1) } else { None };
            synset(i, &format!("node{i}"), &format!("gloss {i}"), parent)
        })
        .collect()
}

#[test]
fn test_offsets_survive_multibyte_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wordnet.jsonl");
    let synsets = vec![
        synset(1, "café", "a small restaurant ☕ serving drinks", None),
        synset(2, "naïveté", "lack of sophistication · 世間知らず", Some(1)),
        synset(3, "entity", "plain ascii", Some(2)),
    ];
    write_synsets(&path, &synsets, "\n");

    let loader = load_wordnet(&path, true, 8).unwrap();
    for expected in &synsets {
        let found = loader.get_synset(&expected.offset).unwrap();
        assert_eq!(*found, *expected);
    }
}

#[test]
fn test_crlf_line_endings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wordnet.jsonl");
    let synsets = chain(5);
    write_synsets(&path, &synsets, "\r\n");

    for lazy in [false, true] {
        let loader = load_wordnet(&path, lazy, 2).unwrap();
        assert_eq!(loader.synset_count(), 5);
        assert_eq!(loader.get_synset(&SynsetId::new(4)).unwrap().gloss, "gloss 4");
    }
}

#[test]
fn test_cache_stays_bounded_over_full_scan() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wordnet.jsonl");
    write_synsets(&path, &chain(200), "\n");

    let loader = load_wordnet(&path, true, 16).unwrap();
    assert_eq!(loader.synset_count(), 200);
    for i in 1..=200 {
        assert!(loader.get_synset(&SynsetId::new(i)).is_some());
        assert!(loader.cache_len() <= 16);
    }
    let cached = loader.cached_ids();
    assert_eq!(cached.len(), 16);
    assert_eq!(cached[0], SynsetId::new(200));
    assert_eq!(cached[15], SynsetId::new(185));
}

#[test]
fn test_eager_relations_over_chain() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wordnet.jsonl");
    write_synsets(&path, &chain(4), "\n");

    let loader = WordNetLoader::new(LoaderConfig::new(&path)).unwrap();
    let middle = loader.get_synset(&SynsetId::new(2)).unwrap();
    let up: Vec<u32> = loader.hypernyms(&middle).iter().map(|s| s.offset.raw()).collect();
    let down: Vec<u32> = loader.hyponyms(&middle).iter().map(|s| s.offset.raw()).collect();
    assert_eq!(up, vec![1]);
    assert_eq!(down, vec![3]);
}

#[test]
fn test_lazy_reads_reflect_file_at_fetch_time() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wordnet.jsonl");
    write_synsets(&path, &chain(3), "\n");

    let loader = load_wordnet(&path, true, 0).unwrap();
    assert!(loader.get_synset(&SynsetId::new(2)).is_some());

    // Truncating the file invalidates the stored offsets; the read decodes
    // nothing and reports a miss rather than an error.
    fs::write(&path, "").unwrap();
    assert!(loader.try_get_synset(&SynsetId::new(2)).unwrap().is_none());
}
