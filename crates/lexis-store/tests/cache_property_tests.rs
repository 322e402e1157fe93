use lexis_store::LruCache;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Get(u8),
    Put(u8, u32),
    Peek(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8).prop_map(Op::Get),
        (0u8..8, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        (0u8..8).prop_map(Op::Peek),
    ]
}

/// Reference model: a vector ordered most recent first.
#[derive(Debug, Default)]
struct NaiveLru {
    capacity: usize,
    entries: Vec<(u8, u32)>,
}

impl NaiveLru {
    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.1)
    }

    fn peek(&self, key: u8) -> Option<u32> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        if self.capacity == 0 {
            return Some((key, value));
        }
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
            self.entries.insert(0, (key, value));
            return None;
        }
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop()
        } else {
            None
        };
        self.entries.insert(0, (key, value));
        evicted
    }

    fn keys(&self) -> Vec<u8> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn lru_matches_naive_model(
        capacity in 0usize..5,
        ops in prop::collection::vec(op_strategy(), 0..64),
    ) {
        let mut cache = LruCache::new(capacity);
        let mut model = NaiveLru { capacity, ..NaiveLru::default() };

        for op in ops {
            match op {
                Op::Get(k) => prop_assert_eq!(cache.get(&k).copied(), model.get(k)),
                Op::Peek(k) => prop_assert_eq!(cache.peek(&k).copied(), model.peek(k)),
                Op::Put(k, v) => prop_assert_eq!(cache.put(k, v), model.put(k, v)),
            }
            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.len(), model.entries.len());
            let keys: Vec<u8> = cache.keys_by_recency().copied().collect();
            prop_assert_eq!(keys, model.keys());
        }
    }
}
