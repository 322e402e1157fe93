//! Fixed-capacity LRU cache.
//!
//! Entries live in a slab (`Vec<Node>`) threaded by an intrusive doubly-linked
//! recency list; the hash map points keys at slab slots. A full cache reuses the
//! tail slot for the incoming entry, so the slab never grows past `capacity` and
//! every operation is O(1).

use std::hash::Hash;

use ahash::AHashMap;

const NIL: usize = usize::MAX;

/// Upper bound on up-front allocation; larger caches grow as entries arrive.
const PREALLOC_LIMIT: usize = 1024;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    slots: AHashMap<K, usize>,
    nodes: Vec<Node<K, V>>,
    /// Most recently used.
    head: usize,
    /// Least recently used.
    tail: usize,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// A cache holding at most `capacity` entries. With capacity 0 nothing is
    /// retained.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: AHashMap::with_capacity(capacity.min(PREALLOC_LIMIT)),
            nodes: Vec::with_capacity(capacity.min(PREALLOC_LIMIT)),
            head: NIL,
            tail: NIL,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Membership test that does not touch recency.
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Read without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.slots.get(key).map(|&idx| &self.nodes[idx].value)
    }

    /// Read and mark most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.slots.get(key)?;
        self.touch(idx);
        Some(&self.nodes[idx].value)
    }

    /// Insert or replace, marking the entry most recently used. Returns the
    /// entry evicted to make room, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.slots.get(&key) {
            self.nodes[idx].value = value;
            self.touch(idx);
            return None;
        }

        if self.capacity == 0 {
            return Some((key, value));
        }

        if self.nodes.len() < self.capacity {
            let idx = self.nodes.len();
            self.nodes.push(Node {
                key: key.clone(),
                value,
                prev: NIL,
                next: NIL,
            });
            self.slots.insert(key, idx);
            self.push_front(idx);
            return None;
        }

        // Full: recycle the least recently used slot.
        let idx = self.tail;
        self.unlink(idx);
        let node = &mut self.nodes[idx];
        let old_key = std::mem::replace(&mut node.key, key.clone());
        let old_value = std::mem::replace(&mut node.value, value);
        self.slots.remove(&old_key);
        self.slots.insert(key, idx);
        self.push_front(idx);
        Some((old_key, old_value))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            if cursor == NIL {
                return None;
            }
            let node = &self.nodes[cursor];
            cursor = node.next;
            Some(&node.key)
        })
    }

    fn touch(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };
        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
        let node = &mut self.nodes[idx];
        node.prev = NIL;
        node.next = NIL;
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[idx];
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head == NIL {
            self.tail = idx;
        } else {
            self.nodes[old_head].prev = idx;
        }
        self.head = idx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(cache: &LruCache<&'static str, u32>) -> Vec<&'static str> {
        cache.keys_by_recency().copied().collect()
    }

    #[test]
    fn test_put_evicts_least_recent() {
        let mut cache = LruCache::new(2);
        assert!(cache.put("a", 1).is_none());
        assert!(cache.put("b", 2).is_none());
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
        assert_eq!(keys(&cache), vec!["c", "b"]);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(keys(&cache), vec!["c", "a"]);
    }

    #[test]
    fn test_peek_and_contains_do_not_refresh() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.peek(&"a"), Some(&1));
        assert!(cache.contains(&"a"));
        cache.put("c", 3);
        assert!(!cache.contains(&"a"));
    }

    #[test]
    fn test_put_existing_key_replaces_without_eviction() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert!(cache.put("a", 10).is_none());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&"a"), Some(&10));
        assert_eq!(keys(&cache), vec!["a", "b"]);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.put("a", 1), Some(("a", 1)));
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_capacity_one() {
        let mut cache = LruCache::new(1);
        cache.put("a", 1);
        assert_eq!(cache.put("b", 2), Some(("a", 1)));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(keys(&cache), vec!["b"]);
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut cache = LruCache::new(usize::MAX);
        assert_eq!(cache.capacity(), usize::MAX);
        for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
            assert!(cache.put(key, i as u32).is_none());
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&"a"), Some(&0));
        assert_eq!(keys(&cache), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut cache = LruCache::new(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        cache.put("c", 3);
        assert_eq!(keys(&cache), vec!["c"]);
    }
}
