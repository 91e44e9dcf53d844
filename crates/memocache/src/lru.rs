//! Bounded LRU (Least Recently Used) cache
//!
//! Uses an index-linked list in a slot arena for O(1) eviction.

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

/// Capacity used by [`BoundedCache::with_default_capacity`]
pub const DEFAULT_CAPACITY: usize = 1000;

/// Entry in the recency list
struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Fixed-capacity cache evicting the least recently used key
///
/// Head of the list is the most recently used entry, tail the least.
pub struct BoundedCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    slots: Vec<Option<Entry<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        }
    }

    /// Create a cache with [`DEFAULT_CAPACITY`] entries
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Get a value and mark its key most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Check for a key without touching its recency
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert or update a key-value pair, marking it most recently used
    ///
    /// Returns the evicted entry when a new key pushed the cache past capacity.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(entry) = &mut self.slots[idx] {
                entry.value = value;
            }
            self.move_to_front(idx);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let idx = self.alloc_slot();
        self.slots[idx] = Some(Entry {
            key: key.clone(),
            value,
            prev: None,
            next: self.head,
        });
        self.link_front(idx);
        self.map.insert(key, idx);

        evicted
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        self.free_list.push(idx);
        self.slots[idx].take().map(|entry| entry.value)
    }

    /// Drop every entry
    pub fn invalidate_all(&mut self) {
        self.map.clear();
        self.slots.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);
        if let Some(entry) = &mut self.slots[idx] {
            entry.prev = None;
            entry.next = self.head;
        }
        self.link_front(idx);
    }

    /// Make `idx` the head; its `next` must already point at the old head
    fn link_front(&mut self, idx: usize) {
        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.slots[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx] {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_entry) = &mut self.slots[prev_idx] {
                    prev_entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_entry) = &mut self.slots[next_idx] {
                    next_entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let tail_idx = self.tail?;
        // Unlink while the slot is still occupied so head/tail get fixed up
        self.unlink(tail_idx);
        let entry = self.slots[tail_idx].take()?;
        self.map.remove(&entry.key);
        self.free_list.push(tail_idx);
        Some((entry.key, entry.value))
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(None);
            idx
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_basic() {
        let mut cache = BoundedCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = BoundedCache::new(2);

        cache.put("a", 1);
        cache.put("b", 2);
        let evicted = cache.put("c", 3);

        assert_eq!(evicted, Some(("a", 1)));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_lru_get_refreshes_recency() {
        let mut cache = BoundedCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1); // Move 1 to front
        cache.put(3, "c"); // Should evict 2

        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(&"c"));
    }

    #[test]
    fn test_lru_contains_does_not_refresh() {
        let mut cache = BoundedCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert!(cache.contains(&1));
        cache.put(3, "c"); // 1 is still the oldest

        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
    }

    #[test]
    fn test_lru_repeated_eviction() {
        let mut cache = BoundedCache::new(3);

        for i in 0..100 {
            cache.put(i, i * 2);
        }

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&96), None);
        assert_eq!(cache.get(&97), Some(&194));
        assert_eq!(cache.get(&98), Some(&196));
        assert_eq!(cache.get(&99), Some(&198));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = BoundedCache::new(3);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        assert_eq!(cache.remove(&2), Some("b"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&2), None);

        // Freed slot is reused without disturbing the order
        cache.put(4, "d");
        cache.put(5, "e"); // Should evict 1
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&3), Some(&"c"));
    }

    #[test]
    fn test_lru_invalidate_all() {
        let mut cache = BoundedCache::new(3);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.invalidate_all();

        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);

        cache.put(3, "c");
        assert_eq!(cache.get(&3), Some(&"c"));
    }

    #[test]
    fn test_lru_overwrite() {
        let mut cache = BoundedCache::new(2);

        cache.put(1, "a");
        assert_eq!(cache.put(1, "b"), None); // Overwrite

        assert_eq!(cache.get(&1), Some(&"b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_default_capacity() {
        let cache: BoundedCache<u64, u64> = BoundedCache::with_default_capacity();
        assert_eq!(cache.capacity(), 1000);
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        let _cache: BoundedCache<u64, u64> = BoundedCache::new(0);
    }
}
