//! Key to [`RunningStatistic`] hash table.
//!
//! Entries live in one arena `Vec`; buckets hold the index of the first
//! entry of their chain and every entry links to the next one. Bucket
//! placement is `fnv1a(key) & (capacity - 1)` with a power-of-two capacity
//! that doubles whenever the load factor reaches 3/4.

use crate::statistic::RunningStatistic;

pub const DEFAULT_CAPACITY: usize = 1 << 10;
/// Largest starting bucket count; the table can still grow past it.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 30;

const FNV_SEED: u64 = 1469598103934665603;
const FNV_PRIME: u64 = 1099511628211;
const NIL: usize = usize::MAX;

/// 64-bit FNV-1a with this table's seed.
#[inline]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_SEED, |h, &b| {
        (h ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

#[inline]
fn initial_buckets(requested: usize) -> usize {
    requested.clamp(1, MAX_INITIAL_CAPACITY).next_power_of_two()
}

#[derive(Debug)]
struct Entry {
    key: Box<[u8]>,
    hash: u64,
    next: usize,
    stat: RunningStatistic,
}

#[derive(Debug)]
pub struct AggregateStore {
    buckets: Vec<usize>,
    entries: Vec<Entry>,
}

impl Default for AggregateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// `capacity` is rounded up to the next power of two, at most
    /// [`MAX_INITIAL_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = initial_buckets(capacity);
        AggregateStore {
            buckets: vec![NIL; capacity],
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Handle to the statistic of `key`, inserting an unobserved one
    /// (`count == 0`) when the key is new. The key is copied only on insert.
    pub fn get_or_create(&mut self, key: &[u8]) -> &mut RunningStatistic {
        let hash = fnv1a(key);
        let idx = match self.find(key, hash) {
            Some(idx) => idx,
            None => self.insert(key, hash),
        };
        &mut self.entries[idx].stat
    }

    /// Folds one observation of `key` into the store.
    #[inline]
    pub fn record(&mut self, key: &[u8], value: f64) {
        self.get_or_create(key).update(value);
    }

    pub fn get(&self, key: &[u8]) -> Option<&RunningStatistic> {
        self.find(key, fnv1a(key))
            .map(|idx| &self.entries[idx].stat)
            .filter(|stat| stat.count() > 0)
    }

    /// Observed entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &RunningStatistic)> {
        self.entries
            .iter()
            .filter(|e| e.stat.count() > 0)
            .map(|e| (&*e.key, &e.stat))
    }

    /// Combines every entry of `other` into this store, key by key.
    pub fn merge(&mut self, other: AggregateStore) {
        for entry in other.entries {
            if entry.stat.count() == 0 {
                continue;
            }
            self.get_or_create(&entry.key).merge(&entry.stat);
        }
    }

    #[inline]
    fn find(&self, key: &[u8], hash: u64) -> Option<usize> {
        let mut idx = self.buckets[self.bucket_of(hash)];
        while idx != NIL {
            let entry = &self.entries[idx];
            if entry.hash == hash && &*entry.key == key {
                return Some(idx);
            }
            idx = entry.next;
        }
        None
    }

    fn insert(&mut self, key: &[u8], hash: u64) -> usize {
        if self.entries.len() * 4 >= self.buckets.len() * 3 {
            self.grow();
        }
        let bucket = self.bucket_of(hash);
        let idx = self.entries.len();
        self.entries.push(Entry {
            key: key.into(),
            hash,
            next: self.buckets[bucket],
            stat: RunningStatistic::new(),
        });
        self.buckets[bucket] = idx;
        idx
    }

    fn grow(&mut self) {
        let capacity = self.buckets.len() * 2;
        self.buckets.clear();
        self.buckets.resize(capacity, NIL);
        let mask = capacity - 1;
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            let bucket = entry.hash as usize & mask;
            entry.next = self.buckets[bucket];
            self.buckets[bucket] = idx;
        }
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        hash as usize & (self.buckets.len() - 1)
    }
}
