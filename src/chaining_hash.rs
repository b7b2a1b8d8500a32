use std::{hash::Hash, iter, mem};

use crate::{
    TableError,
    table::{self, DEFAULT_CAPACITY, Entry, HashTable},
};

/// A hash table that resolves collisions by separate chaining.
///
/// Each bucket holds a vector of entries in append order. The bucket count is always
/// prime; once more than three quarters of it is used, the table grows to the next prime
/// at or above twice the current count and redistributes every entry.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ChainingHash<K, V> {
    /// The buckets, each one a chain of entries sharing an index
    buckets: Vec<Vec<Entry<K, V>>>,
    /// Current number of entries across all buckets
    size: usize,
    /// Bucket count chosen at construction, restored by `clear`
    initial_bucket_count: usize,
}

impl<K, V> Default for ChainingHash<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ChainingHash<K, V>
where
    K: Eq + Hash,
{
    /// Inserts every pair. A key that is already present keeps its existing value.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainingHash<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        crate::utils::from_iter(iter)
    }
}

impl<K, V> ChainingHash<K, V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with at least `capacity` buckets, rounded up to a prime.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_bucket_count(table::initial_bucket_count(capacity))
    }

    /// Creates an empty table with at least `capacity` buckets, rounded up to a prime.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] if `capacity` is zero or above
    /// [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TableError> {
        table::checked_bucket_count(capacity).map(Self::with_bucket_count)
    }

    /// Creates an empty table with exactly `bucket_count` buckets
    fn with_bucket_count(bucket_count: usize) -> Self {
        log::trace!("creating chaining table with {bucket_count} buckets");
        Self { buckets: empty_buckets(bucket_count), size: 0, initial_bucket_count: bucket_count }
    }
}

impl<K, V> ChainingHash<K, V>
where
    K: Eq + Hash,
{
    /// Returns the position of `key` inside bucket `index`
    fn position(&self, index: usize, key: &K) -> Option<usize> {
        self.buckets.get(index)?.iter().position(|entry| entry.key == *key)
    }

    /// Appends an entry for a key known to be absent, growing first if needed
    #[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
    fn push_new(&mut self, key: K, value: V) -> &mut V {
        while table::exceeds_threshold(self.size.saturating_add(1), self.buckets.len()) {
            self.rehash(table::grown_bucket_count(self.buckets.len()));
        }

        let index = table::bucket_index(&key, self.buckets.len());
        self.size = self.size.saturating_add(1);

        let bucket = &mut self.buckets[index];
        bucket.push(Entry { key, value });
        let last = bucket.len() - 1;
        &mut bucket[last].value
    }

    /// Moves every entry into a fresh set of `bucket_count` buckets
    #[allow(clippy::indexing_slicing)]
    fn rehash(&mut self, bucket_count: usize) {
        log::debug!(
            "growing chaining table from {} to {bucket_count} buckets ({} entries)",
            self.buckets.len(),
            self.size
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(bucket_count));
        for entry in old_buckets.into_iter().flatten() {
            let index = table::bucket_index(&entry.key, bucket_count);
            self.buckets[index].push(entry);
        }
    }
}

impl<K, V> HashTable<K, V> for ChainingHash<K, V>
where
    K: Eq + Hash,
{
    fn size(&self) -> usize {
        self.size
    }

    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn insert(&mut self, key: K, value: V) -> bool {
        let index = table::bucket_index(&key, self.buckets.len());
        if self.position(index, &key).is_some() {
            return false;
        }
        self.push_new(key, value);
        true
    }

    #[allow(clippy::indexing_slicing)]
    fn access(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = table::bucket_index(&key, self.buckets.len());
        match self.position(index, &key) {
            Some(position) => &mut self.buckets[index][position].value,
            None => self.push_new(key, V::default()),
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        let index = table::bucket_index(key, self.buckets.len());
        self.buckets.get(index)?.iter().find(|entry| entry.key == *key).map(|entry| &entry.value)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = table::bucket_index(key, self.buckets.len());
        self.buckets
            .get_mut(index)?
            .iter_mut()
            .find(|entry| entry.key == *key)
            .map(|entry| &mut entry.value)
    }

    fn erase(&mut self, key: &K) -> Option<V> {
        let index = table::bucket_index(key, self.buckets.len());
        let position = self.position(index, key)?;
        let entry = self.buckets.get_mut(index)?.remove(position);
        self.size = self.size.saturating_sub(1);
        Some(entry.value)
    }

    fn clear(&mut self) {
        self.buckets = empty_buckets(self.initial_bucket_count);
        self.size = 0;
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.buckets.iter().flatten().map(|entry| (&entry.key, &entry.value))
    }
}

/// Allocates `bucket_count` empty buckets
fn empty_buckets<K, V>(bucket_count: usize) -> Vec<Vec<Entry<K, V>>> {
    iter::repeat_with(Vec::new).take(bucket_count).collect()
}
