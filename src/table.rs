//! The capability shared by both collision strategies, plus the sizing and hashing
//! rules they have in common.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::{TableError, prime::next_prime};

/// Load factor above which a table grows.
pub const LOAD_FACTOR_THRESHOLD: f64 = 0.75;

/// Capacity requested by `new()`.
pub const DEFAULT_CAPACITY: usize = 11;

/// A growing table asks for the next prime at or above `GROWTH_FACTOR * bucket_count`.
pub const GROWTH_FACTOR: usize = 2;

/// Largest capacity `try_with_capacity` accepts.
pub const MAX_CAPACITY: usize = 1 << 28;

/// A key-value pair stored in a bucket or slot
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    /// The key in the key-value pair
    pub(crate) key: K,
    /// The value associated with the key
    pub(crate) value: V,
}

/// Operations common to [`ChainingHash`](crate::ChainingHash) and
/// [`ProbingHash`](crate::ProbingHash).
///
/// Code that only needs the container contract can be generic over this trait and run
/// against either collision strategy.
///
/// Every call that stores a new key leaves the table with
/// `load_factor() <= LOAD_FACTOR_THRESHOLD`.
pub trait HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Returns the number of live entries.
    fn size(&self) -> usize;

    /// Returns the number of buckets (chaining) or slots (probing). Always prime.
    fn bucket_count(&self) -> usize;

    /// Returns `size() / bucket_count()`, computed on every call.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn load_factor(&self) -> f64 {
        let bucket_count = self.bucket_count();
        if bucket_count == 0 {
            return 0.0;
        }
        self.size() as f64 / bucket_count as f64
    }

    /// Returns true if the table holds no entries.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Inserts `key` with `value` if the key is absent.
    ///
    /// Returns false and leaves the table untouched if the key is already present,
    /// whatever value it holds.
    fn insert(&mut self, key: K, value: V) -> bool;

    /// Returns a mutable reference to the value for `key`, first storing
    /// `V::default()` under `key` if it is absent.
    fn access(&mut self, key: K) -> &mut V
    where
        V: Default;

    /// Returns a reference to the value for `key`, if present.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value for `key`, if present.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Returns true if an entry for `key` exists.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, returning its value. A missing key is a no-op.
    fn erase(&mut self, key: &K) -> Option<V>;

    /// Removes every entry.
    ///
    /// The backing store is replaced by an empty one with the bucket count the table
    /// was constructed with, so the table stays usable afterwards.
    fn clear(&mut self);

    /// Iterates over all entries in unspecified order.
    ///
    /// The order is stable until the next insertion, erase, or growth.
    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a;
}

/// Maps `key` to an index in `0..bucket_count`.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub(crate) fn bucket_index<Q: Hash + ?Sized>(key: &Q, bucket_count: usize) -> usize {
    debug_assert_ne!(bucket_count, 0);

    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    // the remainder is below `bucket_count`, so it fits back into usize
    (hasher.finish() % bucket_count as u64) as usize
}

/// Returns true if holding `entries` in `bucket_count` buckets would exceed the threshold.
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
pub(crate) fn exceeds_threshold(entries: usize, bucket_count: usize) -> bool {
    entries as f64 / bucket_count as f64 > LOAD_FACTOR_THRESHOLD
}

/// Bucket count a table grows to from `bucket_count`.
pub(crate) fn grown_bucket_count(bucket_count: usize) -> usize {
    next_prime(bucket_count.saturating_mul(GROWTH_FACTOR))
}

/// Bucket count for a requested capacity, clamping zero up to one.
pub(crate) fn initial_bucket_count(capacity: usize) -> usize {
    next_prime(capacity.max(1))
}

/// Like [`initial_bucket_count`], but rejects capacities outside `1..=MAX_CAPACITY`.
pub(crate) fn checked_bucket_count(capacity: usize) -> Result<usize, TableError> {
    if capacity == 0 || capacity > MAX_CAPACITY {
        return Err(TableError::InvalidCapacity { requested: capacity });
    }
    Ok(next_prime(capacity))
}

/// Aborts on a broken internal invariant.
#[cold]
#[track_caller]
#[allow(clippy::panic)]
pub(crate) fn invariant_violation(error: TableError) -> ! {
    panic!("hash table invariant violated: {error}")
}
