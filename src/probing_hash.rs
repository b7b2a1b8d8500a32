use std::{hash::Hash, iter, mem};

use crate::{
    TableError,
    table::{self, DEFAULT_CAPACITY, Entry, HashTable},
};

/// A slot in the probing table
#[derive(Debug, Clone)]
enum Slot<K, V> {
    /// Never used since the last rehash; ends every probe sequence
    Empty,
    /// Holds a live entry
    Occupied(Entry<K, V>),
    /// Held an entry that was erased; searches continue past it
    Tombstone,
}

/// Outcome of walking the probe sequence for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key lives in this slot
    Found(usize),
    /// The key is absent; this is the first slot it may be stored in
    Vacant(usize),
    /// Every slot was visited without finding the key or a free slot
    Exhausted,
}

/// A hash table that resolves collisions by linear probing.
///
/// Entries live directly in a prime-sized slot array. A key is stored in the first free
/// slot at or after its hash index, wrapping around the end of the array. Erased slots
/// become tombstones so that keys displaced past them stay reachable; insertion reuses
/// them.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ProbingHash<K, V> {
    /// The slot array
    slots: Vec<Slot<K, V>>,
    /// Current number of occupied slots
    size: usize,
    /// Current number of tombstone slots
    tombstones: usize,
    /// Slot count chosen at construction, restored by `clear`
    initial_bucket_count: usize,
}

impl<K, V> Default for ProbingHash<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ProbingHash<K, V>
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

impl<K, V> FromIterator<(K, V)> for ProbingHash<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        crate::utils::from_iter(iter)
    }
}

impl<K, V> ProbingHash<K, V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with at least `capacity` slots, rounded up to a prime.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_bucket_count(table::initial_bucket_count(capacity))
    }

    /// Creates an empty table with at least `capacity` slots, rounded up to a prime.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] if `capacity` is zero or above
    /// [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TableError> {
        table::checked_bucket_count(capacity).map(Self::with_bucket_count)
    }

    /// Creates an empty table with exactly `bucket_count` slots
    fn with_bucket_count(bucket_count: usize) -> Self {
        log::trace!("creating probing table with {bucket_count} slots");
        Self {
            slots: empty_slots(bucket_count),
            size: 0,
            tombstones: 0,
            initial_bucket_count: bucket_count,
        }
    }
}

impl<K, V> ProbingHash<K, V>
where
    K: Eq + Hash,
{
    /// Walks the probe sequence of `key`, visiting each slot at most once.
    ///
    /// Tombstones never end the walk; the first one seen is remembered as the place a
    /// missing key would be stored.
    fn probe(&self, key: &K) -> Probe {
        let bucket_count = self.slots.len();
        let mut index = table::bucket_index(key, bucket_count);
        let mut first_tombstone = None;

        for _ in 0..bucket_count {
            match self.slots.get(index) {
                Some(Slot::Occupied(entry)) if entry.key == *key => return Probe::Found(index),
                Some(Slot::Empty) => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Some(Slot::Tombstone) if first_tombstone.is_none() => {
                    first_tombstone = Some(index);
                }
                _ => {}
            }

            index = index.saturating_add(1);
            if index == bucket_count {
                index = 0;
            }
        }

        first_tombstone.map_or(Probe::Exhausted, Probe::Vacant)
    }

    /// Returns the slot index holding `key`
    fn find(&self, key: &K) -> Option<usize> {
        match self.probe(key) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Grows, or rebuilds in place to drop tombstones, so one more entry fits under the
    /// threshold. Returns true if the slots were rebuilt.
    fn reserve_one(&mut self) -> bool {
        let bucket_count = self.slots.len();
        let entries = self.size.saturating_add(1);

        if table::exceeds_threshold(entries, bucket_count) {
            self.rehash(table::grown_bucket_count(bucket_count));
            true
        } else if table::exceeds_threshold(entries.saturating_add(self.tombstones), bucket_count) {
            self.rehash(bucket_count);
            true
        } else {
            false
        }
    }

    /// Stores an entry for a key that `probe` reported absent.
    ///
    /// This is the only place `size` is incremented.
    #[allow(clippy::indexing_slicing)]
    fn claim(&mut self, probe: Probe, key: K, value: V) -> &mut V {
        let probe = if self.reserve_one() { self.probe(&key) } else { probe };
        let bucket_count = self.slots.len();
        let Probe::Vacant(index) = probe else {
            table::invariant_violation(TableError::ProbeSequenceExhausted { bucket_count })
        };

        let slot = &mut self.slots[index];
        if matches!(slot, Slot::Tombstone) {
            self.tombstones = self.tombstones.saturating_sub(1);
        }
        *slot = Slot::Occupied(Entry { key, value });
        self.size = self.size.saturating_add(1);

        self.occupied_value_mut(index)
    }

    /// Returns the value in slot `index`, which the caller has seen occupied
    fn occupied_value_mut(&mut self, index: usize) -> &mut V {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(entry)) => &mut entry.value,
            _ => table::invariant_violation(TableError::SlotNotOccupied { index }),
        }
    }

    /// Moves every live entry into `bucket_count` fresh slots, dropping tombstones
    #[allow(clippy::indexing_slicing)]
    fn rehash(&mut self, bucket_count: usize) {
        log::debug!(
            "rebuilding probing table from {} to {bucket_count} slots ({} entries, {} tombstones)",
            self.slots.len(),
            self.size,
            self.tombstones
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(bucket_count));
        self.tombstones = 0;

        for slot in old_slots {
            if let Slot::Occupied(entry) = slot {
                let Probe::Vacant(index) = self.probe(&entry.key) else {
                    table::invariant_violation(TableError::ProbeSequenceExhausted { bucket_count })
                };
                self.slots[index] = Slot::Occupied(entry);
            }
        }
    }
}

impl<K, V> HashTable<K, V> for ProbingHash<K, V>
where
    K: Eq + Hash,
{
    fn size(&self) -> usize {
        self.size
    }

    fn bucket_count(&self) -> usize {
        self.slots.len()
    }

    fn insert(&mut self, key: K, value: V) -> bool {
        match self.probe(&key) {
            Probe::Found(_) => false,
            probe => {
                self.claim(probe, key, value);
                true
            }
        }
    }

    fn access(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        match self.probe(&key) {
            Probe::Found(index) => self.occupied_value_mut(index),
            probe => self.claim(probe, key, V::default()),
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        match self.slots.get(self.find(key)?) {
            Some(Slot::Occupied(entry)) => Some(&entry.value),
            _ => None,
        }
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find(key)?;
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(entry)) => Some(&mut entry.value),
            _ => None,
        }
    }

    fn erase(&mut self, key: &K) -> Option<V> {
        let index = self.find(key)?;
        let slot = mem::replace(self.slots.get_mut(index)?, Slot::Tombstone);
        self.size = self.size.saturating_sub(1);
        self.tombstones = self.tombstones.saturating_add(1);

        match slot {
            Slot::Occupied(entry) => Some(entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    fn clear(&mut self) {
        self.slots = empty_slots(self.initial_bucket_count);
        self.size = 0;
        self.tombstones = 0;
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(entry) => Some((&entry.key, &entry.value)),
            Slot::Empty | Slot::Tombstone => None,
        })
    }
}

/// Allocates `bucket_count` empty slots
fn empty_slots<K, V>(bucket_count: usize) -> Vec<Slot<K, V>> {
    iter::repeat_with(|| Slot::Empty).take(bucket_count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime::is_prime;

    /// Finds `count` distinct keys whose probe sequences all start at `home` in a table of
    /// `bucket_count` slots.
    fn colliding_keys(count: usize, bucket_count: usize, home: usize) -> Vec<u64> {
        (0_u64..)
            .filter(|key| table::bucket_index(key, bucket_count) == home)
            .take(count)
            .collect()
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = ProbingHash::new();
        assert!(table.insert("key1".to_string(), 1));
        assert!(table.insert("key2".to_string(), 2));
        assert!(table.insert("key3".to_string(), 3));

        assert_eq!(table.get(&"key1".to_string()), Some(&1));
        assert_eq!(table.get(&"key2".to_string()), Some(&2));
        assert_eq!(table.get(&"key3".to_string()), Some(&3));
        assert_eq!(table.get(&"key4".to_string()), None);
    }

    #[test]
    fn test_size_counts_each_insert_once() {
        let mut table = ProbingHash::with_capacity(101);
        for key in 0..500_usize {
            assert!(table.insert(key, key));
            assert_eq!(table.size(), key + 1);
        }
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut table = ProbingHash::new();
        assert!(table.insert(7, 70));
        assert!(!table.insert(7, 700));
        assert_eq!(table.get(&7), Some(&70));
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_default_value_is_distinguished_from_absence() {
        let mut table = ProbingHash::new();
        assert!(table.insert(1, 0));
        assert!(!table.insert(1, 5));
        assert_eq!(table.get(&1), Some(&0));
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_access_creates_default_entry() {
        let mut table: ProbingHash<u32, u32> = ProbingHash::new();
        assert_eq!(*table.access(4), 0);
        assert_eq!(table.size(), 1);

        *table.access(4) += 9;
        assert_eq!(table.get(&4), Some(&9));
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_growth_scenario() {
        let mut table = ProbingHash::with_capacity(11);
        assert_eq!(table.bucket_count(), 11);

        for key in 0..8 {
            assert!(table.insert(key, key));
        }
        assert_eq!(table.bucket_count(), 11);

        assert!(table.insert(8, 8));
        assert_eq!(table.bucket_count(), 23);
        assert_eq!(table.size(), 9);
        for key in 0..9 {
            assert_eq!(table.get(&key), Some(&key));
        }
    }

    #[test]
    fn test_bucket_count_stays_prime() {
        let mut table = ProbingHash::with_capacity(1);
        for key in 0..5_000 {
            table.insert(key, key);
            assert!(is_prime(table.bucket_count()));
            assert!(table.load_factor() <= 0.75);
        }
    }

    #[test]
    fn test_key_displaced_past_erased_slot_is_found() {
        let mut table = ProbingHash::with_capacity(101);
        let keys = colliding_keys(3, 101, 5);
        for &key in &keys {
            assert!(table.insert(key, key));
        }

        assert_eq!(table.erase(&keys[0]), Some(keys[0]));
        assert_eq!(table.get(&keys[1]), Some(&keys[1]));
        assert_eq!(table.get(&keys[2]), Some(&keys[2]));
        assert!(!table.insert(keys[2], 0));
        assert_eq!(table.size(), 2);
    }

    #[test]
    fn test_insert_reuses_tombstone() {
        let mut table = ProbingHash::with_capacity(101);
        let keys = colliding_keys(3, 101, 40);
        table.insert(keys[0], 1);
        table.insert(keys[1], 2);
        table.erase(&keys[0]);
        assert_eq!(table.tombstones, 1);

        assert!(table.insert(keys[2], 3));
        assert_eq!(table.tombstones, 0);
        assert_eq!(table.find(&keys[2]), Some(40));
        assert_eq!(table.get(&keys[1]), Some(&2));
    }

    #[test]
    fn test_tombstones_are_purged_without_growth() {
        let mut table = ProbingHash::with_capacity(11);
        for round in 0..200_u32 {
            assert!(table.insert(round, round));
            assert_eq!(table.erase(&round), Some(round));
        }
        assert_eq!(table.size(), 0);
        assert_eq!(table.bucket_count(), 11);
        assert!(table.tombstones <= 8);
        assert_eq!(table.get(&1_000), None);
    }

    #[test]
    fn test_erase_then_access_yields_default() {
        let mut table = ProbingHash::with_capacity(101);
        for key in 0..100_000 {
            assert!(table.insert(key, key));
        }
        assert_eq!(table.size(), 100_000);
        assert_eq!(*table.access(97), 97);

        table.erase(&97);
        let after_erase = table.size();
        assert_eq!(*table.access(97), 0);
        assert_eq!(table.size(), after_erase + 1);
        assert_eq!(*table.access(10_000), 10_000);
    }

    #[test]
    fn test_clear_restores_initial_bucket_count() {
        let mut table = ProbingHash::with_capacity(11);
        for key in 0..50 {
            table.insert(key, key);
        }
        table.erase(&3);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.bucket_count(), 11);
        assert_eq!(table.tombstones, 0);

        assert_eq!(*table.access(3), 0);
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_iter_skips_tombstones() {
        let mut table = ProbingHash::new();
        table.insert("key1".to_string(), 1);
        table.insert("key2".to_string(), 2);
        table.insert("key3".to_string(), 3);
        table.erase(&"key2".to_string());

        let mut values: Vec<i32> = table.iter().map(|(_, &value)| value).collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 3]);
    }

    #[test]
    #[should_panic(expected = "slot 1 is not occupied")]
    fn test_unoccupied_slot_read_names_the_slot() {
        let mut table: ProbingHash<u8, u8> = ProbingHash::with_capacity(5);
        let _value = table.occupied_value_mut(1);
    }

    #[test]
    fn test_try_with_capacity() {
        assert_eq!(
            ProbingHash::<u8, u8>::try_with_capacity(0).err(),
            Some(TableError::InvalidCapacity { requested: 0 })
        );
        assert_eq!(
            ProbingHash::<u8, u8>::try_with_capacity(crate::MAX_CAPACITY + 1).err(),
            Some(TableError::InvalidCapacity { requested: crate::MAX_CAPACITY + 1 })
        );
        let table = ProbingHash::<u8, u8>::try_with_capacity(20).ok();
        assert_eq!(table.map(|table| table.bucket_count()), Some(23));
    }

    #[test]
    fn test_probe_reports_exhaustion_on_full_slots() {
        let mut table: ProbingHash<u8, u8> = ProbingHash::with_capacity(2);
        table.slots = vec![
            Slot::Occupied(Entry { key: 1, value: 1 }),
            Slot::Occupied(Entry { key: 2, value: 2 }),
        ];
        assert_eq!(table.probe(&3), Probe::Exhausted);
        assert_eq!(table.get(&3), None);
    }
}
