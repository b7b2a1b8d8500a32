//! Utility functions and traits shared by every [`HashTable`] implementation

use std::hash::Hash;

use crate::HashTable;

/// Extension trait for table implementations that provides additional utility methods
pub trait HashTableExtensions<K, V> {
    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<V>;
}

impl<T, K, V> HashTableExtensions<K, V> for T
where
    T: HashTable<K, V>,
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }
}

/// Creates a table from an iterator of key-value pairs.
///
/// Later pairs whose key is already present are dropped, matching `insert`.
pub(crate) fn from_iter<T, K, V, I>(iter: I) -> T
where
    T: HashTable<K, V> + Default,
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = T::default();

    for (key, value) in iter {
        table.insert(key, value);
    }

    table
}
