//! # Prime Hash
//!
//! Hash tables with prime bucket counts, in two collision-resolution strategies.
//!
//! This crate provides two implementations of the [`HashTable`] trait:
//!
//! - [`ChainingHash`]: separate chaining, one vector of entries per bucket
//! - [`ProbingHash`]: open addressing with linear probing and tombstones
//!
//! Both keep their bucket count prime. When storing a new key would push the load factor
//! past [`LOAD_FACTOR_THRESHOLD`] (0.75), the table first grows to the next prime at or
//! above twice its bucket count and redistributes every entry.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primehash::{ChainingHash, HashTable};
//!
//! // Create a table; 11 buckets is already prime
//! let mut table = ChainingHash::with_capacity(11);
//! assert_eq!(table.bucket_count(), 11);
//!
//! // Insert values
//! assert!(table.insert("apple".to_string(), 1));
//! assert!(table.insert("banana".to_string(), 2));
//!
//! // A second insert for the same key is rejected
//! assert!(!table.insert("apple".to_string(), 10));
//! assert_eq!(table.get(&"apple".to_string()), Some(&1));
//!
//! // `access` returns the value, creating a default one if needed
//! *table.access("cherry".to_string()) += 5;
//! assert_eq!(table.get(&"cherry".to_string()), Some(&5));
//!
//! // Remove values
//! table.erase(&"apple".to_string());
//! assert_eq!(table.get(&"apple".to_string()), None);
//! assert_eq!(table.size(), 2);
//! ```
//!
//! ## Generic Usage
//!
//! ```rust
//! use primehash::{ChainingHash, HashTable, ProbingHash};
//!
//! fn fill<T: HashTable<u32, u32>>(table: &mut T) {
//!     for key in 0..9 {
//!         table.insert(key, key * key);
//!     }
//! }
//!
//! let mut chaining = ChainingHash::with_capacity(11);
//! let mut probing = ProbingHash::with_capacity(11);
//! fill(&mut chaining);
//! fill(&mut probing);
//!
//! // the ninth entry pushed both tables past 0.75 and they grew to 23 buckets
//! assert_eq!(chaining.bucket_count(), 23);
//! assert_eq!(probing.bucket_count(), 23);
//! assert_eq!(probing.get(&8), Some(&64));
//! ```

/// Module implementing the separate chaining table
mod chaining_hash;
/// Error type for construction and invariant failures
mod error;
pub mod prime;
/// Module implementing the linear probing table
mod probing_hash;
/// The shared table contract and sizing rules
mod table;
/// Utility functions and traits for the tables
mod utils;

pub use chaining_hash::ChainingHash;
pub use error::TableError;
pub use probing_hash::ProbingHash;
pub use table::{DEFAULT_CAPACITY, GROWTH_FACTOR, HashTable, LOAD_FACTOR_THRESHOLD, MAX_CAPACITY};
pub use utils::HashTableExtensions;
