//! Provide hash containers, re-exports *hashbrown* and *foldhash*.

// -----------------------------------------------------------------------------
// Modules

mod address;
mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use address::{AddressMap, address_of};
pub use hasher::{FixedHashState, FixedHasher, hash_one};

pub use hashbrown::hash_table::{self, HashTable};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
///
/// Iteration order is insertion-independent but stable across runs,
/// because the hash seed is fixed.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
