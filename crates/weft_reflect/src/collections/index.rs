use weft_utils::hash::{HashTable, hash_one};

use crate::value::{Value, ValueKey};

/// Positions of unique keys inside an insertion-ordered slice.
#[derive(Default)]
pub(super) struct KeyIndex(HashTable<usize>);

impl KeyIndex {
    /// Finds the position of `key` in `entries`.
    pub fn find<T>(&self, entries: &[T], key: &Value, key_of: fn(&T) -> &Value) -> Option<usize> {
        let hash = hash_one(&ValueKey(key));
        self.0
            .find(hash, |&idx| ValueKey(key_of(&entries[idx])) == ValueKey(key))
            .copied()
    }

    /// Records that the key of `entries[position]` lives at `position`.
    ///
    /// The caller checks with [`find`](Self::find) first.
    pub fn insert<T>(&mut self, entries: &[T], position: usize, key_of: fn(&T) -> &Value) {
        let hash = hash_one(&ValueKey(key_of(&entries[position])));
        self.0.insert_unique(hash, position, |&idx| {
            hash_one(&ValueKey(key_of(&entries[idx])))
        });
    }
}
