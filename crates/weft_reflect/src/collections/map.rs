use alloc::vec::Vec;
use core::fmt;

use crate::ValueError;
use crate::collections::check_kind;
use crate::collections::index::KeyIndex;
use crate::info::{CollectionKind, TypeRef};
use crate::types;
use crate::value::Value;

#[inline]
fn entry_key(entry: &(Value, Value)) -> &Value {
    &entry.0
}

/// An immutable key-value map with unique keys.
///
/// Keys follow the rules of [`ImmutableHashSet`](super::ImmutableHashSet).
/// A repeated key replaces the earlier value but keeps its position.
///
/// # Examples
///
/// ```
/// use weft_reflect::collections::ImmutableMap;
/// use weft_reflect::info::Typed;
/// use weft_reflect::value::Value;
///
/// let map = ImmutableMap::of(
///     String::type_descriptor(),
///     i32::type_descriptor(),
///     [("a", 1), ("b", 2), ("a", 3)].map(|(k, v)| (Value::from(k), Value::I32(v))),
/// );
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&Value::from("a")).and_then(Value::as_i32), Some(3));
/// ```
pub struct ImmutableMap {
    ty: TypeRef,
    entries: Vec<(Value, Value)>,
    index: KeyIndex,
}

impl ImmutableMap {
    pub fn new(
        ty: TypeRef,
        entries: impl IntoIterator<Item = (Value, Value)>,
    ) -> Result<Self, ValueError> {
        check_kind(ty, CollectionKind::Map)?;
        Ok(Self::build(ty, entries))
    }

    pub fn of(
        key: TypeRef,
        value: TypeRef,
        entries: impl IntoIterator<Item = (Value, Value)>,
    ) -> Self {
        Self::build(types::map_of(key, value), entries)
    }

    fn build(ty: TypeRef, entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut map = Self {
            ty,
            entries: Vec::new(),
            index: KeyIndex::default(),
        };
        for (key, value) in entries {
            match map.index.find(&map.entries, &key, entry_key) {
                Some(position) => map.entries[position].1 = value,
                None => {
                    map.entries.push((key, value));
                    map.index
                        .insert(&map.entries, map.entries.len() - 1, entry_key);
                }
            }
        }
        map
    }

    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        let position = self.index.find(&self.entries, key, entry_key)?;
        Some(&self.entries[position].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.index.find(&self.entries, key, entry_key).is_some()
    }

    /// Iterates over `(key, value)` pairs in first insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(entry_key)
    }
}

impl fmt::Debug for ImmutableMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
