use alloc::vec::Vec;
use core::fmt;

use crate::ValueError;
use crate::collections::check_kind;
use crate::collections::index::KeyIndex;
use crate::info::{CollectionKind, TypeRef};
use crate::types;
use crate::value::Value;

#[inline]
fn item_key(value: &Value) -> &Value {
    value
}

/// An immutable set of unique values.
///
/// Text and primitives are unique by content, reference values by identity.
/// Iteration follows first insertion, which keeps round-trips stable.
///
/// # Examples
///
/// ```
/// use weft_reflect::collections::ImmutableHashSet;
/// use weft_reflect::info::Typed;
/// use weft_reflect::value::Value;
///
/// let set = ImmutableHashSet::of(
///     String::type_descriptor(),
///     ["a", "b", "a"].map(Value::from),
/// );
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&Value::from("b")));
/// ```
pub struct ImmutableHashSet {
    ty: TypeRef,
    items: Vec<Value>,
    index: KeyIndex,
}

impl ImmutableHashSet {
    /// Builds a set; later duplicates are dropped.
    pub fn new(ty: TypeRef, items: impl IntoIterator<Item = Value>) -> Result<Self, ValueError> {
        check_kind(ty, CollectionKind::HashSet)?;
        Ok(Self::build(ty, items))
    }

    pub fn of(element: TypeRef, items: impl IntoIterator<Item = Value>) -> Self {
        Self::build(types::hash_set_of(element), items)
    }

    fn build(ty: TypeRef, items: impl IntoIterator<Item = Value>) -> Self {
        let mut set = Self {
            ty,
            items: Vec::new(),
            index: KeyIndex::default(),
        };
        for item in items {
            if set.index.find(&set.items, &item, item_key).is_none() {
                set.items.push(item);
                set.index.insert(&set.items, set.items.len() - 1, item_key);
            }
        }
        set
    }

    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.index.find(&self.items, value, item_key).is_some()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl fmt::Debug for ImmutableHashSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
