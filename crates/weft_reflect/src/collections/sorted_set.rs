use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::ValueError;
use crate::collections::check_kind;
use crate::info::{CollectionKind, TypeRef};
use crate::types;
use crate::value::{Value, check_comparer, compare_with};

/// An immutable set kept in ascending order by a comparer.
///
/// The comparer is a value: null for the natural ordering, or an object
/// whose type has the comparer capability. It is part of the container and
/// is serialized with it.
///
/// # Examples
///
/// ```
/// use weft_reflect::collections::ImmutableSortedSet;
/// use weft_reflect::info::Typed;
/// use weft_reflect::value::Value;
///
/// let set = ImmutableSortedSet::of(
///     i32::type_descriptor(),
///     Value::Null,
///     [3, 1, 2, 1].map(Value::I32),
/// )
/// .unwrap();
///
/// let order: Vec<_> = set.iter().filter_map(Value::as_i32).collect();
/// assert_eq!(order, [1, 2, 3]);
/// ```
pub struct ImmutableSortedSet {
    ty: TypeRef,
    comparer: Value,
    items: Box<[Value]>,
}

impl ImmutableSortedSet {
    /// Sorts `items` with `comparer` and drops elements equal to an earlier one.
    pub fn new(
        ty: TypeRef,
        comparer: Value,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self, ValueError> {
        check_kind(ty, CollectionKind::SortedSet)?;
        Self::build(ty, comparer, items)
    }

    pub fn of(
        element: TypeRef,
        comparer: Value,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self, ValueError> {
        Self::build(types::sorted_set_of(element), comparer, items)
    }

    fn build(
        ty: TypeRef,
        comparer: Value,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self, ValueError> {
        check_comparer(&comparer)?;
        let mut items: Vec<Value> = items.into_iter().collect();
        items.sort_by(|a, b| compare_with(&comparer, a, b));
        items.dedup_by(|a, b| compare_with(&comparer, a, b) == Ordering::Equal);
        Ok(Self {
            ty,
            comparer,
            items: items.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    /// The comparer; null means natural ordering.
    #[inline]
    pub fn comparer(&self) -> &Value {
        &self.comparer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items
            .binary_search_by(|probe| compare_with(&self.comparer, probe, value))
            .is_ok()
    }

    #[inline]
    pub fn min(&self) -> Option<&Value> {
        self.items.first()
    }

    #[inline]
    pub fn max(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Iterates in ascending order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl fmt::Debug for ImmutableSortedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmutableSortedSet")
            .field("comparer", &self.comparer)
            .field("items", &self.items)
            .finish()
    }
}
