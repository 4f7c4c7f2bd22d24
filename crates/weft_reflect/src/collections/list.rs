use alloc::boxed::Box;
use core::fmt;

use crate::ValueError;
use crate::collections::check_kind;
use crate::info::{CollectionKind, TypeRef};
use crate::types;
use crate::value::Value;

/// An immutable ordered list.
///
/// # Examples
///
/// ```
/// use weft_reflect::collections::ImmutableList;
/// use weft_reflect::info::Typed;
/// use weft_reflect::value::Value;
///
/// let list = ImmutableList::of(i32::type_descriptor(), [1, 2, 3].map(Value::I32));
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(2).and_then(Value::as_i32), Some(3));
/// ```
pub struct ImmutableList {
    ty: TypeRef,
    items: Box<[Value]>,
}

impl ImmutableList {
    /// Builds a list of type `ty`, which must be a list type.
    pub fn new(ty: TypeRef, items: impl IntoIterator<Item = Value>) -> Result<Self, ValueError> {
        check_kind(ty, CollectionKind::List)?;
        Ok(Self {
            ty,
            items: items.into_iter().collect(),
        })
    }

    /// Builds a list of `element`s.
    pub fn of(element: TypeRef, items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            ty: types::list_of(element),
            items: items.into_iter().collect(),
        }
    }

    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl fmt::Debug for ImmutableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
