use alloc::boxed::Box;
use core::fmt;

use crate::ValueError;
use crate::collections::check_kind;
use crate::info::{CollectionKind, TypeRef};
use crate::types;
use crate::value::Value;

/// An immutable array of fixed length.
pub struct ImmutableArray {
    ty: TypeRef,
    items: Box<[Value]>,
}

impl ImmutableArray {
    pub fn new(ty: TypeRef, items: impl IntoIterator<Item = Value>) -> Result<Self, ValueError> {
        check_kind(ty, CollectionKind::Array)?;
        Ok(Self {
            ty,
            items: items.into_iter().collect(),
        })
    }

    pub fn of(element: TypeRef, items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            ty: types::immutable_array_of(element),
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

impl fmt::Debug for ImmutableArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
