use alloc::boxed::Box;
use core::fmt;

use crate::ValueError;
use crate::collections::check_kind;
use crate::info::{CollectionKind, TypeRef};
use crate::types;
use crate::value::Value;

/// An immutable first-in first-out queue.
pub struct ImmutableQueue {
    ty: TypeRef,
    // Front first.
    items: Box<[Value]>,
}

impl ImmutableQueue {
    /// Builds a queue from elements listed front first.
    pub fn new(ty: TypeRef, items: impl IntoIterator<Item = Value>) -> Result<Self, ValueError> {
        check_kind(ty, CollectionKind::Queue)?;
        Ok(Self {
            ty,
            items: items.into_iter().collect(),
        })
    }

    /// Builds a queue of `element`s, enqueued in order.
    pub fn of(element: TypeRef, items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            ty: types::queue_of(element),
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

    /// The front element.
    #[inline]
    pub fn peek(&self) -> Option<&Value> {
        self.items.first()
    }

    /// Iterates from the front.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl fmt::Debug for ImmutableQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
