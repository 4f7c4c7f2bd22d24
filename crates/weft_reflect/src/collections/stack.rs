use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::ValueError;
use crate::collections::check_kind;
use crate::info::{CollectionKind, TypeRef};
use crate::types;
use crate::value::Value;

/// An immutable last-in first-out stack.
///
/// # Examples
///
/// ```
/// use weft_reflect::collections::ImmutableStack;
/// use weft_reflect::info::Typed;
/// use weft_reflect::value::Value;
///
/// // Pushing 1, 2, 3 leaves 3 on top.
/// let stack = ImmutableStack::of(i32::type_descriptor(), [1, 2, 3].map(Value::I32));
/// let order: Vec<_> = stack.iter().filter_map(Value::as_i32).collect();
/// assert_eq!(order, [3, 2, 1]);
/// ```
pub struct ImmutableStack {
    ty: TypeRef,
    // Top first.
    items: Box<[Value]>,
}

impl ImmutableStack {
    /// Builds a stack from elements listed top first.
    pub fn from_top(ty: TypeRef, items: impl IntoIterator<Item = Value>) -> Result<Self, ValueError> {
        check_kind(ty, CollectionKind::Stack)?;
        Ok(Self {
            ty,
            items: items.into_iter().collect(),
        })
    }

    /// Builds a stack by pushing `pushes` in order.
    pub fn from_pushes(ty: TypeRef, pushes: impl IntoIterator<Item = Value>) -> Result<Self, ValueError> {
        let mut items: Vec<Value> = pushes.into_iter().collect();
        items.reverse();
        Self::from_top(ty, items)
    }

    /// Builds a stack of `element`s by pushing `pushes` in order.
    pub fn of(element: TypeRef, pushes: impl IntoIterator<Item = Value>) -> Self {
        let mut items: Vec<Value> = pushes.into_iter().collect();
        items.reverse();
        Self {
            ty: types::stack_of(element),
            items: items.into_boxed_slice(),
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

    /// The top element.
    #[inline]
    pub fn peek(&self) -> Option<&Value> {
        self.items.first()
    }

    /// Iterates from the top down.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl fmt::Debug for ImmutableStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
